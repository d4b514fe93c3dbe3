//! Integration tests for aggregation, animation and bar layout invariants.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gpui_barplot::{
    Aggregator, AnimationDriver, BarStyle, ColorSpec, FrameQueue, HostContainer, MAX_METRICS,
    MAX_TICKS, Metric, MetricChart, RawCategoryCount, RenderCommand, TickError, TickOutcome,
    Viewport, layout_bars, render_bars,
};
use proptest::prelude::*;

struct Host {
    width: f32,
    height: f32,
    ratio: f32,
}

impl HostContainer for Host {
    fn client_size(&self) -> Option<(f32, f32)> {
        Some((self.width, self.height))
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }
}

fn host(width: f32, height: f32) -> Host {
    Host {
        width,
        height,
        ratio: 1.0,
    }
}

fn scenario_counts() -> Vec<RawCategoryCount> {
    vec![
        RawCategoryCount::new("프론트엔드", 3),
        RawCategoryCount::new("백엔드", 1),
    ]
}

fn metric(value: f64) -> Metric {
    Metric {
        label: format!("v{value}"),
        value,
        color: ColorSpec::hue(0.0, 0.8, 0.65),
    }
}

#[test]
fn two_category_scenario_extents() {
    let metrics = Aggregator::new().aggregate(&scenario_counts());
    assert_eq!(metrics[0].label, "프론트엔드");
    assert_eq!(metrics[0].color, ColorSpec::hue(0.0, 0.8, 0.65));
    assert_eq!(metrics[1].label, "백엔드");
    assert_eq!(metrics[1].color, ColorSpec::hue(40.0, 0.8, 0.65));

    let viewport = Viewport::new(400.0, 300.0, 1.0).expect("valid viewport");
    for style in [BarStyle::vertical(), BarStyle::horizontal()] {
        let bars = layout_bars(&metrics, 1.0, &viewport, &style);
        let max_extent = match style.orientation {
            gpui_barplot::Orientation::Vertical => 300.0 * style.extent_ratio,
            gpui_barplot::Orientation::Horizontal => 400.0 * style.extent_ratio,
        };
        assert!((bars[0].extent - max_extent).abs() < 1e-3);
        assert!((bars[1].extent - max_extent / 3.0).abs() < 1e-3);
    }
}

#[test]
fn empty_input_renders_clear_only() {
    let metrics = Aggregator::new().aggregate(&[]);
    assert!(metrics.is_empty());
    let viewport = Viewport::new(400.0, 300.0, 1.0).expect("valid viewport");
    let frame = render_bars(&metrics, 1.0, &viewport, &BarStyle::vertical());
    assert_eq!(frame.commands().len(), 1);
    assert!(matches!(frame.commands()[0], RenderCommand::Clear { .. }));
}

#[test]
fn all_zero_values_lay_out_without_division_by_zero() {
    let metrics = [metric(0.0), metric(0.0)];
    let viewport = Viewport::new(400.0, 300.0, 1.0).expect("valid viewport");
    let bars = layout_bars(&metrics, 1.0, &viewport, &BarStyle::vertical());
    assert!(bars.iter().all(|bar| bar.extent == 0.0 && bar.full_extent.is_finite()));
}

#[test]
fn resize_mid_animation_restarts_from_zero() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(400.0, 300.0), Instant::now());

    while chart.progress().is_some_and(|p| p < 0.5) {
        chart.advance().expect("tick succeeds");
    }
    assert!(chart.progress().is_some_and(|p| p >= 0.5));

    chart.on_resize(&host(420.0, 300.0));
    assert_eq!(chart.progress(), Some(0.0));
    assert_eq!(chart.advance().ok(), Some(TickOutcome::Advanced(0.03)));

    let mut ticks = 1;
    while chart.is_animating() {
        chart.advance().expect("tick succeeds");
        ticks += 1;
    }
    assert_eq!(ticks, MAX_TICKS);
}

#[test]
fn data_change_mid_animation_restarts_from_zero() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(400.0, 300.0), Instant::now());
    for _ in 0..12 {
        chart.advance().expect("tick succeeds");
    }
    chart.set_counts(&[RawCategoryCount::new("풀스택", 2)]);
    assert_eq!(chart.progress(), Some(0.0));
    assert_eq!(chart.metrics().len(), 1);
}

#[test]
fn settle_remeasure_restarts_when_layout_moved() {
    let start = Instant::now();
    let mut chart = MetricChart::builder()
        .settle_delay(Duration::from_millis(200))
        .build();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(380.0, 300.0), start);
    for _ in 0..5 {
        chart.advance().expect("tick succeeds");
    }
    chart.poll_settle(&host(400.0, 300.0), start + Duration::from_millis(100));
    assert!(chart.progress().is_some_and(|p| p > 0.0));
    chart.poll_settle(&host(400.0, 300.0), start + Duration::from_millis(250));
    assert_eq!(chart.progress(), Some(0.0));
    assert_eq!(chart.viewport().map(|v| v.width()), Some(400.0));
}

#[test]
fn zero_sized_host_suspends_rendering() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(0.0, 0.0), Instant::now());
    assert!(chart.frame().is_none());
    assert!(!chart.is_animating());
    chart.on_resize(&host(200.0, 100.0));
    assert!(chart.is_animating());
}

#[test]
fn remount_after_unmount_replays_grow_in() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(400.0, 300.0), Instant::now());
    for _ in 0..10 {
        chart.advance().expect("tick succeeds");
    }
    chart.unmount();
    assert!(chart.frame().is_none());

    chart.mount(&host(400.0, 300.0), Instant::now());
    assert!(chart.is_animating());
    assert_eq!(chart.progress(), Some(0.0));
    let mut ticks = 0;
    while chart.is_animating() {
        chart.advance().expect("tick succeeds");
        ticks += 1;
    }
    assert_eq!(ticks, MAX_TICKS);
    let viewport = chart.viewport().expect("mounted viewport");
    let finished = layout_bars(chart.metrics(), 1.0, &viewport, &BarStyle::vertical());
    assert!((finished[0].extent - 180.0).abs() < 1e-3);
}

#[test]
fn data_arriving_while_detached_schedules_nothing() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(400.0, 300.0), Instant::now());
    chart.unmount();

    chart.set_counts(&[RawCategoryCount::new("z", 5)]);
    assert!(!chart.is_animating());
    assert!(!chart.scheduler_mut().has_pending());
    assert_eq!(chart.advance().ok(), Some(TickOutcome::Stale));
    assert!(chart.frame().is_none());

    chart.mount(&host(400.0, 300.0), Instant::now());
    assert_eq!(chart.progress(), Some(0.0));
    assert_eq!(chart.metrics()[0].label, "z");
}

#[test]
fn collapse_to_zero_suspends_until_area_returns() {
    let mut chart = MetricChart::new();
    chart.set_counts(&scenario_counts());
    chart.mount(&host(400.0, 300.0), Instant::now());
    for _ in 0..5 {
        chart.advance().expect("tick succeeds");
    }

    chart.on_resize(&host(0.0, 0.0));
    assert!(chart.viewport().is_none());
    assert!(chart.frame().is_none());
    assert!(!chart.is_animating());
    assert_eq!(chart.advance().ok(), Some(TickOutcome::Stale));
    assert!(!chart.sizing().surface().is_allocated());

    chart.on_resize(&host(400.0, 300.0));
    assert_eq!(chart.progress(), Some(0.0));
    assert_eq!(chart.advance().ok(), Some(TickOutcome::Advanced(0.03)));
}

fn run_until_cancel(cancel_at: usize) -> (Vec<f32>, usize) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut driver = AnimationDriver::new(FrameQueue::new());
    let handle = driver.start(move |progress: f32| -> Result<(), TickError> {
        sink.borrow_mut().push(progress);
        Ok(())
    });
    let mut delivered = 0;
    while let Some(frame) = driver.scheduler_mut().take_due() {
        if delivered == cancel_at {
            driver.cancel(handle);
            driver.cancel(handle);
            // The withdrawn frame must be inert even if a host delivers it.
            assert_eq!(driver.frame_elapsed(frame).ok(), Some(TickOutcome::Stale));
            break;
        }
        driver.frame_elapsed(frame).expect("tick succeeds");
        delivered += 1;
    }
    let seen = seen.borrow().clone();
    (seen, delivered)
}

proptest! {
    #[test]
    fn aggregate_is_capped_sorted_and_stable(
        counts in prop::collection::vec(("[a-f]{1,2}", 0u64..20), 0..24)
    ) {
        let raw: Vec<RawCategoryCount> = counts
            .iter()
            .map(|(label, count)| RawCategoryCount::new(label.clone(), *count))
            .collect();
        let aggregator = Aggregator::new();
        let metrics = aggregator.aggregate(&raw);
        prop_assert!(metrics.len() <= MAX_METRICS);
        prop_assert!(metrics.windows(2).all(|pair| pair[0].value >= pair[1].value));

        // Ties keep the order in which labels first appeared.
        let mut first_seen: Vec<&str> = Vec::new();
        for entry in &raw {
            if !first_seen.contains(&entry.label.as_str()) {
                first_seen.push(entry.label.as_str());
            }
        }
        let position = |label: &str| first_seen.iter().position(|seen| *seen == label);
        for pair in metrics.windows(2) {
            if pair[0].value == pair[1].value {
                prop_assert!(position(&pair[0].label) < position(&pair[1].label));
            }
        }

        prop_assert_eq!(aggregator.aggregate(&raw), metrics);
    }

    #[test]
    fn painted_extent_is_full_extent_times_progress(
        values in prop::collection::vec(0.0f64..1000.0, 1..=5),
        progress in 0.0f32..=1.0,
        width in 50.0f32..2000.0,
        height in 50.0f32..2000.0,
        vertical in any::<bool>(),
    ) {
        let metrics: Vec<Metric> = values.iter().copied().map(metric).collect();
        let viewport = Viewport::new(width, height, 1.0).expect("valid viewport");
        let style = if vertical { BarStyle::vertical() } else { BarStyle::horizontal() };
        let bars = layout_bars(&metrics, progress, &viewport, &style);
        prop_assert_eq!(bars.len(), metrics.len());
        for bar in &bars {
            prop_assert!((bar.extent - bar.full_extent * progress).abs() <= 1e-3);
            prop_assert!((bar.text_opacity - (progress * 2.0).min(1.0)).abs() <= 1e-6);
        }
        for (i, a) in metrics.iter().enumerate() {
            for (j, b) in metrics.iter().enumerate() {
                if a.value <= b.value {
                    prop_assert!(bars[i].full_extent <= bars[j].full_extent + 1e-3);
                }
            }
        }
    }

    #[test]
    fn cancel_at_any_tick_stops_further_ticks(cancel_at in 0usize..40) {
        let (seen, delivered) = run_until_cancel(cancel_at);
        prop_assert_eq!(seen.len(), delivered);
        prop_assert!(seen.len() <= MAX_TICKS as usize);
        prop_assert!(seen.windows(2).all(|pair| pair[1] > pair[0]));
        if cancel_at < MAX_TICKS as usize {
            prop_assert_eq!(seen.len(), cancel_at);
        }
    }
}
