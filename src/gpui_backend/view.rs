use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{Task, Window, canvas, div};

use crate::animation::FramePacer;
use crate::chart::MetricChart;
use crate::geom::ScreenPoint;

use super::config::ChartViewConfig;
use super::host::CanvasHost;
use super::paint::{ChartFrame, paint_frame, to_hsla};

/// A GPUI view that renders a [`MetricChart`].
///
/// The view measures its canvas every frame, so both window resizes and
/// layout changes reach the chart's sizing coordinator. While the chart is
/// animating the view requests one animation frame per paint. A tick is
/// delivered only by the paint answering that request, so unrelated
/// re-renders redraw without advancing the animation.
pub struct GpuiChartView {
    chart: Arc<RwLock<MetricChart>>,
    pacer: Arc<FramePacer>,
    config: ChartViewConfig,
    settle_task: Option<Task<()>>,
}

impl GpuiChartView {
    /// Create a new GPUI chart view for the given chart.
    ///
    /// Uses the default [`ChartViewConfig`].
    pub fn new(chart: MetricChart) -> Self {
        Self::with_config(chart, ChartViewConfig::default())
    }

    /// Create a new GPUI chart view with a custom configuration.
    pub fn with_config(chart: MetricChart, config: ChartViewConfig) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            pacer: Arc::new(FramePacer::new()),
            config,
            settle_task: None,
        }
    }

    /// Get a handle for replacing the chart's data.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
        }
    }

    fn arm_settle_timer(&mut self, cx: &mut Context<Self>) {
        if self.settle_task.is_some() {
            return;
        }
        let delay = {
            let chart = self.chart.read().expect("chart lock");
            chart.sizing().settle_delay() + self.config.settle_slack
        };
        self.settle_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            this.update(cx, |_, cx| cx.notify()).ok();
        }));
    }
}

impl Drop for GpuiChartView {
    fn drop(&mut self) {
        if let Ok(mut chart) = self.chart.write() {
            chart.unmount();
        }
    }
}

impl Render for GpuiChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.arm_settle_timer(cx);

        let chart = Arc::clone(&self.chart);
        let pacer = Arc::clone(&self.pacer);
        let config = self.config.clone();
        let background = self.chart.read().expect("chart lock").theme().background;

        div().size_full().bg(to_hsla(background)).child(
            canvas(
                move |bounds, window, _| {
                    let mut chart = chart.write().expect("chart lock");
                    let host = CanvasHost::new(bounds, window.scale_factor());
                    let now = Instant::now();
                    if chart.sizing().is_mounted() {
                        chart.poll_settle(&host, now);
                        chart.on_resize(&host);
                    } else {
                        chart.mount(&host, now);
                    }
                    if pacer.begin_frame() {
                        if let Err(err) = chart.advance() {
                            tracing::debug!(error = %err, "chart frame reported a tick failure");
                        }
                    }
                    if chart.is_animating() {
                        pacer.request();
                        window.request_animation_frame();
                    }
                    ChartFrame {
                        origin: ScreenPoint::new(
                            f32::from(bounds.origin.x),
                            f32::from(bounds.origin.y),
                        ),
                        render: chart.frame().cloned(),
                        background: config.paint_background.then_some(background),
                        font_family: config.font_family.clone(),
                    }
                },
                move |_, frame, window, cx| {
                    paint_frame(&frame, window, cx);
                },
            )
            .size_full(),
        )
    }
}

/// A handle for mutating a [`MetricChart`] held inside a `GpuiChartView`.
///
/// The handle clones cheaply and can be moved into async tasks. Call
/// `notify` on the view's entity after writing so the new data is painted.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<MetricChart>>,
}

impl ChartHandle {
    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&MetricChart) -> R) -> R {
        let chart = self.chart.read().expect("chart lock");
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut MetricChart) -> R) -> R {
        let mut chart = self.chart.write().expect("chart lock");
        f(&mut chart)
    }
}
