//! Chart entry points and builders.
//!
//! A [`MetricChart`] owns one sizing coordinator, one metric list and one
//! animation driver. Setting new metrics or observing a new viewport calls
//! [`MetricChart::restart`], which cancels the running animation and grows
//! the bars again from zero.

use std::time::{Duration, Instant};

use crate::animation::{
    AnimationDriver, CancelHandle, FrameHandle, FrameQueue, FrameScheduler, TickOutcome,
    TickTarget,
};
use crate::error::{AnimationError, TickError};
use crate::metrics::{
    Aggregator, CategoryRecord, LabeledValue, Metric, RawCategoryCount, count_by_category,
};
use crate::render::{RenderList, render_bars};
use crate::style::{BarStyle, Theme};
use crate::viewport::{DEFAULT_SETTLE_DELAY, HostContainer, SizingCoordinator, Viewport};

/// Paints frames for one animation run from a snapshot of its inputs.
#[derive(Debug, Clone)]
pub struct BarPainter {
    metrics: Vec<Metric>,
    viewport: Viewport,
    style: BarStyle,
    frame: RenderList,
    progress: f32,
}

impl BarPainter {
    /// Create a painter and paint the progress-0 frame.
    pub fn new(metrics: Vec<Metric>, viewport: Viewport, style: BarStyle) -> Self {
        let frame = render_bars(&metrics, 0.0, &viewport, &style);
        Self {
            metrics,
            viewport,
            style,
            frame,
            progress: 0.0,
        }
    }

    /// Most recently painted frame.
    pub fn frame(&self) -> &RenderList {
        &self.frame
    }

    /// Progress of the most recently painted frame.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Viewport the painter draws into.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl TickTarget for BarPainter {
    fn on_tick(&mut self, progress: f32) -> Result<(), TickError> {
        self.frame = render_bars(&self.metrics, progress, &self.viewport, &self.style);
        self.progress = progress;
        Ok(())
    }
}

/// Animated bar chart over a metric list.
#[derive(Debug)]
pub struct MetricChart<S: FrameScheduler = FrameQueue> {
    theme: Theme,
    aggregator: Aggregator,
    metrics: Vec<Metric>,
    sizing: SizingCoordinator,
    driver: AnimationDriver<S, BarPainter>,
    run: Option<CancelHandle>,
    blank: Option<RenderList>,
}

impl MetricChart<FrameQueue> {
    /// Create a chart with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a chart with custom configuration.
    pub fn builder() -> MetricChartBuilder {
        MetricChartBuilder::default()
    }
}

impl Default for MetricChart<FrameQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FrameScheduler> MetricChart<S> {
    /// Create a chart driven by a custom frame scheduler.
    pub fn with_scheduler(builder: MetricChartBuilder, scheduler: S) -> Self {
        Self {
            theme: builder.theme,
            aggregator: builder.aggregator,
            metrics: Vec::new(),
            sizing: SizingCoordinator::new(builder.settle_delay),
            driver: AnimationDriver::new(scheduler),
            run: None,
            blank: None,
        }
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the aggregator.
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Access the current metric list.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Access the current viewport.
    pub fn viewport(&self) -> Option<Viewport> {
        self.sizing.viewport()
    }

    /// Access the sizing coordinator.
    pub fn sizing(&self) -> &SizingCoordinator {
        &self.sizing
    }

    /// Access the animation driver.
    pub fn driver(&self) -> &AnimationDriver<S, BarPainter> {
        &self.driver
    }

    /// Access the frame scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }

    /// Whether an animation is in progress.
    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    /// Current animation progress; `None` while idle.
    pub fn progress(&self) -> Option<f32> {
        self.driver.progress()
    }

    /// Replace the theme; restarts the animation when it changed.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.restart();
        }
    }

    /// Replace the metric list; restarts the animation when it changed.
    pub fn set_metrics(&mut self, metrics: Vec<Metric>) {
        if self.metrics != metrics {
            self.metrics = metrics;
            self.restart();
        }
    }

    /// Aggregate raw counts and show the result.
    pub fn set_counts(&mut self, counts: &[RawCategoryCount]) {
        let metrics = self.aggregator.aggregate(counts);
        self.set_metrics(metrics);
    }

    /// Count records per category and show the result.
    ///
    /// Without a configured catalog the record categories are used, in order
    /// of first appearance.
    pub fn set_records(&mut self, records: &[CategoryRecord]) {
        let counts = match self.aggregator.catalog() {
            Some(catalog) => count_by_category(records, catalog),
            None => records
                .iter()
                .map(|record| RawCategoryCount::new(record.category.clone(), 1))
                .collect(),
        };
        self.set_counts(&counts);
    }

    /// Rank pre-aggregated values and show the result.
    pub fn set_values(&mut self, values: &[LabeledValue]) {
        let metrics = self.aggregator.rank(values);
        self.set_metrics(metrics);
    }

    /// Attach to the host container.
    pub fn mount(&mut self, host: &impl HostContainer, now: Instant) {
        if self.sizing.mount(host, now).is_some() {
            self.restart();
        }
    }

    /// Run the post-mount re-measurement when it is due.
    ///
    /// A container that lost its area suspends painting until it regains
    /// one.
    pub fn poll_settle(&mut self, host: &impl HostContainer, now: Instant) {
        if self.sizing.poll_settle(host, now).is_some() {
            self.restart();
        }
    }

    /// Handle a host-resize notification.
    ///
    /// Any geometry change restarts the animation, including single-pixel
    /// jitter.
    // TODO: debounce restarts while a window drag is in progress.
    pub fn on_resize(&mut self, host: &impl HostContainer) {
        if self.sizing.on_resize(host).is_some() {
            self.restart();
        }
    }

    /// Detach from the host and cancel the animation.
    ///
    /// Nothing paints until the next mount, which grows the bars from zero
    /// again.
    pub fn unmount(&mut self) {
        self.sizing.unmount();
        self.driver.reset();
        self.run = None;
        self.blank = None;
    }

    /// Cancel the running animation and start over from progress 0.
    ///
    /// While detached, or without a non-zero viewport, nothing is painted.
    /// Without metrics the frame is a bare clear.
    pub fn restart(&mut self) {
        if let Some(run) = self.run.take() {
            self.driver.cancel(run);
        }
        let viewport = self
            .sizing
            .viewport()
            .filter(|_| self.sizing.is_mounted());
        let Some(viewport) = viewport else {
            self.driver.reset();
            self.blank = None;
            return;
        };
        if self.metrics.is_empty() {
            self.driver.reset();
            self.blank = Some(render_bars(&[], 1.0, &viewport, &self.theme.bars));
            return;
        }
        self.blank = None;
        let painter = BarPainter::new(self.metrics.clone(), viewport, self.theme.bars.clone());
        self.run = Some(self.driver.start(painter));
        tracing::debug!(
            metrics = self.metrics.len(),
            width = viewport.width(),
            height = viewport.height(),
            "chart animation restarted"
        );
    }

    /// Deliver a scheduled frame to the animation.
    pub fn frame_elapsed(&mut self, handle: FrameHandle) -> Result<TickOutcome, AnimationError> {
        let outcome = self.driver.frame_elapsed(handle)?;
        if outcome == TickOutcome::Finished {
            self.run = None;
        }
        Ok(outcome)
    }

    /// The frame to display, in logical units.
    pub fn frame(&self) -> Option<&RenderList> {
        self.blank
            .as_ref()
            .or_else(|| self.driver.target().map(BarPainter::frame))
    }

    /// The frame to display, scaled onto the physical backing surface.
    pub fn physical_frame(&self) -> Option<RenderList> {
        let scale = self.sizing.scale_factor();
        self.frame().map(|frame| frame.scaled(scale))
    }
}

impl MetricChart<FrameQueue> {
    /// Deliver the pending frame, if any.
    pub fn advance(&mut self) -> Result<TickOutcome, AnimationError> {
        match self.driver.scheduler_mut().take_due() {
            Some(handle) => self.frame_elapsed(handle),
            None => Ok(TickOutcome::Stale),
        }
    }
}

/// Builder for configuring a [`MetricChart`].
#[derive(Debug, Clone)]
pub struct MetricChartBuilder {
    theme: Theme,
    aggregator: Aggregator,
    settle_delay: Duration,
}

impl Default for MetricChartBuilder {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            aggregator: Aggregator::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl MetricChartBuilder {
    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the bar style, keeping the rest of the theme.
    pub fn bars(mut self, bars: BarStyle) -> Self {
        self.theme.bars = bars;
        self
    }

    /// Set the aggregator.
    pub fn aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Set the delay before the post-mount re-measurement.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Build the chart.
    pub fn build(self) -> MetricChart {
        MetricChart::with_scheduler(self, FrameQueue::new())
    }
}
