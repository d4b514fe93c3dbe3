//! gpui_barplot draws animated, DPI-aware metric bar charts for GPUI dashboards.
//! The core is backend-agnostic and emits render command lists; the `gpui`
//! feature adds a ready-made GPUI view.

#![forbid(unsafe_code)]

pub mod animation;
pub mod chart;
pub mod error;
pub mod geom;
pub mod metrics;
pub mod render;
pub mod style;
pub mod viewport;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use animation::{
    AnimationDriver, AnimationState, CancelHandle, FrameHandle, FramePacer, FrameQueue,
    FrameScheduler, MAX_TICKS, TICK_STEP, TickOutcome, TickTarget,
};
pub use chart::{BarPainter, MetricChart, MetricChartBuilder};
pub use error::{AnimationError, ColorParseError, TickError};
pub use geom::{ScreenPoint, ScreenRect};
pub use metrics::{
    Aggregator, CategoryCatalog, CategoryRecord, LabeledValue, MAX_METRICS, Metric,
    RawCategoryCount, count_by_category,
};
pub use render::{
    BarGeometry, Color, ColorSpec, CornerRadii, GradientAxis, LinearGradient, RenderCommand,
    RenderList, TextAlign, TextStyle, layout_bars, render_bars, render_legend,
};
pub use style::{BarStyle, LegendStyle, Orientation, Palette, Theme};
pub use viewport::{
    BackingSurface, HostContainer, SizeChange, SizingCoordinator, Viewport, measure,
};

#[cfg(feature = "gpui")]
pub use gpui_backend::{ChartHandle, ChartViewConfig, GpuiChartView};
