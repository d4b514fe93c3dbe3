//! GPUI integration for gpui_barplot.
//!
//! This module provides a GPUI view that hosts a [`MetricChart`](crate::chart::MetricChart),
//! measures its canvas bounds, pumps animation frames and paints the chart's
//! render list.

mod config;
mod host;
mod paint;
mod text;
mod view;

pub use config::ChartViewConfig;
pub use view::{ChartHandle, GpuiChartView};
