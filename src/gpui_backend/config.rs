use std::time::Duration;

/// Configuration for the GPUI chart view.
#[derive(Debug, Clone)]
pub struct ChartViewConfig {
    /// Font family for labels and values.
    pub font_family: String,
    /// Paint the theme background behind the chart.
    pub paint_background: bool,
    /// Extra wait added to the settle timer so the re-measurement lands after
    /// the settle delay has fully elapsed.
    pub settle_slack: Duration,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            font_family: ".SystemUIFont".to_string(),
            paint_background: true,
            settle_slack: Duration::from_millis(50),
        }
    }
}
