//! Color-key row drawn under a bar chart.

use crate::geom::ScreenPoint;
use crate::metrics::Metric;
use crate::style::LegendStyle;
use crate::viewport::Viewport;

use super::{RenderCommand, RenderList, TextAlign, TextStyle};

/// Append a legend row for `metrics` along the bottom edge.
///
/// Entries share the width equally. In each slot the dot ends just left of
/// the slot center and the label starts just right of it, so the row needs no
/// text measurement. Nothing is drawn for an empty list.
pub fn render_legend(
    list: &mut RenderList,
    metrics: &[Metric],
    viewport: &Viewport,
    style: &LegendStyle,
) {
    if metrics.is_empty() {
        return;
    }
    let slot = viewport.width() / metrics.len() as f32;
    let baseline = viewport.height() - style.bottom_offset;
    let dot_y = baseline - style.label_size / 3.0;
    let half_gap = style.label_gap / 2.0;

    for (index, metric) in metrics.iter().enumerate() {
        let center = (index as f32 + 0.5) * slot;
        list.push(RenderCommand::Dot {
            center: ScreenPoint::new(center - half_gap - style.dot_radius, dot_y),
            radius: style.dot_radius,
            color: metric.color.to_color(),
        });
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(center + half_gap, baseline),
            text: metric.label.clone(),
            style: TextStyle {
                color: style.label_color,
                size: style.label_size,
                bold: false,
                align: TextAlign::Left,
            },
        });
    }
}
