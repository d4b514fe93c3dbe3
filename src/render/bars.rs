//! Bar layout and frame building.

use crate::geom::{ScreenPoint, ScreenRect};
use crate::metrics::Metric;
use crate::style::{BarStyle, Orientation};
use crate::viewport::Viewport;

use super::{
    CornerRadii, GradientAxis, LinearGradient, RenderCommand, RenderList, TextAlign, TextStyle,
    render_legend,
};

/// Divisor applied to the bar count when fitting bars into the cross axis.
const THICKNESS_DIVISOR: f32 = 1.5;
/// Offset between the top of a column and its value baseline.
const COLUMN_VALUE_OFFSET: f32 = 20.0;
/// Distance between the bottom edge and a column's label baseline.
const COLUMN_LABEL_OFFSET: f32 = 20.0;
/// Horizontal gap between a row and its labels.
const ROW_TEXT_GAP: f32 = 10.0;
/// Baseline nudge that visually centers 12px text on a row.
const ROW_BASELINE_NUDGE: f32 = 4.0;

/// Resolved geometry of one bar in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Painted bounds at the frame's progress.
    pub rect: ScreenRect,
    /// Bar length when the animation has finished.
    pub full_extent: f32,
    /// Bar length at the frame's progress.
    pub extent: f32,
    /// Size across the growth axis.
    pub thickness: f32,
    /// Opacity applied to the bar's labels.
    pub text_opacity: f32,
}

/// Compute bar geometry for a frame.
///
/// Returns an empty list for empty metrics; all-zero values never divide by
/// zero because the scale floor is 1.
pub fn layout_bars(
    metrics: &[Metric],
    progress: f32,
    viewport: &Viewport,
    style: &BarStyle,
) -> Vec<BarGeometry> {
    if metrics.is_empty() {
        return Vec::new();
    }
    let progress = clamp_progress(progress);
    let text_opacity = (progress * 2.0).min(1.0);
    let count = metrics.len() as f32;
    let max_value = metrics
        .iter()
        .map(|metric| metric.value)
        .filter(|value| value.is_finite())
        .fold(1.0_f64, f64::max);

    let (cross_axis, growth_axis) = match style.orientation {
        Orientation::Vertical => (viewport.width(), viewport.height()),
        Orientation::Horizontal => (viewport.height(), viewport.width()),
    };
    let thickness = style
        .max_thickness
        .min(cross_axis / (count * THICKNESS_DIVISOR));
    let gap = thickness * style.gap_ratio;
    let group = count * thickness + (count - 1.0) * gap;
    let start = (cross_axis - group) / 2.0;
    let max_extent = growth_axis * style.extent_ratio;

    metrics
        .iter()
        .enumerate()
        .map(|(index, metric)| {
            let cross = start + index as f32 * (thickness + gap);
            let full_extent = if metric.value.is_finite() && metric.value > 0.0 {
                (metric.value / max_value) as f32 * max_extent
            } else {
                0.0
            };
            let extent = full_extent * progress;
            let rect = match style.orientation {
                Orientation::Vertical => {
                    let baseline = viewport.height() - style.inset;
                    ScreenRect::new(
                        ScreenPoint::new(cross, baseline - extent),
                        ScreenPoint::new(cross + thickness, baseline),
                    )
                }
                Orientation::Horizontal => {
                    ScreenRect::from_origin_size(style.inset, cross, extent, thickness)
                }
            };
            BarGeometry {
                rect,
                full_extent,
                extent,
                thickness,
                text_opacity,
            }
        })
        .collect()
}

/// Build one complete frame.
///
/// The first command always clears the whole viewport, so frames never
/// accumulate. Empty metrics produce only that clear.
pub fn render_bars(
    metrics: &[Metric],
    progress: f32,
    viewport: &Viewport,
    style: &BarStyle,
) -> RenderList {
    let mut list = RenderList::new();
    list.push(RenderCommand::Clear {
        rect: ScreenRect::from_origin_size(0.0, 0.0, viewport.width(), viewport.height()),
    });

    for (metric, bar) in metrics
        .iter()
        .zip(layout_bars(metrics, progress, viewport, style))
    {
        let color = metric.color.to_color();
        let faded = metric.color.faded(style.fade_alpha).to_color();
        let (axis, corners) = match style.orientation {
            Orientation::Vertical => (
                GradientAxis::TopToBottom,
                CornerRadii::top(leading_radius(style.corner_radius, &bar)),
            ),
            Orientation::Horizontal => (
                GradientAxis::LeftToRight,
                CornerRadii::all(leading_radius(style.corner_radius, &bar)),
            ),
        };
        if bar.extent > 0.0 {
            list.push(RenderCommand::Bar {
                rect: bar.rect,
                corners,
                fill: LinearGradient {
                    axis,
                    from: color,
                    to: faded,
                },
            });
        }

        let value_style = TextStyle {
            color: style.value_color.with_alpha(bar.text_opacity),
            size: style.value_size,
            bold: true,
            align: TextAlign::Left,
        };
        let label_style = TextStyle {
            color: style.label_color.with_alpha(bar.text_opacity),
            size: style.label_size,
            bold: false,
            align: TextAlign::Left,
        };
        let value = format_value(metric.value);

        match style.orientation {
            Orientation::Vertical => {
                let center = bar.rect.min.x + bar.thickness / 2.0;
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(center, bar.rect.min.y + COLUMN_VALUE_OFFSET),
                    text: value,
                    style: TextStyle {
                        align: TextAlign::Center,
                        ..value_style
                    },
                });
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(center, viewport.height() - COLUMN_LABEL_OFFSET),
                    text: metric.label.clone(),
                    style: TextStyle {
                        align: TextAlign::Center,
                        ..label_style
                    },
                });
            }
            Orientation::Horizontal => {
                let baseline = bar.rect.min.y + bar.thickness / 2.0 + ROW_BASELINE_NUDGE;
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(bar.rect.min.x - ROW_TEXT_GAP, baseline),
                    text: metric.label.clone(),
                    style: TextStyle {
                        align: TextAlign::Right,
                        ..label_style
                    },
                });
                list.push(RenderCommand::Text {
                    position: ScreenPoint::new(bar.rect.max.x + ROW_TEXT_GAP, baseline),
                    text: value,
                    style: value_style,
                });
            }
        }
    }
    if let Some(legend) = &style.legend {
        render_legend(&mut list, metrics, viewport, legend);
    }
    list
}

/// Format a metric value the way counts read: no trailing `.0`.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

// Radius never exceeds half the bar so short bars stay convex.
fn leading_radius(radius: f32, bar: &BarGeometry) -> f32 {
    radius
        .min(bar.extent / 2.0)
        .min(bar.thickness / 2.0)
        .max(0.0)
}
