//! Chart styling and layout constants.

use crate::render::Color;

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Columns rising from a baseline near the bottom edge.
    Vertical,
    /// Rows growing rightward from a label gutter on the left.
    Horizontal,
}

/// Layout and typography for a bar chart.
///
/// Lengths are logical pixels; ratios are fractions of the relevant axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    /// Growth direction.
    pub orientation: Orientation,
    /// Upper bound on bar thickness.
    pub max_thickness: f32,
    /// Gap between bars as a fraction of the bar thickness.
    pub gap_ratio: f32,
    /// Longest bar as a fraction of the growth axis.
    pub extent_ratio: f32,
    /// Corner radius on the leading edge.
    pub corner_radius: f32,
    /// Alpha at the faded end of the bar gradient.
    pub fade_alpha: f32,
    /// Vertical: distance from the bottom edge to the baseline.
    /// Horizontal: width of the label gutter left of the bars.
    pub inset: f32,
    /// Color of category labels.
    pub label_color: Color,
    /// Color of value labels.
    pub value_color: Color,
    /// Category label font size.
    pub label_size: f32,
    /// Value label font size.
    pub value_size: f32,
    /// Color-key row along the bottom edge, if any.
    pub legend: Option<LegendStyle>,
}

impl BarStyle {
    /// Column layout of the company-interest panel.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            max_thickness: 70.0,
            gap_ratio: 0.3,
            extent_ratio: 0.6,
            corner_radius: 6.0,
            fade_alpha: 0.3,
            inset: 50.0,
            label_color: LABEL_INDIGO,
            value_color: Color::WHITE,
            label_size: 12.0,
            value_size: 14.0,
            legend: None,
        }
    }

    /// Row layout of the interest-by-category chart.
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            max_thickness: 30.0,
            gap_ratio: 0.5,
            extent_ratio: 0.7,
            corner_radius: 4.0,
            fade_alpha: 0.5,
            inset: 80.0,
            label_color: LABEL_INDIGO,
            value_color: Color::WHITE,
            label_size: 12.0,
            value_size: 12.0,
            legend: None,
        }
    }

    /// Add a color-key row with the default legend style.
    pub fn with_legend(mut self) -> Self {
        self.legend = Some(LegendStyle::default());
        self
    }
}

/// Layout of the color-key row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendStyle {
    /// Radius of each color dot.
    pub dot_radius: f32,
    /// Space between a dot and its label.
    pub label_gap: f32,
    /// Distance from the bottom edge to the label baseline.
    pub bottom_offset: f32,
    /// Label color.
    pub label_color: Color,
    /// Label font size.
    pub label_size: f32,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            dot_radius: 6.0,
            label_gap: 4.0,
            bottom_offset: 12.0,
            label_color: LEGEND_GRAY,
            label_size: 12.0,
        }
    }
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::vertical()
    }
}

const LABEL_INDIGO: Color = Color::new(79.0 / 255.0, 70.0 / 255.0, 229.0 / 255.0, 1.0);
const LEGEND_GRAY: Color = Color::new(75.0 / 255.0, 85.0 / 255.0, 99.0 / 255.0, 1.0);

/// Hue-rotation palette used when metrics carry no explicit color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Degrees between consecutive categories.
    pub hue_step: f32,
    /// Saturation fraction.
    pub saturation: f32,
    /// Lightness fraction.
    pub lightness: f32,
}

impl Palette {
    /// Hue for the category at `index`.
    pub fn hue_for(&self, index: usize) -> f32 {
        (index as f32 * self.hue_step).rem_euclid(360.0)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hue_step: 40.0,
            saturation: 0.8,
            lightness: 0.65,
        }
    }
}

/// Visual theme for charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background painted behind the chart.
    pub background: Color,
    /// Bar layout and typography.
    pub bars: BarStyle,
}

impl Theme {
    /// Light theme with column bars.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            bars: BarStyle::vertical(),
        }
    }

    /// Dark theme with column bars.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.07, 0.09, 0.15, 1.0),
            bars: BarStyle::vertical(),
        }
    }

    /// Replace the bar style.
    pub fn with_bars(mut self, bars: BarStyle) -> Self {
        self.bars = bars;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
