//! Rendering primitives.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how charts should be drawn.

mod bars;
mod legend;

pub use bars::{BarGeometry, format_value, layout_bars, render_bars};
pub use legend::render_legend;

use crate::error::ColorParseError;
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Convert hue/saturation/lightness into RGB.
    ///
    /// `hue` is in degrees and wraps; the other components are fractions.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l, alpha);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            alpha,
        )
    }

    /// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` literal.
    pub fn from_hex(literal: &str) -> Result<Self, ColorParseError> {
        let Some(digits) = literal.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(literal.to_string()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(literal.to_string()));
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(ColorParseError::BadLength(literal.to_string())),
        };
        let channel = |index: usize| {
            u8::from_str_radix(&expanded[index * 2..index * 2 + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(literal.to_string()))
        };
        let alpha = if expanded.len() == 8 { channel(3)? } else { 255 };
        let mut color = Self::from_rgb8(channel(0)?, channel(1)?, channel(2)?);
        color.a = alpha as f32 / 255.0;
        Ok(color)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Color assigned to a metric.
///
/// Hue-rotated palette entries stay in HSL form so their faded variant keeps
/// the exact hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    /// Hue in degrees with fractional saturation, lightness and alpha.
    Hsla {
        /// Hue in degrees, `0.0..360.0`.
        hue: f32,
        /// Saturation fraction.
        saturation: f32,
        /// Lightness fraction.
        lightness: f32,
        /// Alpha fraction.
        alpha: f32,
    },
    /// Explicit RGBA color.
    Rgba(Color),
}

impl ColorSpec {
    /// Palette entry for a hue with the given saturation and lightness.
    pub fn hue(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::Hsla {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    /// Resolve into a concrete color.
    pub fn to_color(self) -> Color {
        match self {
            Self::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => Color::from_hsla(hue, saturation, lightness, alpha),
            Self::Rgba(color) => color,
        }
    }

    /// Reduced-opacity variant of the same hue.
    pub fn faded(self, alpha: f32) -> Self {
        match self {
            Self::Hsla {
                hue,
                saturation,
                lightness,
                ..
            } => Self::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            },
            Self::Rgba(color) => Self::Rgba(color.with_alpha(alpha)),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Rgba(color)
    }
}

/// Axis a gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientAxis {
    /// From the left edge to the right edge.
    LeftToRight,
    /// From the top edge to the bottom edge.
    TopToBottom,
}

/// Two-stop linear gradient spanning a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    /// Direction of the gradient.
    pub axis: GradientAxis,
    /// Color at the start edge.
    pub from: Color,
    /// Color at the end edge.
    pub to: Color,
}

/// Per-corner radii in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    /// Top-left radius.
    pub top_left: f32,
    /// Top-right radius.
    pub top_right: f32,
    /// Bottom-right radius.
    pub bottom_right: f32,
    /// Bottom-left radius.
    pub bottom_left: f32,
}

impl CornerRadii {
    /// The same radius on every corner.
    pub fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Rounded top corners only.
    pub fn top(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            ..Self::default()
        }
    }

    fn scaled(self, factor: f32) -> Self {
        Self {
            top_left: self.top_left * factor,
            top_right: self.top_right * factor,
            bottom_right: self.bottom_right * factor,
            bottom_left: self.bottom_left * factor,
        }
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Position marks the left edge.
    Left,
    /// Position marks the horizontal center.
    Center,
    /// Position marks the right edge.
    Right,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Render with a bold weight.
    pub bold: bool,
    /// Horizontal anchoring.
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            bold: false,
            align: TextAlign::Left,
        }
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Erase a rectangle, discarding whatever the previous frame painted.
    Clear {
        /// Area to erase.
        rect: ScreenRect,
    },
    /// Fill a rounded bar with a gradient.
    Bar {
        /// Bar bounds.
        rect: ScreenRect,
        /// Corner rounding.
        corners: CornerRadii,
        /// Fill.
        fill: LinearGradient,
    },
    /// Fill a circle with a solid color.
    Dot {
        /// Circle center.
        center: ScreenPoint,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Draw text.
    Text {
        /// Anchor point on the text baseline.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

impl RenderCommand {
    fn scaled(&self, factor: f32) -> Self {
        match self {
            Self::Clear { rect } => Self::Clear {
                rect: rect.scaled(factor),
            },
            Self::Bar {
                rect,
                corners,
                fill,
            } => Self::Bar {
                rect: rect.scaled(factor),
                corners: corners.scaled(factor),
                fill: *fill,
            },
            Self::Dot {
                center,
                radius,
                color,
            } => Self::Dot {
                center: center.scaled(factor),
                radius: radius * factor,
                color: *color,
            },
            Self::Text {
                position,
                text,
                style,
            } => Self::Text {
                position: position.scaled(factor),
                text: text.clone(),
                style: TextStyle {
                    size: style.size * factor,
                    ..*style
                },
            },
        }
    }
}

/// Aggregated render commands for one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of bars in the frame.
    pub fn bar_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, RenderCommand::Bar { .. }))
            .count()
    }

    /// Apply a uniform scale to every command.
    ///
    /// Maps a frame laid out in logical units onto a physical backing surface.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            commands: self
                .commands
                .iter()
                .map(|command| command.scaled(factor))
                .collect(),
        }
    }
}
