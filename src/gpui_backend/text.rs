use gpui::{App, Font, FontWeight, Hsla, Pixels, ShapedLine, TextRun, Window, font, point, px};

use crate::geom::ScreenPoint;
use crate::render::{TextAlign, TextStyle};

pub(crate) fn shape(
    window: &Window,
    family: &str,
    text: &str,
    style: &TextStyle,
    color: Hsla,
) -> ShapedLine {
    let base = font(family.to_string());
    let run = TextRun {
        len: text.len(),
        font: if style.bold {
            Font {
                weight: FontWeight::BOLD,
                ..base
            }
        } else {
            base
        },
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None)
}

/// Paint a shaped line so that `anchor` lands on its baseline at the
/// requested alignment.
pub(crate) fn paint_aligned(
    shaped: &ShapedLine,
    anchor: ScreenPoint,
    align: TextAlign,
    window: &mut Window,
    cx: &mut App,
) {
    let width = f32::from(shaped.width);
    let x = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width / 2.0,
        TextAlign::Right => anchor.x - width,
    };
    let ascent: Pixels = shaped.ascent;
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(x), px(anchor.y) - ascent);
    let _ = shaped.paint(origin, line_height, window, cx);
}
