use gpui::{
    App, Background, BorderStyle, Bounds, Corners, Edges, Pixels, Window, linear_color_stop,
    linear_gradient, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, CornerRadii, GradientAxis, LinearGradient, RenderCommand, RenderList};

use super::text::{paint_aligned, shape};

/// A frame ready to paint, positioned at the canvas origin.
#[derive(Debug, Clone)]
pub(crate) struct ChartFrame {
    pub(crate) origin: ScreenPoint,
    pub(crate) render: Option<RenderList>,
    pub(crate) background: Option<Color>,
    pub(crate) font_family: String,
}

pub(crate) fn paint_frame(frame: &ChartFrame, window: &mut Window, cx: &mut App) {
    let Some(render) = frame.render.as_ref() else {
        return;
    };
    let (dx, dy) = (frame.origin.x, frame.origin.y);
    for command in render.commands() {
        match command {
            RenderCommand::Clear { rect } => {
                if let Some(background) = frame.background {
                    paint_fill(window, rect.translated(dx, dy), background);
                }
            }
            RenderCommand::Bar {
                rect,
                corners,
                fill,
            } => {
                paint_bar(window, rect.translated(dx, dy), *corners, *fill);
            }
            RenderCommand::Dot {
                center,
                radius,
                color,
            } => {
                let center = ScreenPoint::new(center.x + dx, center.y + dy);
                paint_dot(window, center, *radius, *color);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                if text.is_empty() || style.color.a <= 0.0 {
                    continue;
                }
                let shaped = shape(window, &frame.font_family, text, style, to_hsla(style.color));
                let anchor = ScreenPoint::new(position.x + dx, position.y + dy);
                paint_aligned(&shaped, anchor, style.align, window, cx);
            }
        }
    }
}

fn paint_fill(window: &mut Window, rect: ScreenRect, color: Color) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_hsla(color),
        Edges::all(px(0.0)),
        to_hsla(color),
        BorderStyle::default(),
    ));
}

fn paint_bar(window: &mut Window, rect: ScreenRect, corners: CornerRadii, fill: LinearGradient) {
    if !rect.is_valid() {
        return;
    }
    window.paint_quad(quad(
        to_bounds(rect),
        to_corners(corners),
        to_background(fill),
        Edges::all(px(0.0)),
        to_hsla(Color::TRANSPARENT),
        BorderStyle::default(),
    ));
}

fn paint_dot(window: &mut Window, center: ScreenPoint, radius: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let rect = ScreenRect::new(
        ScreenPoint::new(center.x - radius, center.y - radius),
        ScreenPoint::new(center.x + radius, center.y + radius),
    );
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(radius)),
        to_hsla(color),
        Edges::all(px(0.0)),
        to_hsla(Color::TRANSPARENT),
        BorderStyle::default(),
    ));
}

fn to_background(fill: LinearGradient) -> Background {
    // Angles follow CSS: 90 runs left to right, 180 top to bottom.
    let angle = match fill.axis {
        GradientAxis::LeftToRight => 90.0,
        GradientAxis::TopToBottom => 180.0,
    };
    linear_gradient(
        angle,
        linear_color_stop(to_hsla(fill.from), 0.0),
        linear_color_stop(to_hsla(fill.to), 1.0),
    )
}

fn to_corners(corners: CornerRadii) -> Corners<Pixels> {
    Corners {
        top_left: px(corners.top_left),
        top_right: px(corners.top_right),
        bottom_right: px(corners.bottom_right),
        bottom_left: px(corners.bottom_left),
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
