//! Buffered drawing operations
//!
//! Every drawing call on [`PdfDocument`](crate::PdfDocument) is recorded as a
//! [`DrawOp`] in top-origin coordinates. Operations are turned into content
//! stream operators only when the document is saved, which keeps layout
//! decisions inspectable in tests.

use crate::document::Color;
use crate::font::StandardFont;
use crate::image::generate_image_operators;
use crate::text::{generate_rotated_text_operators, generate_text_operators, TextRenderContext};
use crate::Align;

/// Bezier control distance for a quarter circle
const KAPPA: f64 = 0.552_284_75;

/// How a closed shape is painted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaintStyle {
    /// Outline only
    #[default]
    Stroke,
    /// Fill only
    Fill,
    /// Fill then outline
    FillStroke,
}

impl PaintStyle {
    fn operator(&self) -> &'static str {
        match self {
            PaintStyle::Stroke => "S",
            PaintStyle::Fill => "f",
            PaintStyle::FillStroke => "B",
        }
    }
}

/// A single recorded drawing operation (top-origin coordinates, points)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run; `x` is the already aligned start, `y` the baseline
    Text {
        text: String,
        font: StandardFont,
        size: f32,
        x: f64,
        y: f64,
        width: f64,
        color: Color,
        /// Counter-clockwise rotation in degrees
        angle: f64,
    },
    /// Rectangle; `y` is the top edge
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: PaintStyle,
        fill: Color,
        stroke: Color,
        line_width: f64,
    },
    /// Straight line segment
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        line_width: f64,
    },
    /// Circle around a center point
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        style: PaintStyle,
        fill: Color,
        stroke: Color,
        line_width: f64,
    },
    /// Image XObject placement; `y` is the top edge
    Image {
        resource: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl DrawOp {
    /// Text content if this is a text run
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether this op places an image
    pub fn is_image(&self) -> bool {
        matches!(self, DrawOp::Image { .. })
    }

    /// Encode into PDF content stream operators
    ///
    /// # Arguments
    /// * `page_height` - Height of the page, used to flip the y axis
    pub fn encode(&self, page_height: f64) -> Vec<u8> {
        match self {
            DrawOp::Text {
                text,
                font,
                size,
                x,
                y,
                width,
                color,
                angle,
            } => {
                let ctx = TextRenderContext {
                    font_name: font.resource_name().to_string(),
                    font_size: *size,
                    text_width: *width,
                    color: *color,
                };
                let hex = font.encode_text_hex(text);
                if *angle == 0.0 {
                    generate_text_operators(&hex, *x, page_height - y, Align::Left, &ctx)
                } else {
                    generate_rotated_text_operators(&hex, *x, page_height - y, *angle, &ctx)
                }
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                style,
                fill,
                stroke,
                line_width,
            } => {
                let mut ops = graphics_state_prefix(*fill, *stroke, *line_width);
                ops.push_str(&format!(
                    "{} {} {} {} re\n{}\nQ\n",
                    fmt_num(*x),
                    fmt_num(page_height - y - height),
                    fmt_num(*width),
                    fmt_num(*height),
                    style.operator()
                ));
                ops.into_bytes()
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                line_width,
            } => {
                let mut ops = graphics_state_prefix(*color, *color, *line_width);
                ops.push_str(&format!(
                    "{} {} m\n{} {} l\nS\nQ\n",
                    fmt_num(*x1),
                    fmt_num(page_height - y1),
                    fmt_num(*x2),
                    fmt_num(page_height - y2)
                ));
                ops.into_bytes()
            }
            DrawOp::Circle {
                cx,
                cy,
                radius,
                style,
                fill,
                stroke,
                line_width,
            } => {
                let mut ops = graphics_state_prefix(*fill, *stroke, *line_width);
                ops.push_str(&circle_path(*cx, page_height - cy, *radius));
                ops.push_str(&format!("{}\nQ\n", style.operator()));
                ops.into_bytes()
            }
            DrawOp::Image {
                resource,
                x,
                y,
                width,
                height,
            } => generate_image_operators(resource, *x, page_height - y - height, *width, *height),
        }
    }
}

/// Save graphics state and set colors and line width
fn graphics_state_prefix(fill: Color, stroke: Color, line_width: f64) -> String {
    format!(
        "q\n{} {} {} rg\n{} {} {} RG\n{} w\n",
        fmt_num(fill.r as f64),
        fmt_num(fill.g as f64),
        fmt_num(fill.b as f64),
        fmt_num(stroke.r as f64),
        fmt_num(stroke.g as f64),
        fmt_num(stroke.b as f64),
        fmt_num(line_width)
    )
}

/// Closed circle path from four Bezier curves (PDF coordinates)
fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    let k = r * KAPPA;
    let mut path = format!("{} {} m\n", fmt_num(cx + r), fmt_num(cy));
    let curves = [
        (cx + r, cy + k, cx + k, cy + r, cx, cy + r),
        (cx - k, cy + r, cx - r, cy + k, cx - r, cy),
        (cx - r, cy - k, cx - k, cy - r, cx, cy - r),
        (cx + k, cy - r, cx + r, cy - k, cx + r, cy),
    ];
    for (x1, y1, x2, y2, x3, y3) in curves {
        path.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            fmt_num(x3),
            fmt_num(y3)
        ));
    }
    path.push_str("h\n");
    path
}

/// Format a number with at most 3 decimals and no trailing zeros
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}
