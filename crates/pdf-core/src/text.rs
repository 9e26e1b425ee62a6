//! Text rendering utilities

use crate::document::Color;
use crate::ops::fmt_num;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Calculate X offset for text alignment
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text_hex` - Hex-encoded text (e.g., "<414243>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    // x is the anchor, so align against an empty container
    let final_x = x + calculate_x_offset(ctx.text_width, 0.0, align);

    ops.push_str("BT\n");
    push_color_and_font(&mut ops, ctx);
    ops.push_str(&format!("{} {} Td\n", fmt_num(final_x), fmt_num(y)));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Generate PDF operators for text drawn along a rotated baseline
///
/// # Arguments
/// * `text_hex` - Hex-encoded text
/// * `x` - Baseline start X (PDF coordinates)
/// * `y` - Baseline start Y (PDF coordinates)
/// * `angle` - Counter-clockwise rotation in degrees
/// * `ctx` - Text rendering context
pub fn generate_rotated_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    angle: f64,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let (sin, cos) = angle.to_radians().sin_cos();
    let mut ops = String::new();

    ops.push_str("BT\n");
    push_color_and_font(&mut ops, ctx);
    // Text matrix: a b c d e f Tm
    ops.push_str(&format!(
        "{} {} {} {} {} {} Tm\n",
        fmt_num(cos),
        fmt_num(sin),
        fmt_num(-sin),
        fmt_num(cos),
        fmt_num(x),
        fmt_num(y)
    ));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

fn push_color_and_font(ops: &mut String, ctx: &TextRenderContext) {
    ops.push_str(&format!(
        "{} {} {} rg\n",
        fmt_num(ctx.color.r as f64),
        fmt_num(ctx.color.g as f64),
        fmt_num(ctx.color.b as f64)
    ));
    ops.push_str(&format!(
        "/{} {} Tf\n",
        ctx.font_name,
        fmt_num(ctx.font_size as f64)
    ));
}

/// Split text into lines that fit a maximum width
///
/// Explicit newlines start a new line (blank lines are kept). Words wider
/// than `max_width` are broken between characters.
///
/// # Arguments
/// * `text` - Text to split
/// * `max_width` - Maximum line width in points
/// * `measure` - Returns the rendered width of a string in points
pub fn wrap_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{current_line} {word}")
            };

            if measure(&candidate) <= max_width {
                current_line = candidate;
                continue;
            }

            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }

            if measure(word) <= max_width {
                current_line = word.to_string();
            } else {
                // Word does not fit on a line by itself
                let mut chunk = String::new();
                for c in word.chars() {
                    let mut next = chunk.clone();
                    next.push(c);
                    if !chunk.is_empty() && measure(&next) > max_width {
                        lines.push(std::mem::replace(&mut chunk, c.to_string()));
                    } else {
                        chunk = next;
                    }
                }
                current_line = chunk;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
