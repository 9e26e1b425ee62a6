//! Drawing primitives for the contract template
//!
//! Every primitive takes explicit page and geometry (top-origin points)
//! and returns the height or line count it used; none of them keep a
//! cursor of their own.

use crate::labels;
use crate::model::{Branding, Signature};
use crate::style::ContractStyle;
use crate::Result;
use log::warn;
use pdf_core::{Align, Color, FontStyle, FontWeight, PaintStyle, PdfDocument};
use std::collections::BTreeSet;

/// Suffix for values cut to fit a single-line box
const ELLIPSIS: &str = "…";

/// Font and placement options for a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub align: Align,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f32, weight: FontWeight, color: Color) -> Self {
        Self {
            size,
            weight,
            align: Align::Left,
            color,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Drawing surface owning the document under construction
pub struct Canvas<'a> {
    doc: PdfDocument,
    style: &'a ContractStyle,
    accent: Color,
    watermarked: BTreeSet<usize>,
}

impl<'a> Canvas<'a> {
    /// Create a canvas with an empty document
    pub fn new(style: &'a ContractStyle, accent: Color) -> Self {
        Self {
            doc: PdfDocument::new(),
            style,
            accent,
            watermarked: BTreeSet::new(),
        }
    }

    pub fn style(&self) -> &'a ContractStyle {
        self.style
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn document(&self) -> &PdfDocument {
        &self.doc
    }

    pub fn into_document(self) -> PdfDocument {
        self.doc
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    /// Append a page with the style's size
    pub fn add_page(&mut self) -> usize {
        self.doc
            .add_page(self.style.page_width, self.style.page_height)
    }

    fn apply(&mut self, text: &TextStyle) {
        self.doc.set_font(text.weight, text.size);
        self.doc.set_text_color(text.color);
    }

    /// Wrap text for a given font size and weight
    pub fn wrap(&mut self, value: &str, size: f32, weight: FontWeight, max_width: f64) -> Vec<String> {
        let saved = self.doc.save_text_state();
        self.doc.set_font(weight, size);
        let lines = self.doc.split_text_to_size(value, max_width);
        self.doc.restore_text_state(saved);
        lines
    }

    /// Wrap a field value to fit inside a box of `box_width`
    pub fn wrap_value(&mut self, value: &str, box_width: f64) -> Vec<String> {
        let inner = box_width - 2.0 * self.style.box_padding;
        self.wrap(value, self.style.value_size, FontWeight::Regular, inner)
    }

    /// Draw text with `y` as the first baseline
    ///
    /// With `max_width` the text is word-wrapped and each line placed one
    /// line height below the previous.
    ///
    /// # Returns
    /// Number of lines drawn
    pub fn draw_text(
        &mut self,
        page: usize,
        value: &str,
        x: f64,
        y: f64,
        text: TextStyle,
        max_width: Option<f64>,
    ) -> Result<usize> {
        let lines = match max_width {
            Some(width) => self.wrap(value, text.size, text.weight, width),
            None => vec![value.to_string()],
        };

        self.apply(&text);
        let line_height = self.style.line_height(text.size);
        for (i, line) in lines.iter().enumerate() {
            self.doc
                .insert_text(line, page, x, y + i as f64 * line_height, text.align)?;
        }

        Ok(lines.len())
    }

    /// Cut text with an ellipsis so it fits `max_width` at the current font
    fn fit_single_line(&self, value: &str, max_width: f64) -> String {
        if self.doc.get_text_width(value) <= max_width {
            return value.to_string();
        }

        let mut fitted = String::new();
        for c in value.chars() {
            let candidate = format!("{fitted}{c}{ELLIPSIS}");
            if self.doc.get_text_width(&candidate) > max_width {
                break;
            }
            fitted.push(c);
        }
        format!("{}{ELLIPSIS}", fitted.trim_end())
    }

    /// Small bold label whose top is at `y`
    pub fn field_label(&mut self, page: usize, label: &str, x: f64, y: f64) -> Result<()> {
        let style = TextStyle::new(self.style.label_size, FontWeight::Bold, self.style.label_color);
        self.draw_text(page, label, x, y + self.style.label_size as f64, style, None)?;
        Ok(())
    }

    fn value_box(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.doc.set_fill_color(self.style.box_fill);
        self.doc.set_stroke_color(self.style.box_stroke);
        self.doc.set_line_width(0.5);
        self.doc
            .draw_rect(page, x, y, width, height, PaintStyle::FillStroke)?;
        Ok(())
    }

    /// Baseline of the first value line in a box starting at `box_top`
    fn first_baseline(&self, box_top: f64) -> f64 {
        box_top + self.style.box_padding + self.style.value_size as f64 * 0.9
    }

    /// Labelled single-line field
    ///
    /// # Returns
    /// Height consumed (label plus box)
    pub fn field(
        &mut self,
        page: usize,
        label: &str,
        value: &str,
        x: f64,
        y: f64,
        width: f64,
    ) -> Result<f64> {
        let box_top = y + self.style.label_height;
        self.field_label(page, label, x, y)?;
        self.value_box(page, x, box_top, width, self.style.field_box_height)?;

        if !value.is_empty() {
            let text = TextStyle::new(self.style.value_size, FontWeight::Regular, self.style.text_color);
            self.apply(&text);
            let fitted = self.fit_single_line(value, width - 2.0 * self.style.box_padding);
            let baseline = self.first_baseline(box_top);
            self.draw_text(page, &fitted, x + self.style.box_padding, baseline, text, None)?;
        }

        Ok(self.style.plain_field_height())
    }

    /// Bordered box holding pre-wrapped value lines
    ///
    /// # Returns
    /// Height of the box
    pub fn text_box(
        &mut self,
        page: usize,
        lines: &[String],
        x: f64,
        y: f64,
        width: f64,
        min_height: f64,
    ) -> Result<f64> {
        let height = self.style.box_height(lines.len(), min_height);
        self.value_box(page, x, y, width, height)?;

        let text = TextStyle::new(self.style.value_size, FontWeight::Regular, self.style.text_color);
        self.apply(&text);
        let line_height = self.style.line_height(self.style.value_size);
        let first = self.first_baseline(y);
        for (i, line) in lines.iter().enumerate() {
            self.doc.insert_text(
                line,
                page,
                x + self.style.box_padding,
                first + i as f64 * line_height,
                Align::Left,
            )?;
        }

        Ok(height)
    }

    /// Labelled box that grows with its wrapped lines
    ///
    /// # Returns
    /// Height consumed (label plus box)
    #[allow(clippy::too_many_arguments)]
    pub fn multiline_field(
        &mut self,
        page: usize,
        label: &str,
        lines: &[String],
        x: f64,
        y: f64,
        width: f64,
        min_height: f64,
    ) -> Result<f64> {
        self.field_label(page, label, x, y)?;
        let box_height = self.text_box(page, lines, x, y + self.style.label_height, width, min_height)?;
        Ok(self.style.label_height + box_height)
    }

    /// Labelled signature box of constant height
    ///
    /// Images are fitted and centered, text is centered, an empty signature
    /// leaves the box blank. An image that cannot be decoded is logged and
    /// also leaves the box blank.
    pub fn signature_field(
        &mut self,
        page: usize,
        label: &str,
        signature: &Signature,
        x: f64,
        y: f64,
        width: f64,
    ) -> Result<f64> {
        let box_top = y + self.style.label_height;
        let box_height = self.style.signature_box_height;
        self.field_label(page, label, x, y)?;
        self.value_box(page, x, box_top, width, box_height)?;

        let padding = self.style.box_padding;
        match signature {
            Signature::Empty => {}
            Signature::Image(bytes) => {
                if let Err(e) = self.doc.insert_image_fit(
                    bytes,
                    page,
                    x + padding,
                    box_top + padding,
                    width - 2.0 * padding,
                    box_height - 2.0 * padding,
                    Align::Center,
                ) {
                    warn!("Skipping signature image for '{label}': {e}");
                }
            }
            Signature::Text(name) => {
                let size = self.style.value_size + 4.0;
                self.doc.set_font(FontWeight::Regular, size);
                self.doc.set_font_style(FontStyle::Italic);
                self.doc.set_text_color(self.style.text_color);
                let fitted = self.fit_single_line(name, width - 2.0 * padding);
                let baseline = box_top + (box_height + size as f64 * 0.7) / 2.0;
                self.doc
                    .insert_text(&fitted, page, x + width / 2.0, baseline, Align::Center)?;
            }
        }

        Ok(self.style.signature_field_height())
    }

    /// Checkbox with its label to the right
    ///
    /// A checked box is filled with the accent color and carries a white
    /// check mark.
    pub fn checkbox(&mut self, page: usize, label: &str, checked: bool, x: f64, y: f64) -> Result<()> {
        let size = self.style.checkbox_size;
        self.doc.set_line_width(0.75);

        if checked {
            self.doc.set_fill_color(self.accent);
            self.doc.set_stroke_color(self.accent);
            self.doc
                .draw_rect(page, x, y, size, size, PaintStyle::FillStroke)?;

            self.doc.set_stroke_color(Color::white());
            self.doc.set_line_width(1.5);
            self.doc
                .draw_line(page, x + 0.2 * size, y + 0.55 * size, x + 0.42 * size, y + 0.78 * size)?;
            self.doc
                .draw_line(page, x + 0.42 * size, y + 0.78 * size, x + 0.8 * size, y + 0.25 * size)?;
        } else {
            self.doc.set_stroke_color(self.style.box_stroke);
            self.doc.draw_rect(page, x, y, size, size, PaintStyle::Stroke)?;
        }

        let text = TextStyle::new(self.style.value_size, FontWeight::Regular, self.style.text_color);
        self.draw_text(page, label, x + size + 6.0, y + size - 1.5, text, None)?;
        Ok(())
    }

    /// Section title with an underline
    ///
    /// # Returns
    /// Y where the section content starts
    pub fn section_header(
        &mut self,
        page: usize,
        title: &str,
        x: f64,
        y: f64,
        width: f64,
        color: Color,
    ) -> Result<f64> {
        let size = self.style.section_header_size;
        let text = TextStyle::new(size, FontWeight::Bold, color);
        self.draw_text(page, title, x, y + size as f64, text, None)?;

        let rule_y = y + size as f64 + 4.0;
        self.doc.set_stroke_color(color);
        self.doc.set_line_width(1.0);
        self.doc.draw_line(page, x, rule_y, x + width, rule_y)?;

        Ok(y + self.style.section_header_height())
    }

    /// Horizontal rule across the content width
    pub fn rule(&mut self, page: usize, y: f64, color: Color, line_width: f64) -> Result<()> {
        let (x1, x2) = (self.style.margin_x, self.style.page_width - self.style.margin_x);
        self.doc.set_stroke_color(color);
        self.doc.set_line_width(line_width);
        self.doc.draw_line(page, x1, y, x2, y)?;
        Ok(())
    }

    /// Full-width section header in the accent color
    pub fn full_width_header(&mut self, page: usize, title: &str, y: f64) -> Result<f64> {
        let (x, width, accent) = (self.style.margin_x, self.style.content_width(), self.accent);
        self.section_header(page, title, x, y, width, accent)
    }

    /// Rectangle around the printable area
    pub fn page_border(&mut self, page: usize) -> Result<()> {
        let inset = self.style.border_inset;
        self.doc.set_stroke_color(self.style.border_color);
        self.doc.set_line_width(0.75);
        self.doc.draw_rect(
            page,
            inset,
            inset,
            self.style.page_width - 2.0 * inset,
            self.style.page_height - 2.0 * inset,
            PaintStyle::Stroke,
        )?;
        Ok(())
    }

    /// Company logo, accent bar and contact block
    ///
    /// Continuation pages get a compact variant.
    ///
    /// # Returns
    /// Y where page content starts below the header
    pub fn company_header(&mut self, page: usize, branding: &Branding, continuation: bool) -> Result<f64> {
        let style = self.style;
        let top = style.header_top;
        let (logo_width, block_height, name_size, text_size) = if continuation {
            (style.compact_logo_width, style.compact_logo_height, 11.0, 8.0)
        } else {
            (style.logo_width, style.logo_height, 14.0, 9.0)
        };

        let mut text_right = style.page_width - style.margin_x;
        if let Some(logo) = &branding.logo {
            let logo_x = style.page_width - style.margin_x - logo_width;
            match self.doc.insert_image_fit(
                logo,
                page,
                logo_x,
                top,
                logo_width,
                block_height,
                Align::Right,
            ) {
                Ok(()) => text_right = logo_x - 12.0,
                Err(e) => warn!("Skipping company logo on page {page}: {e}"),
            }
        }

        self.doc.set_fill_color(self.accent);
        self.doc
            .draw_rect(page, style.margin_x, top, 4.0, block_height, PaintStyle::Fill)?;

        let text_x = style.margin_x + 12.0;
        let max_width = text_right - text_x;
        let name_style = TextStyle::new(name_size, FontWeight::Bold, style.text_color);
        let detail_style = TextStyle::new(text_size, FontWeight::Regular, style.label_color);

        let mut baseline = top + name_size as f64;
        self.apply(&name_style);
        let name = self.fit_single_line(&branding.company_name, max_width);
        self.draw_text(page, &name, text_x, baseline, name_style, None)?;

        for detail in [branding.address.clone(), branding.contact_line()] {
            if detail.is_empty() {
                continue;
            }
            baseline += self.style.line_height(text_size) + 2.0;
            self.apply(&detail_style);
            let fitted = self.fit_single_line(&detail, max_width);
            self.draw_text(page, &fitted, text_x, baseline, detail_style, None)?;
        }

        Ok(style.header_bottom(continuation))
    }

    /// Diagonal preview watermark across the page center
    ///
    /// Stamping a page a second time does nothing, and the caller's font
    /// and color are left as they were.
    pub fn watermark(&mut self, page: usize) -> Result<()> {
        if self.watermarked.contains(&page) {
            return Ok(());
        }

        let saved = self.doc.save_text_state();
        let style = self.style;
        let (cx, cy) = (style.page_width / 2.0, style.page_height / 2.0);
        let angle = style.watermark_angle;

        self.doc.set_font(FontWeight::Bold, style.watermark_size);
        self.doc.set_text_color(style.watermark_color);
        self.doc
            .insert_text_rotated(labels::WATERMARK, page, cx, cy, angle)?;

        // Second line sits below the first, perpendicular to the baseline
        let offset = style.watermark_size as f64 * 0.9;
        let (sin, cos) = angle.to_radians().sin_cos();
        self.doc.set_font(FontWeight::Bold, style.watermark_subtitle_size);
        self.doc.insert_text_rotated(
            labels::WATERMARK_SUBTITLE,
            page,
            cx + offset * sin,
            cy + offset * cos,
            angle,
        )?;

        self.doc.restore_text_state(saved);
        self.watermarked.insert(page);
        Ok(())
    }

    /// Whether a page already carries the watermark
    pub fn is_watermarked(&self, page: usize) -> bool {
        self.watermarked.contains(&page)
    }

    /// "{index}/{total}" badge at the bottom center, plus the company name
    /// at the bottom right when given
    pub fn page_number_badge(
        &mut self,
        page: usize,
        index: usize,
        total: usize,
        company_name: Option<&str>,
    ) -> Result<()> {
        let style = self.style;
        let cx = style.page_width / 2.0;
        let cy = style.page_height - style.badge_offset;

        self.doc.set_fill_color(self.accent);
        self.doc
            .draw_circle(page, cx, cy, style.badge_radius, PaintStyle::Fill)?;

        let number = TextStyle::new(8.0, FontWeight::Bold, Color::white()).aligned(Align::Center);
        self.draw_text(page, &format!("{index}/{total}"), cx, cy + 3.0, number, None)?;

        if let Some(name) = company_name {
            let footer = TextStyle::new(8.0, FontWeight::Regular, style.label_color).aligned(Align::Right);
            self.draw_text(
                page,
                name,
                style.page_width - style.margin_x,
                cy + 3.0,
                footer,
                None,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use pdf_core::DrawOp;
    use pretty_assertions::assert_eq;

    fn canvas(style: &ContractStyle) -> Canvas<'_> {
        let mut canvas = Canvas::new(style, DEFAULT_COLOR.into());
        canvas.add_page();
        canvas
    }

    fn texts(canvas: &Canvas<'_>, page: usize) -> Vec<String> {
        canvas
            .document()
            .page_ops(page)
            .iter()
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }

    fn rect_heights(canvas: &Canvas<'_>, page: usize) -> Vec<f64> {
        canvas
            .document()
            .page_ops(page)
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_text_counts_wrapped_lines() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let text = TextStyle::new(10.0, FontWeight::Regular, Color::black());

        let single = canvas
            .draw_text(1, "kort", 40.0, 100.0, text, Some(200.0))
            .unwrap();
        let wrapped = canvas
            .draw_text(1, "dette er en litt lengre tekst", 40.0, 100.0, text, Some(60.0))
            .unwrap();

        assert_eq!(single, 1);
        assert!(wrapped > 1);
    }

    #[test]
    fn test_field_height_is_fixed() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let empty = canvas.field(1, "Fornavn", "", 40.0, 100.0, 200.0).unwrap();
        let long = canvas
            .field(1, "Adresse", &"Storgata 1 ".repeat(20), 40.0, 140.0, 200.0)
            .unwrap();
        assert_eq!(empty, 29.0);
        assert_eq!(long, 29.0);
    }

    #[test]
    fn test_long_field_value_is_truncated() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        canvas
            .field(1, "Adresse", &"Storgata 1 ".repeat(20), 40.0, 100.0, 120.0)
            .unwrap();
        let value = texts(&canvas, 1).pop().unwrap();
        assert!(value.ends_with('…'));
    }

    #[test]
    fn test_multiline_field_grows() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let lines: Vec<String> = (0..8).map(|i| format!("linje {i}")).collect();
        let height = canvas
            .multiline_field(1, "Spesifikasjon", &lines, 40.0, 100.0, 300.0, 40.0)
            .unwrap();
        assert_eq!(height, 11.0 + 8.0 * 12.0 + 8.0);
    }

    #[test]
    fn test_signature_heights_match() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let signatures = [
            Signature::Empty,
            Signature::Text("Jane Doe".to_string()),
            Signature::Image(vec![0, 0, 0]),
        ];

        let heights: Vec<f64> = signatures
            .iter()
            .map(|s| canvas.signature_field(1, "Signatur", s, 40.0, 100.0, 200.0).unwrap())
            .collect();

        assert_eq!(heights, vec![61.0, 61.0, 61.0]);
        assert_eq!(rect_heights(&canvas, 1), vec![50.0, 50.0, 50.0]);
        assert!(texts(&canvas, 1).contains(&"Jane Doe".to_string()));
    }

    #[test]
    fn test_checkbox_checked_draws_mark() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        canvas.checkbox(1, "Sommerdekk", false, 40.0, 100.0).unwrap();
        let unchecked_ops = canvas.document().page_ops(1).len();
        canvas.checkbox(1, "Vinterdekk", true, 140.0, 100.0).unwrap();
        let checked_ops = canvas.document().page_ops(1).len() - unchecked_ops;

        // box + label, then box + two strokes + label
        assert_eq!(unchecked_ops, 2);
        assert_eq!(checked_ops, 4);
    }

    #[test]
    fn test_section_header_returns_next_y() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let next = canvas
            .section_header(1, "Kjøretøy", 40.0, 200.0, 515.28, Color::blue())
            .unwrap();
        assert_eq!(next, 222.0);
        assert_eq!(texts(&canvas, 1), vec!["Kjøretøy"]);
    }

    #[test]
    fn test_watermark_is_idempotent_and_restores_state() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        canvas.doc.set_font(FontWeight::Regular, 10.0);
        canvas.doc.set_text_color(Color::red());

        canvas.watermark(1).unwrap();
        canvas.watermark(1).unwrap();

        assert_eq!(
            texts(&canvas, 1),
            vec![labels::WATERMARK, labels::WATERMARK_SUBTITLE]
        );
        let state = canvas.doc.save_text_state();
        assert_eq!(state.size, 10.0);
        assert_eq!(state.color, Color::red());
        assert!(canvas.is_watermarked(1));
    }

    #[test]
    fn test_page_number_badge() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        canvas.page_number_badge(1, 1, 3, Some("Bilsenter AS")).unwrap();

        let ops = canvas.document().page_ops(1);
        assert!(matches!(ops[0], DrawOp::Circle { radius, .. } if radius == 11.0));
        assert_eq!(texts(&canvas, 1), vec!["1/3", "Bilsenter AS"]);
    }

    #[test]
    fn test_company_header_variants() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let branding = Branding {
            company_name: "Bilsenter AS".to_string(),
            address: "Storgata 1, 0155 Oslo".to_string(),
            email: "post@bilsenter.no".to_string(),
            phone: String::new(),
            logo: None,
            header_text: None,
            color: DEFAULT_COLOR,
        };

        assert_eq!(canvas.company_header(1, &branding, false).unwrap(), 110.0);
        assert_eq!(canvas.company_header(1, &branding, true).unwrap(), 88.0);
        assert_eq!(
            texts(&canvas, 1),
            vec![
                "Bilsenter AS",
                "Storgata 1, 0155 Oslo",
                "post@bilsenter.no",
                "Bilsenter AS",
                "Storgata 1, 0155 Oslo",
                "post@bilsenter.no",
            ]
        );
    }

    #[test]
    fn test_company_header_skips_broken_logo() {
        let style = ContractStyle::default();
        let mut canvas = canvas(&style);
        let branding = Branding {
            company_name: "Bilsenter AS".to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            logo: Some(vec![1, 2, 3]),
            header_text: None,
            color: DEFAULT_COLOR,
        };

        canvas.company_header(1, &branding, false).unwrap();
        assert!(!canvas.document().page_ops(1).iter().any(DrawOp::is_image));
    }
}
