//! Layout configuration

use pdf_core::{Color, A4_HEIGHT, A4_WIDTH};

/// Immutable layout configuration for one document
///
/// All lengths are in points with the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractStyle {
    pub page_width: f64,
    pub page_height: f64,
    /// Left and right content margin
    pub margin_x: f64,
    /// Content start on pages without a company header
    pub top_margin: f64,
    /// Content must end above `page_height - bottom_margin`
    pub bottom_margin: f64,
    /// Inset of the page border rectangle
    pub border_inset: f64,
    pub column_gap: f64,
    pub row_gap: f64,

    pub title_size: f32,
    pub section_header_size: f32,
    pub label_size: f32,
    pub value_size: f32,
    pub disclaimer_size: f32,
    /// Baseline distance as a multiple of the font size
    pub line_spacing: f64,

    /// Space taken by a field label above its box
    pub label_height: f64,
    pub field_box_height: f64,
    pub signature_box_height: f64,
    pub box_padding: f64,
    pub comments_min_height: f64,
    pub equipment_min_height: f64,
    pub checkbox_size: f64,
    pub checkbox_row_height: f64,

    /// Top of the company header block
    pub header_top: f64,
    pub logo_width: f64,
    pub logo_height: f64,
    pub compact_logo_width: f64,
    pub compact_logo_height: f64,

    pub badge_radius: f64,
    /// Distance from the page bottom to the badge center
    pub badge_offset: f64,

    pub watermark_size: f32,
    pub watermark_subtitle_size: f32,
    pub watermark_angle: f64,

    pub text_color: Color,
    pub label_color: Color,
    pub box_fill: Color,
    pub box_stroke: Color,
    pub border_color: Color,
    pub watermark_color: Color,
}

impl Default for ContractStyle {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_x: 40.0,
            top_margin: 40.0,
            bottom_margin: 60.0,
            border_inset: 20.0,
            column_gap: 20.0,
            row_gap: 4.0,

            title_size: 18.0,
            section_header_size: 12.0,
            label_size: 8.0,
            value_size: 10.0,
            disclaimer_size: 8.0,
            line_spacing: 1.2,

            label_height: 11.0,
            field_box_height: 18.0,
            signature_box_height: 50.0,
            box_padding: 4.0,
            comments_min_height: 60.0,
            equipment_min_height: 40.0,
            checkbox_size: 10.0,
            checkbox_row_height: 16.0,

            header_top: 40.0,
            logo_width: 120.0,
            logo_height: 50.0,
            compact_logo_width: 80.0,
            compact_logo_height: 32.0,

            badge_radius: 11.0,
            badge_offset: 36.0,

            watermark_size: 54.0,
            watermark_subtitle_size: 24.0,
            watermark_angle: 45.0,

            text_color: Color::black(),
            label_color: Color::gray(0.4),
            box_fill: Color::gray(0.97),
            box_stroke: Color::gray(0.6),
            border_color: Color::gray(0.75),
            watermark_color: Color::gray(0.85),
        }
    }
}

impl ContractStyle {
    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin_x
    }

    /// Width of one column in the two-column grid
    pub fn column_width(&self) -> f64 {
        (self.content_width() - self.column_gap) / 2.0
    }

    /// X of the right column
    pub fn right_column_x(&self) -> f64 {
        self.margin_x + self.column_width() + self.column_gap
    }

    /// Lowest y content may reach
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// Baseline distance for a font size
    pub fn line_height(&self, size: f32) -> f64 {
        size as f64 * self.line_spacing
    }

    /// Height of a section header including the gap below it
    pub fn section_header_height(&self) -> f64 {
        self.section_header_size as f64 + 10.0
    }

    /// Height of a label plus a single-line box
    pub fn plain_field_height(&self) -> f64 {
        self.label_height + self.field_box_height
    }

    /// Height of a label plus a signature box
    pub fn signature_field_height(&self) -> f64 {
        self.label_height + self.signature_box_height
    }

    /// Height of a text box holding `lines` value lines
    pub fn box_height(&self, lines: usize, min_height: f64) -> f64 {
        let content = lines as f64 * self.line_height(self.value_size) + 2.0 * self.box_padding;
        content.max(min_height).max(self.field_box_height)
    }

    /// How many value lines fit into a box of at most `available` height
    pub fn lines_fitting(&self, available: f64) -> usize {
        let usable = available - 2.0 * self.box_padding;
        if usable <= 0.0 {
            return 0;
        }
        (usable / self.line_height(self.value_size)).floor() as usize
    }

    /// Where content starts below the company header
    pub fn header_bottom(&self, continuation: bool) -> f64 {
        if continuation {
            self.header_top + self.compact_logo_height + 16.0
        } else {
            self.header_top + self.logo_height + 20.0
        }
    }
}
