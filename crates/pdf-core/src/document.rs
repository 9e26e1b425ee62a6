//! PDF Document builder

use crate::image::{
    calculate_scaled_dimensions, deflate, ImageScaleMode, ImageXObject,
};
use crate::ops::{DrawOp, PaintStyle};
use crate::text::{calculate_x_offset, wrap_to_width};
use crate::{Align, FontStyle, FontWeight, PdfError, Result, StandardFont, A4_HEIGHT, A4_WIDTH};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Line height as a multiple of the font size
const LINE_HEIGHT_FACTOR: f64 = 1.15;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Gray level (0.0 black - 1.0 white)
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    /// Blue color
    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Snapshot of the current text settings
///
/// Used to draw overlays without disturbing the caller's font and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextState {
    pub weight: FontWeight,
    pub style: FontStyle,
    pub size: f32,
    pub color: Color,
}

/// One page: its size, recorded operations and used resources
#[derive(Debug, Clone)]
struct PageData {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
    fonts: BTreeSet<StandardFont>,
    images: BTreeSet<usize>,
}

/// PDF Document providing page-level drawing operations
///
/// Coordinates passed to drawing methods are in points with the origin at
/// the top-left corner of the page; they are flipped to PDF space when the
/// document is written.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    /// Pages in order (page number = index + 1)
    pages: Vec<PageData>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font style
    current_style: FontStyle,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Fill color for shapes
    fill_color: Color,
    /// Stroke color for shapes and lines
    stroke_color: Color,
    /// Stroke width in points
    line_width: f64,
    /// Embedded images (index + 1 = resource number)
    images: Vec<ImageXObject>,
    /// Image data hash -> index into `images`
    image_index: HashMap<u64, usize>,
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current_weight: FontWeight::default(),
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            fill_color: Color::white(),
            stroke_color: Color::black(),
            line_width: 1.0,
            images: Vec::new(),
            image_index: HashMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a blank A4 page (595.28 x 841.89 points)
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> usize {
        self.add_page(A4_WIDTH, A4_HEIGHT)
    }

    /// Add a blank page with the given size in points
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self, width: f64, height: f64) -> usize {
        self.pages.push(PageData {
            width,
            height,
            ops: Vec::new(),
            fonts: BTreeSet::new(),
            images: BTreeSet::new(),
        });
        self.pages.len()
    }

    /// Get (width, height) of a page in points
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let data = self.page(page)?;
        Ok((data.width, data.height))
    }

    /// Recorded drawing operations of a page (empty for unknown pages)
    pub fn page_ops(&self, page: usize) -> &[DrawOp] {
        self.page(page).map(|p| p.ops.as_slice()).unwrap_or(&[])
    }

    fn page(&self, page: usize) -> Result<&PageData> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&self.pages[page - 1])
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageData> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&mut self.pages[page - 1])
    }

    /// Set the font weight and size; the style is reset to normal
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font(FontWeight::Bold, 12.0);
    /// doc.set_font_style(FontStyle::Italic);  // Now bold italic 12pt
    /// ```
    pub fn set_font(&mut self, weight: FontWeight, size: f32) {
        self.current_weight = weight;
        self.current_style = FontStyle::Normal;
        self.current_font_size = size;
    }

    /// Set only the font size (keeps current weight/style)
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the font weight (keeps current size/style)
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.current_weight = weight;
    }

    /// Set the font style (keeps current size/weight)
    pub fn set_font_style(&mut self, style: FontStyle) {
        self.current_style = style;
    }

    /// Set the text color
    ///
    /// # Example
    /// ```ignore
    /// doc.set_text_color(Color::from_rgb(30, 51, 105));
    /// ```
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Current font size in points
    pub fn font_size(&self) -> f32 {
        self.current_font_size
    }

    /// Current font variant
    pub fn current_font(&self) -> StandardFont {
        StandardFont::from_variant(self.current_weight, self.current_style)
    }

    /// Capture the current text settings
    pub fn save_text_state(&self) -> TextState {
        TextState {
            weight: self.current_weight,
            style: self.current_style,
            size: self.current_font_size,
            color: self.current_text_color,
        }
    }

    /// Restore text settings captured with `save_text_state`
    pub fn restore_text_state(&mut self, state: TextState) {
        self.current_weight = state.weight;
        self.current_style = state.style;
        self.current_font_size = state.size;
        self.current_text_color = state.color;
    }

    /// Set the fill color for shapes
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Set the stroke color for shapes and lines
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Get current font's text width for a string in points
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font()
            .text_width_points(text, self.current_font_size) as f64
    }

    /// Distance between consecutive baselines for the current font size
    pub fn line_height(&self) -> f64 {
        self.current_font_size as f64 * LINE_HEIGHT_FACTOR
    }

    /// Word-wrap text to a maximum width using the current font
    ///
    /// Always returns at least one (possibly empty) line.
    pub fn split_text_to_size(&self, text: &str, max_width: f64) -> Vec<String> {
        let font = self.current_font();
        let size = self.current_font_size;
        wrap_to_width(text, max_width, |s| font.text_width_points(s, size) as f64)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.page(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let width = self.get_text_width(text);
        let start_x = x + calculate_x_offset(width, 0.0, align);

        self.push_text(page, text, start_x, y, width, 0.0)
    }

    /// Insert text rotated around its own center
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `cx` - X coordinate of the text center
    /// * `cy` - Y coordinate of the baseline center (from top)
    /// * `angle` - Counter-clockwise rotation in degrees
    pub fn insert_text_rotated(
        &mut self,
        text: &str,
        page: usize,
        cx: f64,
        cy: f64,
        angle: f64,
    ) -> Result<()> {
        self.page(page)?;

        if text.is_empty() {
            return Ok(());
        }

        let width = self.get_text_width(text);
        let (sin, cos) = angle.to_radians().sin_cos();
        // Walk back half the width along the baseline; y grows downward here
        let start_x = cx - width / 2.0 * cos;
        let start_y = cy + width / 2.0 * sin;

        self.push_text(page, text, start_x, start_y, width, angle)
    }

    fn push_text(
        &mut self,
        page: usize,
        text: &str,
        x: f64,
        y: f64,
        width: f64,
        angle: f64,
    ) -> Result<()> {
        let font = self.current_font();
        let op = DrawOp::Text {
            text: text.to_string(),
            font,
            size: self.current_font_size,
            x,
            y,
            width,
            color: self.current_text_color,
            angle,
        };

        let data = self.page_mut(page)?;
        data.fonts.insert(font);
        data.ops.push(op);
        Ok(())
    }

    /// Draw a rectangle with the current fill/stroke colors
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x`, `y` - Top-left corner in points
    /// * `width`, `height` - Size in points
    /// * `style` - Stroke, fill or both
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: PaintStyle,
    ) -> Result<()> {
        let op = DrawOp::Rect {
            x,
            y,
            width,
            height,
            style,
            fill: self.fill_color,
            stroke: self.stroke_color,
            line_width: self.line_width,
        };
        self.page_mut(page)?.ops.push(op);
        Ok(())
    }

    /// Draw a straight line with the current stroke color and width
    pub fn draw_line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let op = DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.stroke_color,
            line_width: self.line_width,
        };
        self.page_mut(page)?.ops.push(op);
        Ok(())
    }

    /// Draw a circle with the current fill/stroke colors
    pub fn draw_circle(
        &mut self,
        page: usize,
        cx: f64,
        cy: f64,
        radius: f64,
        style: PaintStyle,
    ) -> Result<()> {
        let op = DrawOp::Circle {
            cx,
            cy,
            radius,
            style,
            fill: self.fill_color,
            stroke: self.stroke_color,
            line_width: self.line_width,
        };
        self.page_mut(page)?.ops.push(op);
        Ok(())
    }

    /// Insert an image at a specific position
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate of the top edge in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)?;
        Ok(())
    }

    /// Insert an image with scaling mode
    ///
    /// # Returns
    /// The (width, height) actually used, in points
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<(f64, f64)> {
        self.page(page)?;

        let (index, orig_width, orig_height) = self.get_or_create_image(data)?;
        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        self.push_image(page, index, x, y, actual_width, actual_height)?;
        Ok((actual_width, actual_height))
    }

    /// Insert an image scaled to fit a box
    ///
    /// The image keeps its aspect ratio, is centered vertically and placed
    /// horizontally inside the box according to `align`.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_fit(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        align: Align,
    ) -> Result<()> {
        self.page(page)?;

        let (index, orig_width, orig_height) = self.get_or_create_image(data)?;
        let (actual_width, actual_height) = calculate_scaled_dimensions(
            orig_width,
            orig_height,
            width,
            height,
            ImageScaleMode::FitBox,
        );
        let offset_x = calculate_x_offset(actual_width, width, align);
        let offset_y = (height - actual_height) / 2.0;

        self.push_image(
            page,
            index,
            x + offset_x,
            y + offset_y,
            actual_width,
            actual_height,
        )
    }

    fn push_image(
        &mut self,
        page: usize,
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let op = DrawOp::Image {
            resource: image_resource_name(index),
            x,
            y,
            width,
            height,
        };
        let data = self.page_mut(page)?;
        data.images.insert(index);
        data.ops.push(op);
        Ok(())
    }

    /// Decode (once per distinct data) and return (index, width, height)
    ///
    /// Images are deduplicated by hash of their data.
    fn get_or_create_image(&mut self, data: &[u8]) -> Result<(usize, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(&index) = self.image_index.get(&data_hash) {
            let image = &self.images[index];
            return Ok((index, image.width, image.height));
        }

        let xobject = ImageXObject::decode(data)?;
        let (width, height) = (xobject.width, xobject.height);
        self.images.push(xobject);
        let index = self.images.len() - 1;
        self.image_index.insert(data_hash, index);

        Ok((index, width, height))
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut doc = self.build_document()?;
        doc.save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.build_document()?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Build the lopdf object graph from the recorded pages
    ///
    /// Resources are written in a fixed order so the same drawing calls
    /// always produce the same bytes.
    fn build_document(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let used_fonts: BTreeSet<StandardFont> = self
            .pages
            .iter()
            .flat_map(|page| page.fonts.iter().copied())
            .collect();
        let font_ids: HashMap<StandardFont, ObjectId> = used_fonts
            .into_iter()
            .map(|font| (font, doc.add_object(font.to_pdf_dictionary())))
            .collect();

        let image_ids: Vec<ObjectId> = self
            .images
            .iter()
            .map(|image| doc.add_object(image.to_pdf_stream()))
            .collect();

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let mut content = Vec::new();
            for op in &page.ops {
                content.extend_from_slice(&op.encode(page.height));
            }
            let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, deflate(&content)?);
            let contents_id = doc.add_object(stream);

            let mut resources = Dictionary::new();
            if !page.fonts.is_empty() {
                let mut font_dict = Dictionary::new();
                for font in &page.fonts {
                    font_dict.set(font.resource_name(), Object::Reference(font_ids[font]));
                }
                resources.set("Font", Object::Dictionary(font_dict));
            }
            if !page.images.is_empty() {
                let mut xobject_dict = Dictionary::new();
                for &index in &page.images {
                    xobject_dict.set(
                        image_resource_name(index).as_str(),
                        Object::Reference(image_ids[index]),
                    );
                }
                resources.set("XObject", Object::Dictionary(xobject_dict));
            }

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(page.width as f32),
                    Object::Real(page.height as f32),
                ],
                "Resources" => resources,
                "Contents" => contents_id,
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource name of an embedded image ("Im1", "Im2", ...)
fn image_resource_name(index: usize) -> String {
    format!("Im{}", index + 1)
}
