//! Page breaking
//!
//! Composers ask [`Paginator::ensure_space`] for room before emitting a
//! block. When the block does not fit above the bottom limit a new page is
//! opened and decorated (border, company header, preview watermark), and a
//! "(fortsatt)" header is drawn when the caller names its section.

use crate::labels;
use crate::model::Branding;
use crate::painter::Canvas;
use crate::{RenderMode, Result};
use log::debug;

/// Position of the next block: page number and top y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f64,
}

impl Cursor {
    pub fn new(page: usize, y: f64) -> Self {
        Self { page, y }
    }

    /// Same page, `dy` further down
    pub fn advance(self, dy: f64) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }
}

/// Pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// Content is being placed on the current page
    OnPage,
    /// A break was triggered and the next page is being set up
    PageBreakPending,
}

/// Decides when content moves to a new page
pub struct Paginator<'a> {
    branding: Option<&'a Branding>,
    mode: RenderMode,
    state: PaginationState,
    /// Cursor handed out by the last break; a block that does not fit
    /// there will not fit on any page
    fresh_top: Option<Cursor>,
    page_breaks: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(branding: Option<&'a Branding>, mode: RenderMode) -> Self {
        Self {
            branding,
            mode,
            state: PaginationState::OnPage,
            fresh_top: None,
            page_breaks: 0,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Number of breaks performed so far
    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    /// Open and decorate page 1
    ///
    /// # Returns
    /// Cursor at the top of the content area
    pub fn open_first_page(&mut self, canvas: &mut Canvas<'_>) -> Result<Cursor> {
        let page = canvas.add_page();
        let y = self.decorate(canvas, page, false)?;
        if self.mode == RenderMode::Preview {
            canvas.watermark(page)?;
        }
        self.state = PaginationState::OnPage;
        Ok(Cursor::new(page, y))
    }

    /// Border and running header for a page
    fn decorate(&self, canvas: &mut Canvas<'_>, page: usize, continuation: bool) -> Result<f64> {
        canvas.page_border(page)?;
        match self.branding {
            Some(branding) => canvas.company_header(page, branding, continuation),
            None => Ok(canvas.style().top_margin),
        }
    }

    /// Y where content starts on a page opened by a break
    pub fn continuation_top(&self, canvas: &Canvas<'_>) -> f64 {
        let style = canvas.style();
        match self.branding {
            Some(_) => style.header_bottom(true),
            None => style.top_margin,
        }
    }

    /// Height left on the cursor's page
    pub fn remaining(&self, canvas: &Canvas<'_>, cursor: Cursor) -> f64 {
        canvas.style().bottom_limit() - cursor.y
    }

    /// Make sure `required` points fit below the cursor
    ///
    /// # Arguments
    /// * `cursor` - Where the block would start
    /// * `required` - Height of the block
    /// * `continuation` - Section title to repeat with "(fortsatt)" on a new page
    ///
    /// # Returns
    /// The unchanged cursor, or the top of a new page
    pub fn ensure_space(
        &mut self,
        canvas: &mut Canvas<'_>,
        cursor: Cursor,
        required: f64,
        continuation: Option<&str>,
    ) -> Result<Cursor> {
        if cursor.y + required <= canvas.style().bottom_limit() {
            return Ok(cursor);
        }

        if self.fresh_top == Some(cursor) {
            debug!(
                "Block of {required:.1}pt does not fit on a fresh page {}, placing it anyway",
                cursor.page
            );
            return Ok(cursor);
        }

        self.break_page(canvas, cursor, continuation)
    }

    /// Unconditionally continue on a new page
    pub fn break_page(
        &mut self,
        canvas: &mut Canvas<'_>,
        cursor: Cursor,
        continuation: Option<&str>,
    ) -> Result<Cursor> {
        self.state = PaginationState::PageBreakPending;
        debug!(
            "Page break after page {} at y={:.1} (section: {})",
            cursor.page,
            cursor.y,
            continuation.unwrap_or("-")
        );

        let page = canvas.add_page();
        let mut y = self.decorate(canvas, page, true)?;
        if self.mode == RenderMode::Preview {
            canvas.watermark(page)?;
        }
        if let Some(title) = continuation {
            let heading = format!("{title} {}", labels::CONTINUED);
            y = canvas.full_width_header(page, &heading, y)?;
        }

        let top = Cursor::new(page, y);
        self.fresh_top = Some(top);
        self.page_breaks += 1;
        self.state = PaginationState::OnPage;
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use crate::style::ContractStyle;
    use pdf_core::DrawOp;

    fn page_texts(canvas: &Canvas<'_>, page: usize) -> Vec<String> {
        canvas
            .document()
            .page_ops(page)
            .iter()
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_fits_without_break() {
        let style = ContractStyle::default();
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(None, RenderMode::Normal);
        let cursor = paginator.open_first_page(&mut canvas).unwrap();

        let next = paginator
            .ensure_space(&mut canvas, cursor, 100.0, None)
            .unwrap();
        assert_eq!(next, cursor);
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(paginator.state(), PaginationState::OnPage);
    }

    #[test]
    fn test_break_opens_decorated_page() {
        let style = ContractStyle::default();
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(None, RenderMode::Normal);
        paginator.open_first_page(&mut canvas).unwrap();

        let cursor = Cursor::new(1, style.bottom_limit() - 10.0);
        let next = paginator
            .ensure_space(&mut canvas, cursor, 29.0, Some("Kjøretøy"))
            .unwrap();

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(next.page, 2);
        assert_eq!(next.y, style.top_margin + style.section_header_height());
        assert_eq!(paginator.page_breaks(), 1);
        assert!(matches!(
            canvas.document().page_ops(2)[0],
            DrawOp::Rect { .. }
        ));
        assert_eq!(page_texts(&canvas, 2), vec!["Kjøretøy (fortsatt)"]);
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        let style = ContractStyle::default();
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(None, RenderMode::Normal);
        paginator.open_first_page(&mut canvas).unwrap();

        let cursor = Cursor::new(1, style.bottom_limit() - 29.0);
        let next = paginator.ensure_space(&mut canvas, cursor, 29.0, None).unwrap();
        assert_eq!(next, cursor);
    }

    #[test]
    fn test_preview_watermarks_new_pages() {
        let style = ContractStyle::default();
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(None, RenderMode::Preview);
        let cursor = paginator.open_first_page(&mut canvas).unwrap();
        assert!(canvas.is_watermarked(1));

        paginator.break_page(&mut canvas, cursor, None).unwrap();
        assert!(canvas.is_watermarked(2));
        assert!(page_texts(&canvas, 2).contains(&labels::WATERMARK.to_string()));
    }

    #[test]
    fn test_oversized_block_on_fresh_page_does_not_loop() {
        let style = ContractStyle::default();
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(None, RenderMode::Normal);
        let cursor = paginator.open_first_page(&mut canvas).unwrap();

        let fresh = paginator.break_page(&mut canvas, cursor, None).unwrap();
        let again = paginator
            .ensure_space(&mut canvas, fresh, 10_000.0, None)
            .unwrap();

        assert_eq!(again, fresh);
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn test_branded_continuation_uses_compact_header() {
        let style = ContractStyle::default();
        let branding = Branding {
            company_name: "Bilsenter AS".to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            logo: None,
            header_text: None,
            color: DEFAULT_COLOR,
        };
        let mut canvas = Canvas::new(&style, DEFAULT_COLOR.into());
        let mut paginator = Paginator::new(Some(&branding), RenderMode::Normal);

        let first = paginator.open_first_page(&mut canvas).unwrap();
        let second = paginator.break_page(&mut canvas, first, None).unwrap();

        assert_eq!(first.y, style.header_bottom(false));
        assert_eq!(second.y, style.header_bottom(true));
        assert_eq!(paginator.continuation_top(&canvas), second.y);
        assert_eq!(page_texts(&canvas, 2), vec!["Bilsenter AS"]);
    }
}
