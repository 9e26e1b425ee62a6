//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Building a PDF document page by page
//! - Measuring and placing text in the standard Helvetica family
//! - Drawing rectangles, lines and circles
//! - Inserting images (JPEG, PNG)
//!
//! Drawing calls are buffered per page as [`DrawOp`]s and encoded into
//! content streams when the document is saved, so callers can freely go
//! back to earlier pages (e.g. to stamp page numbers).
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontWeight, PdfDocument};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_blank_page();
//! doc.set_font(FontWeight::Bold, 18.0);
//! doc.insert_text("Kjøpskontrakt", page, 297.64, 60.0, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod image;
mod ops;
mod text;

pub use document::{Color, PdfDocument, TextState};
pub use font::{FontStyle, FontWeight, StandardFont};
pub use crate::image::ImageScaleMode;
pub use ops::{DrawOp, PaintStyle};
pub use text::{generate_text_operators, wrap_to_width, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.28;

/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.89;
