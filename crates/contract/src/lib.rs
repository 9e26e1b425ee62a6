//! Contract - used-car purchase contract compositor
//!
//! This crate provides:
//! - The contract record as filled in by the form (`ContractRecord`)
//! - Normalization into a render-ready model (`Contract`)
//! - Branding color resolution
//! - Drawing primitives, pagination and the seven template sections
//! - Document assembly with page numbering and preview watermarks
//! - Output filename policy
//!
//! # Example
//!
//! ```ignore
//! use contract::{generate_contract, ContractRecord, RenderMode};
//!
//! let record = ContractRecord::from_json(json)?;
//! let generated = generate_contract(&record, RenderMode::Normal)?;
//! std::fs::write(&generated.filename, &generated.bytes)?;
//! ```

mod assembler;
mod color;
mod filename;
pub mod labels;
mod model;
mod painter;
mod pagination;
mod record;
mod sections;
mod style;

pub use assembler::Assembler;
pub use color::{resolve_color, Rgb, DEFAULT_COLOR};
pub use filename::{
    is_demo_identity, resolve_filename, DEFAULT_FILENAME, DEMO_FILENAME, PREVIEW_FILENAME,
};
pub use model::{Branding, Contract, Equipment, Party, Signature, Signing, Vehicle};
pub use painter::{Canvas, TextStyle};
pub use pagination::{Cursor, PaginationState, Paginator};
pub use record::{ContractRecord, Disclosure, FeePayer};
pub use sections::{Layout, Section, SECTIONS};
pub use style::ContractStyle;

use pdf_core::PdfDocument;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while producing a contract
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, ContractError>;

/// Rendering mode of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Final contract
    #[default]
    Normal,
    /// Watermarked preview with a fixed filename
    Preview,
}

/// A finished contract ready to be saved or downloaded
#[derive(Debug, Clone)]
pub struct GeneratedContract {
    /// Suggested download filename
    pub filename: String,
    /// PDF bytes
    pub bytes: Vec<u8>,
    /// Number of pages in the document
    pub page_count: usize,
}

/// Generate a contract with the default A4 style
pub fn generate_contract(record: &ContractRecord, mode: RenderMode) -> Result<GeneratedContract> {
    generate_contract_with_style(record, mode, &ContractStyle::default())
}

/// Generate a contract with a custom style
pub fn generate_contract_with_style(
    record: &ContractRecord,
    mode: RenderMode,
    style: &ContractStyle,
) -> Result<GeneratedContract> {
    let doc = compose_contract(record, mode, style)?;
    let page_count = doc.page_count();
    let bytes = doc.to_bytes()?;

    Ok(GeneratedContract {
        filename: resolve_filename(record, mode),
        bytes,
        page_count,
    })
}

/// Lay out a contract without serializing it
///
/// The returned document still holds its per-page drawing operations, which
/// makes it the entry point for layout inspection.
pub fn compose_contract(
    record: &ContractRecord,
    mode: RenderMode,
    style: &ContractStyle,
) -> Result<PdfDocument> {
    let contract = Contract::from_record(record);
    Assembler::new(style, mode).assemble(&contract)
}
