//! WASM bindings for the contract generator
//!
//! This crate provides JavaScript-friendly API for:
//! - Generating the purchase contract PDF from the form record
//! - Resolving the download filename
//! - Norwegian value formatting used by the form preview
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { generateContract, contractFilename } from 'contract-wasm';
//!
//! await init();
//!
//! const pdf = generateContract(formValues, false);
//! const blob = new Blob([pdf.bytes], { type: 'application/pdf' });
//! download(blob, pdf.filename);
//! ```

use contract::{ContractRecord, GeneratedContract, RenderMode};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn mode(preview: bool) -> RenderMode {
    if preview {
        RenderMode::Preview
    } else {
        RenderMode::Normal
    }
}

fn record_from_js(record: JsValue) -> Result<ContractRecord, JsValue> {
    Ok(serde_wasm_bindgen::from_value(record)?)
}

/// A generated contract
#[wasm_bindgen]
pub struct GeneratedPdf {
    filename: String,
    bytes: Vec<u8>,
    page_count: usize,
}

#[wasm_bindgen]
impl GeneratedPdf {
    /// Suggested download filename
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// PDF bytes (Uint8Array)
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

impl From<GeneratedContract> for GeneratedPdf {
    fn from(generated: GeneratedContract) -> Self {
        Self {
            filename: generated.filename,
            bytes: generated.bytes,
            page_count: generated.page_count,
        }
    }
}

fn render(record: &ContractRecord, preview: bool) -> Result<GeneratedPdf, JsValue> {
    contract::generate_contract(record, mode(preview))
        .map(GeneratedPdf::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate the contract PDF
///
/// @param record - Form values keyed by field name
/// @param preview - Watermarked preview instead of the final contract
/// @returns GeneratedPdf with filename and bytes
#[wasm_bindgen(js_name = generateContract)]
pub fn generate_contract(record: JsValue, preview: bool) -> Result<GeneratedPdf, JsValue> {
    let record = record_from_js(record)?;
    render(&record, preview)
}

/// Generate the contract PDF from a JSON string
///
/// @param json - Form values as JSON
/// @param preview - Watermarked preview instead of the final contract
#[wasm_bindgen(js_name = generateContractJson)]
pub fn generate_contract_json(json: &str, preview: bool) -> Result<GeneratedPdf, JsValue> {
    let record =
        ContractRecord::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    render(&record, preview)
}

/// Download filename for a record without rendering it
#[wasm_bindgen(js_name = contractFilename)]
pub fn contract_filename(record: JsValue, preview: bool) -> Result<String, JsValue> {
    let record = record_from_js(record)?;
    Ok(contract::resolve_filename(&record, mode(preview)))
}

/// Resolve a branding color the way the PDF will use it
///
/// @param hex - Color such as "#1e3369"; invalid or missing gives the default
/// @returns [r, g, b]
#[wasm_bindgen(js_name = resolveColor)]
pub fn resolve_color(hex: Option<String>) -> js_sys::Array {
    let rgb = contract::resolve_color(hex.as_deref());
    js_sys::Array::of3(
        &JsValue::from(rgb.r),
        &JsValue::from(rgb.g),
        &JsValue::from(rgb.b),
    )
}

/// Norwegian formatting utilities
#[wasm_bindgen]
pub struct NorwegianFormatter;

#[wasm_bindgen]
impl NorwegianFormatter {
    /// Format an amount in kroner
    ///
    /// @param raw - Amount as typed (e.g., "120000")
    /// @returns Grouped amount (e.g., "120 000 kr")
    #[wasm_bindgen(js_name = formatAmount)]
    pub fn format_amount(raw: &str) -> String {
        nb_text::format_amount(raw)
    }

    /// Format an ISO date
    ///
    /// @param raw - Date as "YYYY-MM-DD"
    /// @returns Date as "DD.MM.YYYY", other input unchanged
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(raw: &str) -> String {
        nb_text::format_date(raw)
    }

    /// ASCII slug of a company name
    pub fn slugify(name: &str) -> String {
        nb_text::slugify(name)
    }
}
