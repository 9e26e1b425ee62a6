//! Document assembly
//!
//! Runs the template sections in order on a fresh canvas, then makes a
//! final pass over every page once the total page count is known.

use crate::model::Contract;
use crate::painter::Canvas;
use crate::pagination::Paginator;
use crate::sections::{Layout, SECTIONS};
use crate::style::ContractStyle;
use crate::{RenderMode, Result};
use log::{debug, info};
use pdf_core::PdfDocument;

/// Builds the contract document
pub struct Assembler<'a> {
    style: &'a ContractStyle,
    mode: RenderMode,
}

impl<'a> Assembler<'a> {
    pub fn new(style: &'a ContractStyle, mode: RenderMode) -> Self {
        Self { style, mode }
    }

    /// Lay out every section and decorate the finished pages
    pub fn assemble(&self, contract: &Contract) -> Result<PdfDocument> {
        let canvas = Canvas::new(self.style, contract.accent().into());
        let paginator = Paginator::new(contract.branding.as_ref(), self.mode);
        let mut layout = Layout::new(canvas, paginator);

        let mut cursor = layout.paginator.open_first_page(&mut layout.canvas)?;
        for (name, section) in SECTIONS {
            debug!("Section '{name}' starts on page {} at y={:.1}", cursor.page, cursor.y);
            cursor = section(&mut layout, contract, cursor)?;
        }

        let Layout { mut canvas, paginator } = layout;
        let total = canvas.page_count();
        for page in 1..=total {
            canvas.page_number_badge(page, page, total, contract.footer_name())?;
            if self.mode == RenderMode::Preview {
                canvas.watermark(page)?;
            }
        }

        info!(
            "Assembled contract: {total} page(s), {} break(s), mode {:?}",
            paginator.page_breaks(),
            self.mode
        );
        Ok(canvas.into_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels;
    use pdf_core::DrawOp;
    use pretty_assertions::assert_eq;

    fn texts(doc: &PdfDocument, page: usize) -> Vec<String> {
        doc.page_ops(page)
            .iter()
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_minimal_contract_is_one_page() {
        let style = ContractStyle::default();
        let doc = Assembler::new(&style, RenderMode::Normal)
            .assemble(&Contract::default())
            .unwrap();

        assert_eq!(doc.page_count(), 1);
        let texts = texts(&doc, 1);
        assert!(texts.contains(&"1/1".to_string()));
        assert!(!texts.contains(&labels::WATERMARK.to_string()));
    }

    #[test]
    fn test_every_page_gets_badge_and_single_watermark() {
        let style = ContractStyle::default();
        let contract = Contract {
            comments: "Bilen selges med nye bremseklosser. ".repeat(200),
            include_disclaimer: true,
            ..Default::default()
        };
        let doc = Assembler::new(&style, RenderMode::Preview)
            .assemble(&contract)
            .unwrap();

        let total = doc.page_count();
        assert!(total >= 2);
        for page in 1..=total {
            let texts = texts(&doc, page);
            assert!(texts.contains(&format!("{page}/{total}")));
            assert_eq!(
                texts.iter().filter(|t| *t == labels::WATERMARK).count(),
                1
            );
            assert!(doc
                .page_ops(page)
                .iter()
                .any(|op| matches!(op, DrawOp::Circle { .. })));
        }
    }

    #[test]
    fn test_sections_appear_in_order() {
        let style = ContractStyle::default();
        let contract = Contract {
            include_disclaimer: true,
            ..Default::default()
        };
        let doc = Assembler::new(&style, RenderMode::Normal)
            .assemble(&contract)
            .unwrap();

        let all: Vec<String> = (1..=doc.page_count()).flat_map(|p| texts(&doc, p)).collect();
        let position = |needle: &str| all.iter().position(|t| t == needle).unwrap();

        assert!(position(labels::SELLER) < position(labels::VEHICLE));
        assert!(position(labels::VEHICLE) < position(labels::EQUIPMENT));
        assert!(position(labels::EQUIPMENT) < position(labels::COMMENTS));
        assert!(position(labels::COMMENTS) < position(labels::SIGNATURES));
        assert!(position(labels::SIGNATURES) < position(labels::DISCLAIMER));
    }
}
