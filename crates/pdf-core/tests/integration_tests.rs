//! Integration tests for pdf-core
//!
//! These tests build documents through the public API, save them and read
//! the result back with lopdf.

use image::{ImageBuffer, ImageFormat as EncodeFormat, Rgb};
use lopdf::{Document, Object};
use pdf_core::{Align, Color, FontWeight, PaintStyle, PdfDocument, PdfError};
use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Encode a small solid PNG for testing
fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([30, 51, 105]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), EncodeFormat::Png)
        .unwrap();
    bytes
}

fn sample_document() -> PdfDocument {
    let mut doc = PdfDocument::new();
    let first = doc.add_blank_page();
    doc.set_font(FontWeight::Bold, 18.0);
    doc.insert_text("Kjøpskontrakt", first, 297.64, 80.0, Align::Center)
        .unwrap();
    doc.set_font(FontWeight::Regular, 10.0);
    doc.insert_text("Ærlig og åpen", first, 40.0, 120.0, Align::Left)
        .unwrap();
    doc.set_stroke_color(Color::from_rgb(30, 51, 105));
    doc.draw_rect(first, 20.0, 20.0, 555.28, 801.89, PaintStyle::Stroke)
        .unwrap();

    let second = doc.add_blank_page();
    doc.set_fill_color(Color::from_rgb(30, 51, 105));
    doc.draw_circle(second, 297.64, 811.89, 11.0, PaintStyle::Fill)
        .unwrap();
    doc
}

fn page_resources(doc: &Document, page_number: u32) -> lopdf::Dictionary {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    let page = doc.get_dictionary(page_id).unwrap();
    match page.get(b"Resources").unwrap() {
        Object::Dictionary(dict) => dict.clone(),
        Object::Reference(id) => doc.get_dictionary(*id).unwrap().clone(),
        other => panic!("unexpected resources {other:?}"),
    }
}

#[test]
fn test_saved_document_has_all_pages() {
    let bytes = sample_document().to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[test]
fn test_output_is_deterministic() {
    let first = sample_document().to_bytes().unwrap();
    let second = sample_document().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fonts_registered_per_page() {
    let bytes = sample_document().to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    let resources = page_resources(&loaded, 1);
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    assert!(fonts.has(b"F1"));
    assert!(fonts.has(b"F2"));

    // Second page only draws a shape
    let resources = page_resources(&loaded, 2);
    assert!(!resources.has(b"Font"));
}

#[test]
fn test_image_is_embedded_once() {
    let png = create_test_png(40, 20);
    let mut doc = PdfDocument::new();
    let first = doc.add_blank_page();
    let second = doc.add_blank_page();
    doc.insert_image(&png, first, 40.0, 40.0, 120.0, 50.0).unwrap();
    doc.insert_image(&png, second, 40.0, 40.0, 80.0, 32.0).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    let image_objects = loaded
        .objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count();
    assert_eq!(image_objects, 1);

    for page in [1, 2] {
        let resources = page_resources(&loaded, page);
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        assert!(xobjects.has(b"Im1"));
    }
}

#[test]
fn test_fit_box_keeps_aspect_ratio() {
    let png = create_test_png(200, 100);
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page();
    let (width, height) = doc
        .insert_image_scaled(
            &png,
            page,
            0.0,
            0.0,
            120.0,
            120.0,
            pdf_core::ImageScaleMode::FitBox,
        )
        .unwrap();
    assert_eq!((width, height), (120.0, 60.0));
}

#[test]
fn test_centered_image_is_offset_inside_box() {
    let png = create_test_png(100, 100);
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page();
    doc.insert_image_fit(&png, page, 40.0, 100.0, 200.0, 50.0, Align::Center)
        .unwrap();

    match &doc.page_ops(page)[0] {
        pdf_core::DrawOp::Image {
            x,
            y,
            width,
            height,
            ..
        } => {
            assert_eq!((*width, *height), (50.0, 50.0));
            assert_eq!((*x, *y), (115.0, 100.0));
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn test_right_aligned_image_touches_right_edge() {
    let png = create_test_png(200, 100);
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page();
    doc.insert_image_fit(&png, page, 400.0, 40.0, 120.0, 50.0, Align::Right)
        .unwrap();

    match &doc.page_ops(page)[0] {
        pdf_core::DrawOp::Image { x, width, .. } => {
            assert_eq!(*width, 100.0);
            assert_eq!(x + width, 520.0);
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn test_operations_on_missing_page_fail() {
    let mut doc = PdfDocument::new();
    doc.add_blank_page();
    let result = doc.draw_rect(3, 0.0, 0.0, 1.0, 1.0, PaintStyle::Fill);
    assert!(matches!(result, Err(PdfError::InvalidPage(3, 1))));
}

#[test]
fn test_save_to_file() {
    let path = std::env::temp_dir().join("pdf-core-save-test.pdf");
    sample_document().save(&path).unwrap();
    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
    let _ = std::fs::remove_file(&path);
}
