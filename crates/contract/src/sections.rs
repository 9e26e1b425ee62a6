//! Template sections in document order
//!
//! Each composer receives the cursor where its section starts and returns
//! the cursor below the last thing it drew. Page breaks happen through
//! [`Layout::ensure_space`] before a field or box. Only free text longer than
//! a whole page goes on in a second box on the next page.

use crate::labels;
use crate::model::{Contract, Party, Signing};
use crate::painter::{Canvas, TextStyle};
use crate::pagination::{Cursor, Paginator};
use crate::style::ContractStyle;
use crate::Result;
use pdf_core::{Align, FontWeight};

/// Disclaimer lines kept together with their heading
const LEAD_LINES: usize = 3;

/// Gap between the place and date boxes of one party
const SIGNING_INNER_GAP: f64 = 10.0;

/// A section composer
pub type Section = fn(&mut Layout<'_>, &Contract, Cursor) -> Result<Cursor>;

/// All sections with their names, in template order
pub const SECTIONS: [(&str, Section); 7] = [
    ("title", title_block),
    ("person", person_info),
    ("vehicle", vehicle_info),
    ("equipment", equipment),
    ("comments", comments),
    ("signatures", signatures),
    ("disclaimer", disclaimer),
];

/// Canvas and paginator shared by the composers
pub struct Layout<'a> {
    pub canvas: Canvas<'a>,
    pub paginator: Paginator<'a>,
}

impl<'a> Layout<'a> {
    pub fn new(canvas: Canvas<'a>, paginator: Paginator<'a>) -> Self {
        Self { canvas, paginator }
    }

    pub fn style(&self) -> &'a ContractStyle {
        self.canvas.style()
    }

    /// See [`Paginator::ensure_space`]
    pub fn ensure_space(
        &mut self,
        cursor: Cursor,
        required: f64,
        continuation: Option<&str>,
    ) -> Result<Cursor> {
        self.paginator
            .ensure_space(&mut self.canvas, cursor, required, continuation)
    }
}

/// What sits directly above a flowing text box
#[derive(Debug, Clone, Copy)]
enum BoxHeading<'s> {
    /// Full-width section header
    Section(&'s str),
    /// Field label
    Label(&'s str),
}

/// Full-width text box that continues on following pages when it runs out
/// of room
///
/// The box and its heading move to a new page together whenever the whole
/// box does not fit below the cursor. Only text too long for a whole page
/// goes on from there, and each later part gets a "(fortsatt)" header.
fn flowing_box(
    layout: &mut Layout<'_>,
    cursor: Cursor,
    heading: BoxHeading<'_>,
    lines: &[String],
    min_height: f64,
    continuation: &str,
) -> Result<Cursor> {
    let style = layout.style();
    let heading_height = match heading {
        BoxHeading::Section(_) => style.section_header_height(),
        BoxHeading::Label(_) => style.label_height,
    };

    let whole = heading_height + style.box_height(lines.len(), min_height);
    let mut cursor = layout.ensure_space(cursor, whole, None)?;

    cursor.y = match heading {
        BoxHeading::Section(title) => layout.canvas.full_width_header(cursor.page, title, cursor.y)?,
        BoxHeading::Label(label) => {
            layout
                .canvas
                .field_label(cursor.page, label, style.margin_x, cursor.y)?;
            cursor.y + style.label_height
        }
    };

    let mut rest = lines;
    loop {
        let available = layout.paginator.remaining(&layout.canvas, cursor);
        let capacity = style.lines_fitting(available).max(1);
        let (chunk, tail) = rest.split_at(rest.len().min(capacity));

        let height = layout.canvas.text_box(
            cursor.page,
            chunk,
            style.margin_x,
            cursor.y,
            style.content_width(),
            min_height,
        )?;
        cursor = cursor.advance(height);

        if tail.is_empty() {
            return Ok(cursor);
        }
        rest = tail;
        cursor = layout
            .paginator
            .break_page(&mut layout.canvas, cursor, Some(continuation))?;
    }
}

/// One row of the two-column grid
fn two_column_row(
    layout: &mut Layout<'_>,
    cursor: Cursor,
    left: (&str, &str),
    right: (&str, &str),
    continuation: &str,
) -> Result<Cursor> {
    let style = layout.style();
    let cursor = layout.ensure_space(cursor, style.plain_field_height(), Some(continuation))?;
    let width = style.column_width();

    layout
        .canvas
        .field(cursor.page, left.0, left.1, style.margin_x, cursor.y, width)?;
    let height = layout
        .canvas
        .field(cursor.page, right.0, right.1, style.right_column_x(), cursor.y, width)?;

    Ok(cursor.advance(height + style.row_gap))
}

/// Title with a rule below it; branding may replace the text
pub fn title_block(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let title = contract
        .branding
        .as_ref()
        .and_then(|b| b.header_text.as_deref())
        .unwrap_or(labels::TITLE)
        .to_uppercase();

    let accent = layout.canvas.accent();
    let text = TextStyle::new(style.title_size, FontWeight::Bold, accent).aligned(Align::Center);
    let size = style.title_size as f64;
    let lines = layout.canvas.draw_text(
        cursor.page,
        &title,
        style.page_width / 2.0,
        cursor.y + size,
        text,
        Some(style.content_width()),
    )?;

    let last_baseline = cursor.y + size + (lines - 1) as f64 * style.line_height(style.title_size);
    let rule_y = last_baseline + 10.0;
    layout.canvas.rule(cursor.page, rule_y, accent, 1.5)?;

    Ok(Cursor::new(cursor.page, rule_y + 16.0))
}

/// Seller and buyer side by side
pub fn person_info(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let mut cursor = layout.ensure_space(
        cursor,
        style.section_header_height() + style.plain_field_height(),
        None,
    )?;

    let accent = layout.canvas.accent();
    let width = style.column_width();
    layout
        .canvas
        .section_header(cursor.page, labels::SELLER, style.margin_x, cursor.y, width, accent)?;
    cursor.y = layout.canvas.section_header(
        cursor.page,
        labels::BUYER,
        style.right_column_x(),
        cursor.y,
        width,
        accent,
    )?;

    let (seller, buyer): (&Party, &Party) = (&contract.seller, &contract.buyer);
    let rows = [
        (labels::FIRST_NAME, seller.first_name.as_str(), buyer.first_name.as_str()),
        (labels::LAST_NAME, seller.last_name.as_str(), buyer.last_name.as_str()),
        (labels::ADDRESS, seller.address.as_str(), buyer.address.as_str()),
        (labels::POSTAL_CODE, seller.postal_code.as_str(), buyer.postal_code.as_str()),
        (labels::CITY, seller.city.as_str(), buyer.city.as_str()),
        (labels::ID_NUMBER, seller.id_number.as_str(), buyer.id_number.as_str()),
        (labels::PHONE, seller.phone.as_str(), buyer.phone.as_str()),
    ];

    for (label, seller_value, buyer_value) in rows {
        cursor = two_column_row(
            layout,
            cursor,
            (label, seller_value),
            (label, buyer_value),
            labels::PARTIES,
        )?;
    }

    Ok(cursor)
}

/// Vehicle grid, plus the fee amount when given
pub fn vehicle_info(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let mut cursor = layout.ensure_space(
        cursor,
        style.section_header_height() + style.plain_field_height(),
        None,
    )?;
    cursor.y = layout
        .canvas
        .full_width_header(cursor.page, labels::VEHICLE, cursor.y)?;

    let vehicle = &contract.vehicle;
    let rows = [
        (
            (labels::REGISTRATION, vehicle.registration.as_str()),
            (labels::MAKE, vehicle.make.as_str()),
        ),
        (
            (labels::MODEL, vehicle.model.as_str()),
            (labels::MODEL_YEAR, vehicle.model_year.as_str()),
        ),
        (
            (labels::ODOMETER, vehicle.odometer.as_str()),
            (labels::LAST_INSPECTION, vehicle.last_inspection.as_str()),
        ),
        (
            (labels::PRICE, vehicle.price.as_str()),
            (labels::PAYMENT_METHOD, vehicle.payment_method.as_str()),
        ),
        (
            (labels::SELLER_ACCOUNT, vehicle.seller_account.as_str()),
            (labels::FEE_PAYER, vehicle.fee_payer.label()),
        ),
    ];

    for (left, right) in rows {
        cursor = two_column_row(layout, cursor, left, right, labels::VEHICLE)?;
    }

    if !vehicle.fee_amount.is_empty() {
        cursor = layout.ensure_space(cursor, style.plain_field_height(), Some(labels::VEHICLE))?;
        let height = layout.canvas.field(
            cursor.page,
            labels::FEE_AMOUNT,
            &vehicle.fee_amount,
            style.margin_x,
            cursor.y,
            style.content_width(),
        )?;
        cursor = cursor.advance(height + style.row_gap);
    }

    Ok(cursor)
}

/// Equipment checkboxes, specification box and disclosure answers
pub fn equipment(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let mut cursor = layout.ensure_space(
        cursor,
        style.section_header_height() + style.checkbox_row_height,
        None,
    )?;
    cursor.y = layout
        .canvas
        .full_width_header(cursor.page, labels::EQUIPMENT, cursor.y)?;

    let items = &contract.equipment;
    let boxes = [
        (labels::SUMMER_TIRES, items.summer_tires),
        (labels::WINTER_TIRES, items.winter_tires),
        (labels::OTHER_EQUIPMENT, items.other),
    ];
    let spacing = style.content_width() / boxes.len() as f64;
    for (i, (label, checked)) in boxes.into_iter().enumerate() {
        let x = style.margin_x + i as f64 * spacing;
        layout.canvas.checkbox(cursor.page, label, checked, x, cursor.y)?;
    }
    cursor = cursor.advance(style.checkbox_row_height + style.row_gap);

    if items.any_checked() {
        let lines = layout
            .canvas
            .wrap_value(&items.specification, style.content_width());
        cursor = flowing_box(
            layout,
            cursor,
            BoxHeading::Label(labels::EQUIPMENT_SPECIFICATION),
            &lines,
            style.equipment_min_height,
            labels::EQUIPMENT,
        )?;
        cursor = cursor.advance(style.row_gap);
    }

    let answered: Vec<(&str, &str)> = [
        (labels::ENCUMBRANCES, contract.encumbrances),
        (labels::TEST_DRIVEN, contract.test_driven),
    ]
    .into_iter()
    .filter_map(|(label, answer)| answer.label().map(|value| (label, value)))
    .collect();

    if !answered.is_empty() {
        cursor = layout.ensure_space(cursor, style.plain_field_height(), Some(labels::EQUIPMENT))?;
        let columns = [style.margin_x, style.right_column_x()];
        let mut height = 0.0;
        for ((label, value), x) in answered.into_iter().zip(columns) {
            height = layout
                .canvas
                .field(cursor.page, label, value, x, cursor.y, style.column_width())?;
        }
        cursor = cursor.advance(height + style.row_gap);
    }

    Ok(cursor)
}

/// Free-text comments and terms
pub fn comments(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let lines = layout
        .canvas
        .wrap_value(&contract.comments, style.content_width());
    let cursor = flowing_box(
        layout,
        cursor,
        BoxHeading::Section(labels::COMMENTS),
        &lines,
        style.comments_min_height,
        labels::COMMENTS,
    )?;
    Ok(cursor.advance(style.row_gap))
}

/// Place/date and signature per party; the block is kept on one page
pub fn signatures(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    let style = layout.style();
    let block = style.section_header_height()
        + style.plain_field_height()
        + style.row_gap
        + style.signature_field_height();
    let mut cursor = layout.ensure_space(cursor, block, None)?;
    cursor.y = layout
        .canvas
        .full_width_header(cursor.page, labels::SIGNATURES, cursor.y)?;

    let width = style.column_width();
    let half = (width - SIGNING_INNER_GAP) / 2.0;
    let parties: [(f64, &Signing, &str); 2] = [
        (style.margin_x, &contract.seller_signing, labels::SELLER_SIGNATURE),
        (style.right_column_x(), &contract.buyer_signing, labels::BUYER_SIGNATURE),
    ];

    for (x, signing, _) in parties {
        layout
            .canvas
            .field(cursor.page, labels::PLACE, &signing.place, x, cursor.y, half)?;
        layout.canvas.field(
            cursor.page,
            labels::DATE,
            &signing.date,
            x + half + SIGNING_INNER_GAP,
            cursor.y,
            half,
        )?;
    }
    cursor = cursor.advance(style.plain_field_height() + style.row_gap);

    for (x, signing, label) in parties {
        layout
            .canvas
            .signature_field(cursor.page, label, &signing.signature, x, cursor.y, width)?;
    }

    Ok(cursor.advance(style.signature_field_height() + style.row_gap))
}

/// Legal disclaimer paragraph, when requested
pub fn disclaimer(layout: &mut Layout<'_>, contract: &Contract, cursor: Cursor) -> Result<Cursor> {
    if !contract.include_disclaimer {
        return Ok(cursor);
    }

    let style = layout.style();
    let size = style.disclaimer_size;
    let line_height = style.line_height(size);
    let lines = layout.canvas.wrap(
        labels::DISCLAIMER_TEXT,
        size,
        FontWeight::Regular,
        style.content_width(),
    );

    let lead = style.section_header_height()
        + line_height * lines.len().min(LEAD_LINES) as f64;
    let mut cursor = layout.ensure_space(cursor, lead, None)?;
    cursor.y = layout
        .canvas
        .full_width_header(cursor.page, labels::DISCLAIMER, cursor.y)?;

    let text = TextStyle::new(size, FontWeight::Regular, style.label_color);
    for line in &lines {
        cursor = layout.ensure_space(cursor, line_height, Some(labels::DISCLAIMER))?;
        layout.canvas.draw_text(
            cursor.page,
            line,
            style.margin_x,
            cursor.y + size as f64,
            text,
            None,
        )?;
        cursor = cursor.advance(line_height);
    }

    Ok(cursor)
}
