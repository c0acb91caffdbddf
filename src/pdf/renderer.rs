use std::io::BufWriter;

use chrono::{NaiveDate, Utc};
use log::warn;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};

use crate::entity::{CrmError, Donor, IncomeTransaction, Organization};
use crate::pdf::{format, PageCursor};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 195.0;

const LOGO_WIDTH: f32 = 50.0;
const LOGO_HEIGHT: f32 = 28.0;
const ORG_BLOCK_X: f32 = 135.0;

const ROW_STEP: f32 = 6.0;
const COL_REFERENCE: f32 = MARGIN_LEFT;
const COL_DATE: f32 = 70.0;
const COL_TYPE: f32 = 110.0;
const COL_AMOUNT: f32 = 165.0;

const DISCLAIMER_TAIL: [&str; 4] = [
    "Internal Revenue Code. Contributions are deductible under IRC Section 170. No goods or",
    "services were provided in exchange for these contributions.",
    "",
    "This contribution is tax-deductible to the extent allowed by law.",
];

/// Generated document ready to be delivered: the PDF bytes plus the
/// sanitized filename they should be saved under.
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Lays out donation receipts and contribution statements. Pure given its
/// inputs: organization identity and an optional pre-loaded PNG logo are
/// injected at construction, everything else comes in per call.
pub struct ReceiptRenderer {
    organization: Organization,
    logo: Option<Vec<u8>>,
}

impl ReceiptRenderer {
    pub fn new(organization: Organization, logo: Option<Vec<u8>>) -> Self {
        Self { organization, logo }
    }

    /// Multi-transaction contribution statement: itemized table, paginated,
    /// with a grand total.
    pub fn render_statement(
        &self,
        donor: &Donor,
        transactions: &[IncomeTransaction],
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<RenderedDocument, CrmError> {
        let (doc, page, layer) =
            PdfDocument::new("Contribution Statement", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let mut layer = doc.get_page(page).get_layer(layer);
        let fonts = load_fonts(&doc)?;
        let mut cursor = PageCursor::new();

        self.page_header(&layer, &fonts, &mut cursor);

        text(&layer, &fonts.bold, "CONTRIBUTION STATEMENT", 16.0, 60.0, cursor.at());
        cursor.step(8.0);

        if let Some((start, end)) = range {
            let caption = format!(
                "For the period {} to {}",
                format::format_date(start),
                format::format_date(end)
            );
            text(&layer, &fonts.italic, &caption, 10.0, MARGIN_LEFT, cursor.at());
            cursor.step(7.0);
        }

        self.donor_block(&layer, &fonts, donor, &mut cursor);

        // Table header
        text(&layer, &fonts.bold, "Reference", 10.0, COL_REFERENCE, cursor.at());
        text(&layer, &fonts.bold, "Date", 10.0, COL_DATE, cursor.at());
        text(&layer, &fonts.bold, "Type", 10.0, COL_TYPE, cursor.at());
        text(&layer, &fonts.bold, "Amount", 10.0, COL_AMOUNT, cursor.at());
        cursor.step(2.0);
        rule(&layer, cursor.at());
        cursor.step(5.0);

        for txn in transactions {
            if cursor.needs_break() {
                layer = add_page(&doc);
                cursor.reset();
            }

            text(&layer, &fonts.regular, &txn.reference, 9.0, COL_REFERENCE, cursor.at());
            text(
                &layer,
                &fonts.regular,
                &format::format_date(txn.income_date),
                9.0,
                COL_DATE,
                cursor.at(),
            );
            text(
                &layer,
                &fonts.regular,
                txn.income_type.as_deref().unwrap_or("N/A"),
                9.0,
                COL_TYPE,
                cursor.at(),
            );
            text(
                &layer,
                &fonts.regular,
                &format::format_amount(txn.amount),
                9.0,
                COL_AMOUNT,
                cursor.at(),
            );
            cursor.step(ROW_STEP);
        }

        // The total and disclaimer belong together; move them to a fresh
        // page when the table ended too close to the margin.
        if cursor.at() < 95.0 {
            layer = add_page(&doc);
            cursor.reset();
        }

        cursor.step(3.0);
        rule(&layer, cursor.at());
        cursor.step(8.0);

        let total = format!(
            "TOTAL DONATION AMOUNT:  {}",
            format::format_money(format::total_amount(transactions))
        );
        text(&layer, &fonts.bold, &total, 12.0, 55.0, cursor.at());
        cursor.step(12.0);

        self.disclaimer_block(&layer, &fonts, &mut cursor);
        self.footer(&layer, &fonts);

        let filename = format::statement_filename(donor.name(), range);
        finish(doc, filename)
    }

    /// Single-transaction receipt: label/value block instead of a table.
    /// One page in practice.
    pub fn render_single(
        &self,
        donor: &Donor,
        transaction: &IncomeTransaction,
    ) -> Result<RenderedDocument, CrmError> {
        let (doc, page, layer) =
            PdfDocument::new("Donation Receipt", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = load_fonts(&doc)?;
        let mut cursor = PageCursor::new();

        self.page_header(&layer, &fonts, &mut cursor);

        text(&layer, &fonts.bold, "DONATION RECEIPT", 16.0, 68.0, cursor.at());
        cursor.step(10.0);

        self.donor_block(&layer, &fonts, donor, &mut cursor);

        text(&layer, &fonts.bold, "Donation Details", 10.0, MARGIN_LEFT, cursor.at());
        cursor.step(5.0);
        rule(&layer, cursor.at());
        cursor.step(5.0);

        let date = format::format_date(transaction.income_date);
        let income_type = transaction.income_type.as_deref().unwrap_or("N/A");

        text(
            &layer,
            &fonts.regular,
            &format!("Date Received: {}", date),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(5.0);
        text(
            &layer,
            &fonts.regular,
            &format!("Transaction Reference: {}", transaction.reference),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(5.0);
        text(
            &layer,
            &fonts.regular,
            &format!("Type: {}", income_type),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(5.0);
        text(
            &layer,
            &fonts.bold,
            &format!("Amount: {}", format::format_amount(transaction.amount)),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(10.0);
        rule(&layer, cursor.at());
        cursor.step(10.0);

        text(
            &layer,
            &fonts.italic,
            "Thank you for your generous contribution!",
            10.0,
            65.0,
            cursor.at(),
        );
        cursor.step(10.0);

        self.disclaimer_block(&layer, &fonts, &mut cursor);
        self.footer(&layer, &fonts);

        let filename = format::receipt_filename(donor.name(), transaction.income_date);
        finish(doc, filename)
    }

    // Logo top-left, organization identity to the right. Page 1 only.
    fn page_header(&self, layer: &PdfLayerReference, fonts: &Fonts, cursor: &mut PageCursor) {
        self.draw_logo(layer, cursor.at());

        let mut y = cursor.at() - 8.0;
        text(&layer, &fonts.bold, &self.organization.name, 9.0, ORG_BLOCK_X, y);
        y -= 5.0;
        text(
            &layer,
            &fonts.regular,
            &format!("EIN: {}", self.organization.ein),
            9.0,
            ORG_BLOCK_X,
            y,
        );
        y -= 5.0;
        text(
            &layer,
            &fonts.italic,
            "501(c)(3) Tax-Exempt Organization",
            8.0,
            ORG_BLOCK_X,
            y,
        );
        y -= 5.0;
        text(&layer, &fonts.regular, &self.organization.street, 8.0, ORG_BLOCK_X, y);
        y -= 4.0;
        text(&layer, &fonts.regular, &self.organization.city_line, 8.0, ORG_BLOCK_X, y);

        cursor.step(LOGO_HEIGHT + 7.0);
    }

    fn draw_logo(&self, layer: &PdfLayerReference, y_top: f32) {
        let Some(bytes) = &self.logo else {
            return;
        };

        // A missing or undecodable logo is never fatal; the document just
        // renders without it.
        let decoder = match PngDecoder::new(std::io::Cursor::new(bytes.as_slice())) {
            Ok(decoder) => decoder,
            Err(e) => {
                warn!("Could not decode organization logo: {}", e);
                return;
            }
        };

        match Image::try_from(decoder) {
            Ok(image) => {
                let width_px = image.image.width.0 as f32;
                // Scale so the logo prints LOGO_WIDTH mm wide
                let dpi = width_px * 25.4 / LOGO_WIDTH;
                image.add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(MARGIN_LEFT)),
                        translate_y: Some(Mm(y_top - LOGO_HEIGHT)),
                        dpi: Some(dpi),
                        ..Default::default()
                    },
                );
            }
            Err(e) => warn!("Could not embed organization logo: {}", e),
        }
    }

    // Donor name and mailing address; absent parts leave no blank lines.
    fn donor_block(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        donor: &Donor,
        cursor: &mut PageCursor,
    ) {
        text(&layer, &fonts.bold, "Donor Information:", 9.0, MARGIN_LEFT, cursor.at());
        cursor.step(5.0);

        text(
            &layer,
            &fonts.regular,
            &format!("Name: {}", donor.name()),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(5.0);

        let address = donor.address();
        if let Some(street) = address.street.as_deref().filter(|s| !s.is_empty()) {
            text(
                &layer,
                &fonts.regular,
                &format!("Address: {}", street),
                9.0,
                MARGIN_LEFT,
                cursor.at(),
            );
            cursor.step(5.0);

            if let Some(line) = format::city_line(&address) {
                text(&layer, &fonts.regular, &line, 9.0, MARGIN_LEFT + 14.0, cursor.at());
                cursor.step(5.0);
            }
        }

        let today = format::format_date(Utc::now().date_naive());
        text(
            &layer,
            &fonts.regular,
            &format!("Receipt Date: {}", today),
            9.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(10.0);
    }

    fn disclaimer_block(&self, layer: &PdfLayerReference, fonts: &Fonts, cursor: &mut PageCursor) {
        text(
            &layer,
            &fonts.bold,
            "Tax Deductibility Statement:",
            8.0,
            MARGIN_LEFT,
            cursor.at(),
        );
        cursor.step(5.0);

        let first_line = format!(
            "{} is recognized as tax-exempt under Section 501(c)(3) of the",
            self.organization.name
        );
        text(&layer, &fonts.regular, &first_line, 8.0, MARGIN_LEFT, cursor.at());
        cursor.step(4.0);

        for line in DISCLAIMER_TAIL {
            if !line.is_empty() {
                text(&layer, &fonts.regular, line, 8.0, MARGIN_LEFT, cursor.at());
            }
            cursor.step(4.0);
        }

        cursor.step(10.0);
        text(
            &layer,
            &fonts.italic,
            "This receipt was electronically generated and does not require a signature.",
            8.0,
            50.0,
            cursor.at(),
        );
    }

    // Pinned near the bottom edge of the last page
    fn footer(&self, layer: &PdfLayerReference, fonts: &Fonts) {
        let contact_line = format!(
            "For questions about this receipt, please contact {}.",
            self.organization.name
        );
        text(&layer, &fonts.regular, &contact_line, 7.0, 55.0, 15.0);
        text(
            &layer,
            &fonts.regular,
            "Thank you for your generous support!",
            7.0,
            75.0,
            10.0,
        );
    }
}

fn load_fonts(doc: &PdfDocumentReference) -> Result<Fonts, CrmError> {
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CrmError::Layout(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| CrmError::Layout(e.to_string()))?;
    let italic = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| CrmError::Layout(e.to_string()))?;

    Ok(Fonts {
        regular,
        bold,
        italic,
    })
}

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, s: &str, size: f32, x: f32, y: f32) {
    layer.use_text(s, size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
            (Point::new(Mm(MARGIN_RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn add_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

fn finish(doc: PdfDocumentReference, filename: String) -> Result<RenderedDocument, CrmError> {
    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| CrmError::Layout(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| CrmError::Layout(e.to_string()))?;

    Ok(RenderedDocument { bytes, filename })
}
