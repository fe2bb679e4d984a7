//! Low-level PDF table rendering shared by the report builders.
//!
//! Every report is an A4 document with a fixed header (brand name, optional
//! logo, issue timestamp, reporting period), a column-headed table that
//! paginates when it runs out of room, and a bold totals block at the end.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, image_crate,
};
use time::{OffsetDateTime, macros::format_description};

use crate::{Error, branding::Logo, html::BRAND_NAME};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const RIGHT_EDGE_MM: f32 = PAGE_WIDTH_MM - MARGIN_MM;
const ROW_HEIGHT_MM: f32 = 6.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;

/// Logos wider than this are scaled down, preserving aspect ratio. Smaller
/// logos keep their natural size.
const LOGO_MAX_WIDTH_MM: f32 = 40.0;
const LOGO_DPI: f32 = 300.0;

/// The header fields shared by every report kind.
pub struct ReportMeta {
    /// The report title, e.g. "Cash Movements".
    pub title: String,
    /// The reporting period, e.g. "March 2025".
    pub period_label: String,
    /// When the report was generated, in the configured timezone.
    pub issued_at: OffsetDateTime,
    /// The uploaded logo, if one has been set.
    pub logo: Option<Logo>,
}

/// A table column: its heading and its left edge in millimetres.
pub struct Column {
    pub heading: &'static str,
    pub x_mm: f32,
}

/// An A4 document being filled with one table.
pub struct TableDocument {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    columns: &'static [Column],
    y: f32,
}

impl TableDocument {
    /// Start a document with the report header and the column headings.
    pub fn new(meta: &ReportMeta, columns: &'static [Column]) -> Result<Self, Error> {
        let (doc, page, layer) = PdfDocument::new(
            meta.title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let mut document = Self {
            doc,
            layer,
            font,
            font_bold,
            columns,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };
        document.draw_report_header(meta)?;
        document.draw_column_headings();

        Ok(document)
    }

    fn draw_report_header(&mut self, meta: &ReportMeta) -> Result<(), Error> {
        let header_top = self.y - 5.0;
        let mut brand_x = MARGIN_MM;

        if let Some(logo) = &meta.logo {
            self.draw_logo(logo, header_top)?;
            brand_x += LOGO_MAX_WIDTH_MM + 5.0;
        }

        self.layer
            .use_text(BRAND_NAME, 16.0, Mm(brand_x), Mm(header_top), &self.font_bold);

        self.layer.use_text(
            meta.title.as_str(),
            16.0,
            Mm(130.0),
            Mm(header_top),
            &self.font_bold,
        );
        self.layer.use_text(
            meta.period_label.as_str(),
            11.0,
            Mm(130.0),
            Mm(header_top - 7.0),
            &self.font,
        );

        let issued_format =
            format_description!("[day] [month repr:short] [year] [hour]:[minute]");
        let issued_at = meta
            .issued_at
            .format(issued_format)
            .map_err(|error| Error::ReportError(error.to_string()))?;
        self.layer.use_text(
            format!("Issued {issued_at}"),
            9.0,
            Mm(130.0),
            Mm(header_top - 12.0),
            &self.font,
        );

        self.y = header_top - 22.0;
        self.draw_divider();
        self.y -= ROW_HEIGHT_MM;

        Ok(())
    }

    fn draw_logo(&mut self, logo: &Logo, header_top: f32) -> Result<(), Error> {
        let bytes = logo.image_bytes()?;
        let decoded = image_crate::load_from_memory(&bytes)
            .map_err(|error| Error::ReportError(error.to_string()))?;
        // Flatten any alpha channel; transparency renders as black otherwise.
        let decoded = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
        let image = Image::from_dynamic_image(&decoded);

        let native_width_mm = logo.width as f32 * 25.4 / LOGO_DPI;
        let native_height_mm = logo.height as f32 * 25.4 / LOGO_DPI;
        let scale = (LOGO_MAX_WIDTH_MM / native_width_mm).min(1.0);
        let height_mm = native_height_mm * scale;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(header_top - height_mm + 4.0)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(LOGO_DPI),
                ..Default::default()
            },
        );

        Ok(())
    }

    fn draw_column_headings(&mut self) {
        for column in self.columns {
            self.layer
                .use_text(column.heading, 10.0, Mm(column.x_mm), Mm(self.y), &self.font_bold);
        }

        self.y -= 2.5;
        self.draw_divider();
        self.y -= ROW_HEIGHT_MM;
    }

    fn draw_divider(&self) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(self.y)), false),
                (Point::new(Mm(RIGHT_EDGE_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn start_new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM - 5.0;
        self.draw_column_headings();
    }

    fn ensure_room(&mut self) {
        if self.y < BOTTOM_MARGIN_MM {
            self.start_new_page();
        }
    }

    /// Write one table row. Cells beyond the column count are ignored.
    pub fn write_row(&mut self, cells: &[String]) {
        self.ensure_room();

        for (column, cell) in self.columns.iter().zip(cells) {
            self.layer
                .use_text(cell.as_str(), 10.0, Mm(column.x_mm), Mm(self.y), &self.font);
        }

        self.y -= ROW_HEIGHT_MM;
    }

    /// Write the bold totals block: one labelled line per entry.
    pub fn write_totals(&mut self, totals: &[(&str, String)]) {
        self.ensure_room();
        self.y += 2.0;
        self.draw_divider();
        self.y -= ROW_HEIGHT_MM;

        for (label, value) in totals {
            self.ensure_room();
            self.layer.use_text(
                format!("{label}:"),
                11.0,
                Mm(130.0),
                Mm(self.y),
                &self.font_bold,
            );
            self.layer
                .use_text(value.as_str(), 11.0, Mm(165.0), Mm(self.y), &self.font_bold);
            self.y -= ROW_HEIGHT_MM;
        }
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let mut writer = BufWriter::new(Vec::new());
        self.doc.save(&mut writer).map_err(pdf_error)?;

        writer
            .into_inner()
            .map_err(|error| Error::ReportError(error.to_string()))
    }
}

fn pdf_error(error: printpdf::Error) -> Error {
    Error::ReportError(error.to_string())
}

/// Clip a free-text cell so it cannot run into the next column.
pub fn clip_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let clipped: String = text.chars().take(max_chars).collect();
        format!("{clipped}…")
    }
}
