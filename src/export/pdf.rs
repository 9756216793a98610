//! PDF rendering (printpdf backend).
//!
//! The output is a pure function of the report: document dates are
//! pinned and the document id is a hash of the report content, so equal
//! reports produce byte-identical files.

use printpdf::image_crate::GenericImageView;
use printpdf::*;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use inspect_report_common::layout::{build_field_lines, photo_caption, pt_to_mm, PdfLayout};
use inspect_report_common::{
    Error as FormError, GeneratedPdf, InspectionReport, PhotoEntry, ReportRenderer, Result,
    REPORT_TITLE,
};

const PHOTO_DPI: f32 = 300.0;

/// printpdf-backed [`ReportRenderer`].
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    layout: PdfLayout,
    max_photo_px: u32,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self {
            layout: PdfLayout::a4(),
            max_photo_px: 1400,
        }
    }

    pub fn with_max_photo_px(mut self, max_photo_px: u32) -> Self {
        self.max_photo_px = max_photo_px.max(1);
        self
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, report: &InspectionReport) -> Result<GeneratedPdf> {
        let bytes = render_report(report, &self.layout, self.max_photo_px)?;
        Ok(GeneratedPdf::new(bytes))
    }
}

fn render_report(report: &InspectionReport, layout: &PdfLayout, max_photo_px: u32) -> Result<Vec<u8>> {
    let page_width = Mm(pt_to_mm(layout.page_width_pt));
    let page_height = Mm(pt_to_mm(layout.page_height_pt));

    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, page_width, page_height, "Capa 1");
    let doc = doc
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH)
        .with_document_id(document_id(report));

    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // baseline cursor, measured in pt from the page top
    let mut cursor_pt = layout.margin_pt + layout.title_size_pt;

    layer.use_text(
        REPORT_TITLE,
        layout.title_size_pt,
        Mm(pt_to_mm(layout.margin_pt)),
        baseline(layout, cursor_pt),
        &title_font,
    );
    cursor_pt += layout.line_height_pt;

    for line in build_field_lines(&report.fields) {
        cursor_pt = ensure_room(&doc, layout, &mut layer, cursor_pt, layout.line_height_pt);
        layer.use_text(
            line.text(),
            layout.body_size_pt,
            Mm(pt_to_mm(layout.margin_pt)),
            baseline(layout, cursor_pt),
            &body_font,
        );
        cursor_pt += layout.line_height_pt;
    }

    for (index, photo) in report.photos.iter().enumerate() {
        cursor_pt = ensure_room(
            &doc,
            layout,
            &mut layer,
            cursor_pt,
            layout.photo_block_height_pt(),
        );

        layer.use_text(
            photo_caption(index, &photo.description),
            layout.body_size_pt,
            Mm(pt_to_mm(layout.margin_pt)),
            baseline(layout, cursor_pt),
            &body_font,
        );
        cursor_pt += layout.line_height_pt + layout.photo_margin_pt;

        place_photo(&layer, layout, photo, max_photo_px, cursor_pt)?;
        cursor_pt += layout.photo_height_pt + layout.photo_margin_pt;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Start a fresh page when the next block would cross the bottom
/// margin; returns the cursor to draw at.
fn ensure_room(
    doc: &PdfDocumentReference,
    layout: &PdfLayout,
    layer: &mut PdfLayerReference,
    cursor_pt: f32,
    needed_pt: f32,
) -> f32 {
    if cursor_pt + needed_pt <= layout.content_bottom_pt() {
        return cursor_pt;
    }

    let (page, new_layer) = doc.add_page(
        Mm(pt_to_mm(layout.page_width_pt)),
        Mm(pt_to_mm(layout.page_height_pt)),
        "Capa 1",
    );
    *layer = doc.get_page(page).get_layer(new_layer);
    layout.margin_pt + layout.line_height_pt
}

/// Embed one photo, scaled to the fixed photo box. `cursor_pt` is the
/// top edge of the box.
fn place_photo(
    layer: &PdfLayerReference,
    layout: &PdfLayout,
    photo: &PhotoEntry,
    max_photo_px: u32,
    cursor_pt: f32,
) -> Result<()> {
    let decoded = image_crate::load_from_memory(&photo.image.bytes)
        .map_err(|e| FormError::Image(e.to_string()))?;
    let decoded = if decoded.width().max(decoded.height()) > max_photo_px {
        decoded.thumbnail(max_photo_px, max_photo_px)
    } else {
        decoded
    };

    // strip any alpha channel; the embedded stream is plain RGB
    let rgb = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let natural_w_mm = rgb.width() as f32 * 25.4 / PHOTO_DPI;
    let natural_h_mm = rgb.height() as f32 * 25.4 / PHOTO_DPI;

    let image = Image::from_dynamic_image(&rgb);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(pt_to_mm(layout.margin_pt))),
            translate_y: Some(Mm(pt_to_mm(
                layout.page_height_pt - cursor_pt - layout.photo_height_pt,
            ))),
            scale_x: Some(pt_to_mm(layout.photo_width_pt) / natural_w_mm),
            scale_y: Some(pt_to_mm(layout.photo_height_pt) / natural_h_mm),
            dpi: Some(PHOTO_DPI),
            ..Default::default()
        },
    );

    Ok(())
}

fn baseline(layout: &PdfLayout, cursor_pt: f32) -> Mm {
    Mm(pt_to_mm(layout.page_height_pt - cursor_pt))
}

fn document_id(report: &InspectionReport) -> String {
    let payload = serde_json::to_vec(report).unwrap_or_default();
    hex::encode(Sha256::digest(payload))
}

fn pdf_error(error: impl std::fmt::Debug) -> FormError {
    FormError::Render(format!("{:?}", error))
}
