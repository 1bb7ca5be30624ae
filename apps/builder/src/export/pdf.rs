//! PDF encoding: wraps the rasterized page into a one-page PDF.
//!
//! The bitmap is embedded scaled to the full A4 page width with proportional
//! height, anchored at the top-left corner. Content taller than the page
//! runs off the bottom, the same way the browser capture did.

use image::{DynamicImage, RgbaImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use crate::errors::AppError;
use crate::render::layout::{A4_HEIGHT_MM, A4_WIDTH_MM};

/// Fixed artifact name for the browser download.
pub const ARTIFACT_FILE_NAME: &str = "resume.pdf";

/// Page configuration handed to the encoder. There is exactly one supported
/// shape; the struct exists so the contract is explicit and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub orientation: Orientation,
    pub unit: Unit,
    pub format: PaperFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Millimeter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    A4,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            orientation: Orientation::Portrait,
            unit: Unit::Millimeter,
            format: PaperFormat::A4,
        }
    }
}

impl PageSpec {
    pub fn width_mm(self) -> f32 {
        match (self.unit, self.format, self.orientation) {
            (Unit::Millimeter, PaperFormat::A4, Orientation::Portrait) => A4_WIDTH_MM,
        }
    }

    pub fn height_mm(self) -> f32 {
        match (self.unit, self.format, self.orientation) {
            (Unit::Millimeter, PaperFormat::A4, Orientation::Portrait) => A4_HEIGHT_MM,
        }
    }
}

/// Embeds the bitmap into a single page and returns the PDF bytes.
pub fn encode_pdf(bitmap: RgbaImage, spec: PageSpec) -> Result<Vec<u8>, AppError> {
    let (px_w, px_h) = (bitmap.width(), bitmap.height());
    if px_w == 0 || px_h == 0 {
        return Err(AppError::Pdf("refusing to embed an empty bitmap".to_string()));
    }

    let (doc, page, layer) = PdfDocument::new(
        "Resume",
        Mm(spec.width_mm()),
        Mm(spec.height_mm()),
        "Layer 1",
    );

    // Pick the DPI that makes the bitmap exactly page-wide; height follows
    // proportionally from the bitmap's aspect ratio.
    let dpi = px_w as f32 * 25.4 / spec.width_mm();
    let image_h_mm = px_h as f32 * 25.4 / dpi;

    // PDF origin is bottom-left; anchor the image's top edge to the page top.
    let translate_y = Mm(spec.height_mm() - image_h_mm);

    let image = Image::from_dynamic_image(&DynamicImage::ImageRgba8(bitmap).to_rgb8().into());
    image.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(translate_y),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::Pdf(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn make_bitmap(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 200, 200, 255]))
    }

    #[test]
    fn test_default_page_spec_is_portrait_mm_a4() {
        let spec = PageSpec::default();
        assert_eq!(spec.orientation, Orientation::Portrait);
        assert_eq!(spec.unit, Unit::Millimeter);
        assert_eq!(spec.format, PaperFormat::A4);
        assert_eq!(spec.width_mm(), 210.0);
        assert_eq!(spec.height_mm(), 297.0);
    }

    #[test]
    fn test_artifact_name_is_fixed() {
        assert_eq!(ARTIFACT_FILE_NAME, "resume.pdf");
    }

    #[test]
    fn test_encode_pdf_produces_pdf_bytes() {
        let bytes = encode_pdf(make_bitmap(124, 175), PageSpec::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF document");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_encode_pdf_rejects_empty_bitmap() {
        let err = encode_pdf(RgbaImage::new(0, 0), PageSpec::default()).unwrap_err();
        assert!(matches!(err, AppError::Pdf(_)));
    }

    #[test]
    fn test_tall_bitmap_still_encodes() {
        // Taller than A4 aspect: height overflows the page but encoding
        // succeeds; the overflow is simply off-page.
        let bytes = encode_pdf(make_bitmap(100, 400), PageSpec::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
