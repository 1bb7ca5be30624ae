//! Rasterization: pluggable, trait-based painter that turns a paint plan
//! into an RGBA bitmap.
//!
//! Default: `GlyphRasterizer` (real glyphs via `fontdue`), using the bundled
//! DejaVu Sans face unless `FONT_PATH` points at another TTF/OTF. The
//! alternative `GreekedRasterizer` paints each placed line as a bar of its
//! measured width; it is selected with `RASTER_BACKEND=greeked` and keeps
//! layout tests deterministic.
//!
//! `AppState` holds an `Arc<dyn Rasterizer>`, swapped at startup via config.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use image::{Rgba, RgbaImage};

use crate::errors::AppError;
use crate::render::font_metrics::preview_face;
use crate::render::layout::{LineStyle, PaintPlan, PlacedLine};

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Body ink, a near-black gray.
const INK: Rgba<u8> = Rgba([31, 41, 55, 255]);
/// Accent ink for the name and section headings.
const ACCENT: Rgba<u8> = Rgba([30, 58, 138, 255]);
/// Greeked text bar fill.
const BAR: Rgba<u8> = Rgba([156, 163, 175, 255]);

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The rasterization collaborator. The export orchestrator treats it as a
/// black box: paint plan in, bitmap of the page's rendered appearance out.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, plan: &PaintPlan) -> Result<RgbaImage, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GreekedRasterizer (default backend)
// ────────────────────────────────────────────────────────────────────────────

/// Paints every text line as a filled bar of its measured width, the way
/// layout tools greek type. Selected with `RASTER_BACKEND=greeked`; the
/// output carries no glyph antialiasing, which keeps layout tests
/// pixel-exact.
pub struct GreekedRasterizer;

#[async_trait]
impl Rasterizer for GreekedRasterizer {
    async fn rasterize(&self, plan: &PaintPlan) -> Result<RgbaImage, AppError> {
        let plan = plan.clone();
        tokio::task::spawn_blocking(move || paint_greeked(&plan))
            .await
            .map_err(|e| AppError::Render(format!("raster task failed: {e}")))
    }
}

fn paint_greeked(plan: &PaintPlan) -> RgbaImage {
    let mut img = blank_page(plan);
    for rule in &plan.rules {
        fill_rect(&mut img, rule.x, rule.y, rule.width, rule.height, ACCENT);
    }
    for line in &plan.lines {
        if line.bullet {
            paint_bullet(&mut img, line);
        }
        let width = preview_face().measure_px(&line.text, line.px_size);
        if width <= 0.0 {
            continue; // empty slot: space stays reserved, nothing painted
        }
        let color = if line.style.is_bold() { INK } else { BAR };
        fill_rect(
            &mut img,
            line.x,
            line.top + line.px_size * 0.25,
            width,
            line.px_size * 0.55,
            color,
        );
    }
    img
}

// ────────────────────────────────────────────────────────────────────────────
// GlyphRasterizer (fontdue backend)
// ────────────────────────────────────────────────────────────────────────────

/// Face compiled into the binary so the exported PDF carries readable text
/// with no configuration at all. DejaVu Sans (free Bitstream Vera license,
/// see assets/DejaVuSans-LICENSE).
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Real glyph rendering from a TTF/OTF font file.
#[derive(Debug)]
pub struct GlyphRasterizer {
    font: Arc<fontdue::Font>,
}

impl GlyphRasterizer {
    /// The bundled DejaVu Sans face, used when `FONT_PATH` is not set.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_bytes(BUNDLED_FONT.to_vec(), "bundled DejaVu Sans")
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::Render(format!("cannot read font {}: {e}", path.display())))?;
        Self::from_bytes(bytes, &path.display().to_string())
    }

    fn from_bytes(bytes: Vec<u8>, source: &str) -> Result<Self, AppError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| AppError::Render(format!("cannot parse font {source}: {e}")))?;
        Ok(GlyphRasterizer {
            font: Arc::new(font),
        })
    }
}

#[async_trait]
impl Rasterizer for GlyphRasterizer {
    async fn rasterize(&self, plan: &PaintPlan) -> Result<RgbaImage, AppError> {
        let plan = plan.clone();
        let font = Arc::clone(&self.font);
        tokio::task::spawn_blocking(move || paint_glyphs(&plan, &font))
            .await
            .map_err(|e| AppError::Render(format!("raster task failed: {e}")))
    }
}

fn paint_glyphs(plan: &PaintPlan, font: &fontdue::Font) -> RgbaImage {
    let mut img = blank_page(plan);
    for rule in &plan.rules {
        fill_rect(&mut img, rule.x, rule.y, rule.width, rule.height, ACCENT);
    }
    for line in &plan.lines {
        if line.bullet {
            paint_bullet(&mut img, line);
        }
        let ascent = font
            .horizontal_line_metrics(line.px_size)
            .map(|m| m.ascent)
            .unwrap_or(line.px_size * 0.8);
        let baseline = line.top + ascent;
        let color = match line.style {
            LineStyle::Name | LineStyle::SectionHeading => ACCENT,
            _ => INK,
        };

        let mut pen_x = line.x;
        for c in line.text.chars() {
            let (metrics, coverage) = font.rasterize(c, line.px_size);
            let glyph_x = pen_x + metrics.xmin as f32;
            let glyph_top = baseline - metrics.ymin as f32 - metrics.height as f32;
            blit_coverage(&mut img, &coverage, metrics.width, glyph_x, glyph_top, color);
            // Faux bold: re-blit one pixel over for the bold styles.
            if line.style.is_bold() {
                blit_coverage(
                    &mut img,
                    &coverage,
                    metrics.width,
                    glyph_x + 1.0,
                    glyph_top,
                    color,
                );
            }
            pen_x += metrics.advance_width;
        }
    }
    img
}

// ────────────────────────────────────────────────────────────────────────────
// Pixel helpers
// ────────────────────────────────────────────────────────────────────────────

fn blank_page(plan: &PaintPlan) -> RgbaImage {
    RgbaImage::from_pixel(plan.width_px, plan.height_px, PAPER)
}

fn paint_bullet(img: &mut RgbaImage, line: &PlacedLine) {
    let size = (line.px_size * 0.28).max(2.0);
    fill_rect(
        img,
        line.x - line.px_size * 0.7,
        line.top + line.px_size * 0.45,
        size,
        size,
        INK,
    );
}

/// Fills a rectangle, clipping to the page. Content past the page bottom is
/// dropped here, matching the fixed-size preview sheet.
fn fill_rect(img: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    let x0 = x.max(0.0) as u32;
    let y0 = y.max(0.0) as u32;
    let x1 = ((x + w).max(0.0) as u32).min(img.width());
    let y1 = ((y + h).max(0.0) as u32).min(img.height());
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

/// Alpha-blends an 8-bit coverage bitmap onto the page at (`x`, `y`).
fn blit_coverage(
    img: &mut RgbaImage,
    coverage: &[u8],
    width: usize,
    x: f32,
    y: f32,
    color: Rgba<u8>,
) {
    if width == 0 {
        return;
    }
    let height = coverage.len() / width;
    for row in 0..height {
        for col in 0..width {
            let alpha = coverage[row * width + col] as u32;
            if alpha == 0 {
                continue;
            }
            let px = x + col as f32;
            let py = y + row as f32;
            if px < 0.0 || py < 0.0 || px >= img.width() as f32 || py >= img.height() as f32 {
                continue;
            }
            let (px, py) = (px as u32, py as u32);
            let base = *img.get_pixel(px, py);
            let blended = Rgba([
                blend_channel(base[0], color[0], alpha),
                blend_channel(base[1], color[1], alpha),
                blend_channel(base[2], color[2], alpha),
                255,
            ]);
            img.put_pixel(px, py, blended);
        }
    }
}

fn blend_channel(base: u8, ink: u8, alpha: u32) -> u8 {
    ((base as u32 * (255 - alpha) + ink as u32 * alpha) / 255) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
