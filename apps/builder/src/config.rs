use anyhow::{bail, Context, Result};

/// Which rasterizer backend the export pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterBackend {
    /// Real glyph rendering (bundled face, or `FONT_PATH` when set).
    Glyph,
    /// Measured bars instead of glyphs; deterministic, for layout checks.
    Greeked,
}

/// Application configuration loaded from environment variables.
/// Everything has a default; the service runs with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// TTF/OTF file overriding the bundled face for the glyph rasterizer.
    pub font_path: Option<String>,
    pub raster_backend: RasterBackend,
    /// Raster density for the preview bitmap.
    pub raster_dpi: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            font_path: std::env::var("FONT_PATH").ok(),
            raster_backend: parse_raster_backend(
                &std::env::var("RASTER_BACKEND").unwrap_or_else(|_| "glyph".to_string()),
            )?,
            raster_dpi: parse_raster_dpi(
                &std::env::var("RASTER_DPI").unwrap_or_else(|_| "150".to_string()),
            )?,
        })
    }
}

fn parse_raster_backend(raw: &str) -> Result<RasterBackend> {
    match raw {
        "glyph" => Ok(RasterBackend::Glyph),
        "greeked" => Ok(RasterBackend::Greeked),
        other => bail!("RASTER_BACKEND must be 'glyph' or 'greeked', got '{other}'"),
    }
}

/// A zero or negative density would only surface as a failed export later,
/// so reject it at startup.
fn parse_raster_dpi(raw: &str) -> Result<f32> {
    let dpi = raw.parse::<f32>().context("RASTER_DPI must be a number")?;
    if !dpi.is_finite() || dpi <= 0.0 {
        bail!("RASTER_DPI must be positive, got {raw}");
    }
    Ok(dpi)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raster_dpi_accepts_positive_values() {
        assert_eq!(parse_raster_dpi("150").unwrap(), 150.0);
        assert_eq!(parse_raster_dpi("72.5").unwrap(), 72.5);
    }

    #[test]
    fn test_parse_raster_dpi_rejects_zero_and_negative() {
        assert!(parse_raster_dpi("0").is_err());
        assert!(parse_raster_dpi("-96").is_err());
        assert!(parse_raster_dpi("NaN").is_err());
        assert!(parse_raster_dpi("dense").is_err());
    }

    #[test]
    fn test_parse_raster_backend_names() {
        assert_eq!(parse_raster_backend("glyph").unwrap(), RasterBackend::Glyph);
        assert_eq!(
            parse_raster_backend("greeked").unwrap(),
            RasterBackend::Greeked
        );
        assert!(parse_raster_backend("bitmap").is_err());
    }
}
