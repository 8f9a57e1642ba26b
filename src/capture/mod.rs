//! Screen capture and image normalization.
//!
//! Captures land as uniquely-named PNGs in a fixed output directory, get
//! density-corrected and bounded for the agent, are archived into the
//! session directory, and are returned base64-encoded.

use base64::{engine::general_purpose, Engine as _};
use image::{imageops::FilterType, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::constants::{BASELINE_DPI, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
use crate::error::{ComputerError, Result};
use crate::session::Session;

pub mod density;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(not(target_os = "macos"))]
mod fallback;

/// A processed capture ready for the response envelope.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub path: PathBuf,
    pub base64: String,
}

/// Directory captures are written to. Files are never cleaned up here;
/// external housekeeping owns them once written.
pub fn output_dir() -> PathBuf {
    std::env::temp_dir().join("outputs")
}

/// Capture the screen, normalize the image, archive a copy into the
/// session directory, and return the encoded bytes.
pub async fn capture_screen(session: &Session) -> Result<Screenshot> {
    let dir = output_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("screenshot_{}.png", Uuid::new_v4().simple()));

    #[cfg(target_os = "macos")]
    macos::write_capture(&path).await?;

    #[cfg(not(target_os = "macos"))]
    fallback::write_capture(&path).await?;

    if !path.exists() {
        return Err(ComputerError::Capture(
            "screen capture produced no file".to_string(),
        ));
    }

    normalize(&path)?;

    // Archival is a logging side effect and must not affect the returned bytes
    if let Err(e) = session.archive_screenshot(&path) {
        tracing::warn!("failed to archive screenshot: {}", e);
    }

    let bytes = fs::read(&path)?;
    Ok(Screenshot {
        path,
        base64: general_purpose::STANDARD.encode(&bytes),
    })
}

/// Density-correct and bound a captured image in place.
///
/// High-density captures (DPI above the 72 baseline) are halved and
/// re-tagged at the baseline; anything still larger than the output bound
/// is resized preserving aspect ratio. Images needing neither are left
/// untouched on disk.
fn normalize(path: &Path) -> Result<()> {
    let dpi = density::png_dpi(path)?;
    let mut image = image::open(path)?;
    let mut modified = false;

    if dpi.is_some_and(|dpi| dpi > BASELINE_DPI) {
        let (width, height) = image.dimensions();
        image = image.resize_exact(width / 2, height / 2, FilterType::Lanczos3);
        modified = true;
    }

    let (width, height) = image.dimensions();
    if width > MAX_IMAGE_WIDTH || height > MAX_IMAGE_HEIGHT {
        let scale = f64::min(
            MAX_IMAGE_WIDTH as f64 / width as f64,
            MAX_IMAGE_HEIGHT as f64 / height as f64,
        );
        let new_width = (width as f64 * scale) as u32;
        let new_height = (height as f64 * scale) as u32;
        image = image.resize(new_width, new_height, FilterType::Lanczos3);
        modified = true;
    }

    if modified {
        density::save_png_with_dpi(&image, path, BASELINE_DPI)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    fn temp_png() -> PathBuf {
        std::env::temp_dir().join(format!(
            "deskpilot_test_{}.png",
            Uuid::new_v4().simple()
        ))
    }

    #[test]
    fn test_high_density_capture_is_halved() {
        let path = temp_png();
        let image = DynamicImage::ImageRgba8(RgbaImage::new(2000, 1200));
        density::save_png_with_dpi(&image, &path, 144.0).unwrap();

        normalize(&path).unwrap();

        let result = image::open(&path).unwrap();
        assert_eq!(result.dimensions(), (1000, 600));
        let dpi = density::png_dpi(&path).unwrap().unwrap();
        assert!((dpi - 72.0).abs() < 0.5, "dpi was {}", dpi);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_baseline_capture_is_untouched() {
        let path = temp_png();
        let image = DynamicImage::ImageRgba8(RgbaImage::new(800, 600));
        density::save_png_with_dpi(&image, &path, 72.0).unwrap();
        let before = fs::read(&path).unwrap();

        normalize(&path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), before);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_oversized_capture_is_bounded() {
        let path = temp_png();
        DynamicImage::ImageRgba8(RgbaImage::new(3000, 1800))
            .save(&path)
            .unwrap();

        normalize(&path).unwrap();

        // Height is the tighter bound at this shape: 720/1800 wins
        let result = image::open(&path).unwrap();
        assert_eq!(result.dimensions(), (1200, 720));

        fs::remove_file(&path).unwrap();
    }
}
