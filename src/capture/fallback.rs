//! Capture via `xcap` for platforms without a native capture utility.

use image::DynamicImage;
use std::path::Path;
use xcap::Monitor;

use crate::error::{ComputerError, Result};

/// Capture the primary monitor to a PNG at `path`.
pub async fn write_capture(path: &Path) -> Result<()> {
    let monitors = Monitor::all()?;
    let monitor = monitors
        .first()
        .ok_or_else(|| ComputerError::Capture("no monitors found".to_string()))?;

    // The image from xcap is already an RgbaImage from the image crate
    let image = monitor.capture_image()?;
    DynamicImage::ImageRgba8(image).save(path)?;

    Ok(())
}
