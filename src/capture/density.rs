//! PNG density (DPI) helpers.
//!
//! The `image` crate does not surface the pHYs chunk, so reading and
//! re-tagging capture DPI goes through the `png` crate directly.

use image::DynamicImage;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;

const METERS_PER_INCH: f64 = 0.0254;

/// Read the DPI a PNG reports, if any.
pub fn png_dpi(path: &Path) -> Result<Option<f64>> {
    let decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    let reader = decoder.read_info()?;

    Ok(reader.info().pixel_dims.and_then(|dims| match dims.unit {
        png::Unit::Meter => Some(dims.xppu as f64 * METERS_PER_INCH),
        png::Unit::Unspecified => None,
    }))
}

/// Save an image as a PNG tagged with the given DPI.
pub fn save_png_with_dpi(image: &DynamicImage, path: &Path, dpi: f64) -> Result<()> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let ppu = (dpi / METERS_PER_INCH).round() as u32;

    let mut encoder = png::Encoder::new(BufWriter::new(File::create(path)?), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppu,
        yppu: ppu,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba.as_raw())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn temp_png() -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "deskpilot_test_{}.png",
            uuid::Uuid::new_v4().simple()
        ))
    }

    #[test]
    fn test_dpi_round_trip() {
        let path = temp_png();
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));

        save_png_with_dpi(&image, &path, 144.0).unwrap();
        let dpi = png_dpi(&path).unwrap().unwrap();
        // The pHYs chunk stores pixels per meter, so expect rounding noise
        assert!((dpi - 144.0).abs() < 0.5, "dpi was {}", dpi);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_untagged_png_has_no_dpi() {
        let path = temp_png();
        DynamicImage::ImageRgba8(RgbaImage::new(8, 8))
            .save(&path)
            .unwrap();

        assert_eq!(png_dpi(&path).unwrap(), None);

        std::fs::remove_file(&path).unwrap();
    }
}
