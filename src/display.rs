//! Display geometry and coordinate scaling.
//!
//! The device resolution is read once at startup and, for high-density
//! displays, halved with a matching 2.0 scaling factor. Coordinates coming
//! from the agent are expressed in a capped "API resolution" picked from a
//! table of standard targets and converted here in both directions.

use serde::Serialize;

use crate::constants::{DENSITY_HEIGHT_THRESHOLD, DENSITY_WIDTH_THRESHOLD};
use crate::error::{ComputerError, Result};

/// A display size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Aspect ratio (width over height).
    fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Which coordinate space a value originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingSource {
    /// Agent-facing coordinates, capped to the API resolution.
    Api,
    /// Coordinates in the (density-corrected) device space.
    Device,
}

/// Standard resolutions the API space is capped to, in lookup order.
const SCALING_TARGETS: [Resolution; 3] = [
    // XGA, 4:3
    Resolution {
        width: 1024,
        height: 768,
    },
    // WXGA, 16:10
    Resolution {
        width: 1280,
        height: 800,
    },
    // FWXGA, ~16:9
    Resolution {
        width: 1366,
        height: 768,
    },
];

/// Aspect ratios closer than this count as the same shape.
const RATIO_TOLERANCE: f64 = 0.02;

/// Immutable display configuration computed once at tool construction.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    device: Resolution,
    scale_factor: f64,
}

impl DisplayConfig {
    /// Detect the primary monitor and derive the configuration from it.
    pub fn detect() -> Result<Self> {
        let monitors = xcap::Monitor::all()?;
        let monitor = monitors
            .first()
            .ok_or_else(|| ComputerError::Capture("no monitors found".to_string()))?;

        Ok(Self::new(monitor.width()?, monitor.height()?))
    }

    /// Build a configuration from a raw display size, applying the
    /// high-density heuristic.
    pub fn new(width: u32, height: u32) -> Self {
        if width > DENSITY_WIDTH_THRESHOLD || height > DENSITY_HEIGHT_THRESHOLD {
            Self {
                device: Resolution {
                    width: width / 2,
                    height: height / 2,
                },
                scale_factor: 2.0,
            }
        } else {
            Self {
                device: Resolution { width, height },
                scale_factor: 1.0,
            }
        }
    }

    /// The (density-corrected) device resolution.
    pub fn device(&self) -> Resolution {
        self.device
    }

    /// Multiplier between device coordinates and physical injection
    /// coordinates. 1.0 or 2.0, fixed for the tool's lifetime.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The resolution advertised to the agent. Falls back to the device
    /// resolution when no scaling target matches.
    pub fn api_resolution(&self) -> Resolution {
        self.scaling_target().unwrap_or(self.device)
    }

    /// Pick the standard resolution used for API-space scaling.
    ///
    /// The first entry whose aspect ratio matches the device decides the
    /// outcome: it is taken only if it is narrower than the device, and no
    /// later entries are considered either way.
    fn scaling_target(&self) -> Option<Resolution> {
        let ratio = self.device.ratio();
        let mut target = None;

        for candidate in SCALING_TARGETS {
            if (candidate.ratio() - ratio).abs() < RATIO_TOLERANCE {
                if candidate.width < self.device.width {
                    target = Some(candidate);
                }
                break;
            }
        }

        target
    }

    /// Convert a coordinate between API space and device space.
    ///
    /// When no scaling target matches the device shape, coordinates pass
    /// through unchanged. API-space inputs are validated against the device
    /// bounds before scaling up.
    pub fn scale_coordinates(&self, source: ScalingSource, x: i32, y: i32) -> Result<(i32, i32)> {
        let Some(target) = self.scaling_target() else {
            return Ok((x, y));
        };

        let x_factor = target.width as f64 / self.device.width as f64;
        let y_factor = target.height as f64 / self.device.height as f64;

        match source {
            ScalingSource::Api => {
                if x < 0 || y < 0 || x > self.device.width as i32 || y > self.device.height as i32 {
                    return Err(ComputerError::OutOfBounds(x, y));
                }
                Ok((
                    (x as f64 / x_factor).round() as i32,
                    (y as f64 / y_factor).round() as i32,
                ))
            }
            ScalingSource::Device => Ok((
                (x as f64 * x_factor).round() as i32,
                (y as f64 * y_factor).round() as i32,
            )),
        }
    }

    /// Device coordinates to physical injection coordinates.
    pub fn to_physical(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 * self.scale_factor).round() as i32,
            (y as f64 * self.scale_factor).round() as i32,
        )
    }

    /// Physical injection coordinates back to device coordinates.
    pub fn from_physical(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 / self.scale_factor).round() as i32,
            (y as f64 / self.scale_factor).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_heuristic() {
        // A Retina-class display is halved and gets a 2.0 factor
        let config = DisplayConfig::new(2560, 1600);
        assert_eq!(
            config.device(),
            Resolution {
                width: 1280,
                height: 800
            }
        );
        assert_eq!(config.scale_factor(), 2.0);

        // A standard display is left alone
        let config = DisplayConfig::new(1440, 900);
        assert_eq!(
            config.device(),
            Resolution {
                width: 1440,
                height: 900
            }
        );
        assert_eq!(config.scale_factor(), 1.0);
    }

    #[test]
    fn test_scaling_target_selection() {
        // 16:9 at 1920x1080 scales to FWXGA
        let config = DisplayConfig::new(1920, 1080);
        assert_eq!(
            config.api_resolution(),
            Resolution {
                width: 1366,
                height: 768
            }
        );

        // 16:10 at exactly WXGA size: the first ratio match is not narrower
        // than the device, and the lookup stops there, so scaling stays off
        let config = DisplayConfig::new(1280, 800);
        assert_eq!(
            config.api_resolution(),
            Resolution {
                width: 1280,
                height: 800
            }
        );
    }

    #[test]
    fn test_passthrough_without_target() {
        let config = DisplayConfig::new(1280, 800);
        assert_eq!(
            config
                .scale_coordinates(ScalingSource::Api, 100, 200)
                .unwrap(),
            (100, 200)
        );
        assert_eq!(
            config
                .scale_coordinates(ScalingSource::Device, 640, 400)
                .unwrap(),
            (640, 400)
        );
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let config = DisplayConfig::new(1920, 1080);

        for (x, y) in [(0, 0), (17, 993), (1000, 500), (1919, 1079)] {
            let (api_x, api_y) = config
                .scale_coordinates(ScalingSource::Device, x, y)
                .unwrap();
            let (back_x, back_y) = config
                .scale_coordinates(ScalingSource::Api, api_x, api_y)
                .unwrap();
            assert!((back_x - x).abs() <= 1, "x: {} -> {}", x, back_x);
            assert!((back_y - y).abs() <= 1, "y: {} -> {}", y, back_y);
        }
    }

    #[test]
    fn test_scale_up_out_of_bounds() {
        let config = DisplayConfig::new(1920, 1080);

        assert!(matches!(
            config.scale_coordinates(ScalingSource::Api, 2000, 500),
            Err(ComputerError::OutOfBounds(2000, 500))
        ));
        assert!(matches!(
            config.scale_coordinates(ScalingSource::Api, 500, 1200),
            Err(ComputerError::OutOfBounds(500, 1200))
        ));
        assert!(matches!(
            config.scale_coordinates(ScalingSource::Api, -1, 5),
            Err(ComputerError::OutOfBounds(-1, 5))
        ));
    }

    #[test]
    fn test_physical_conversion() {
        let config = DisplayConfig::new(2560, 1600);
        assert_eq!(config.to_physical(100, 200), (200, 400));
        assert_eq!(config.from_physical(200, 400), (100, 200));

        let config = DisplayConfig::new(1440, 900);
        assert_eq!(config.to_physical(100, 200), (100, 200));
    }
}
