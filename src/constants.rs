// Fixed parameters for capture, scaling and input timing.

/// DPI reported by standard-density displays.
pub const BASELINE_DPI: f64 = 72.0;

/// Displays wider than this are treated as high-density.
pub const DENSITY_WIDTH_THRESHOLD: u32 = 2000;

/// Displays taller than this are treated as high-density.
pub const DENSITY_HEIGHT_THRESHOLD: u32 = 1500;

/// Largest image width returned to the agent.
pub const MAX_IMAGE_WIDTH: u32 = 1280;

/// Largest image height returned to the agent.
pub const MAX_IMAGE_HEIGHT: u32 = 720;

/// Settle delay before a post-action capture, in milliseconds.
pub const SCREENSHOT_DELAY_MS: u64 = 500;

/// Pause between the two clicks of a double click, in milliseconds.
pub const DOUBLE_CLICK_PAUSE_MS: u64 = 10;
