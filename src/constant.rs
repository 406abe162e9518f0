// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Default minimum crop width in source pixels.
pub const MIN_CROP_WIDTH: f32 = 50.0;

/// Default minimum crop height in source pixels.
pub const MIN_CROP_HEIGHT: f32 = 50.0;

/// Visible size of a resize handle in screen pixels.
pub const HANDLE_SIZE: f32 = 14.0;

/// Hit area of a resize handle in screen pixels (square, centered on the handle).
pub const HANDLE_HIT_SIZE: f32 = 28.0;

/// Selection border width in screen pixels.
pub const BORDER_WIDTH: f32 = 2.0;

/// Width of a rule-of-thirds grid line in screen pixels.
pub const GRID_WIDTH: f32 = 1.0;

/// Selections at or below this screen size (either axis) get no grid.
pub const GRID_MIN_SIZE: f32 = 10.0;

/// Minimum pixmap size for SVG rendering (prevents 0x0 images).
pub const MIN_PIXMAP_SIZE: u32 = 1;

/// Base name of the exported file (extension follows the output format).
pub const OUTPUT_BASE_NAME: &str = "cropped";

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Default preview container size in screen pixels.
pub const DEFAULT_VIEWPORT: (f32, f32) = (800.0, 500.0);

/// Largest output buffer we agree to allocate (16384 x 16384, the common canvas limit).
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 16_384 * 16_384;

/// Config directory name below the platform config dir.
pub const CONFIG_DIR: &str = "cropwise";

/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";
