//! glyphwarp renders short codes as distorted images for human-verification challenges.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `canvas size + code length -> LayoutPlan` (spacing, centering, rotation slack)
//! 2. **Composite**: each character is rasterized by a [`GlyphSource`], drawn into a fixed
//!    cell, rotated by a random angle and stamped onto the [`Canvas`]
//! 3. **Noise**: random dots and translucent lines
//! 4. **Warp**: a vertical then a horizontal sinusoidal resampling pass
//! 5. **Encode**: the final canvas goes through an [`ImageEncoder`] (PNG by default)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: every random stage takes a caller-provided [`rand::Rng`]; a fixed
//!   seed reproduces the same bytes.
//! - **Total geometry**: only rasterization and encoding can fail. Out-of-range pixels are
//!   dropped, never clamped.
//!
//! ```no_run
//! use glyphwarp::{CaptchaGenerator, FontGlyphSource, GenerationConfig};
//!
//! # fn main() -> glyphwarp::CaptchaResult<()> {
//! let font = FontGlyphSource::from_path("fonts/GoRegular.ttf")?;
//! let generator = CaptchaGenerator::with_png(GenerationConfig::default(), font)?;
//! let png = generator.generate_random("ABCD123")?;
//! std::fs::write("captcha.png", png).map_err(anyhow::Error::from)?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codes;
mod config;
mod encode;
mod foundation;
mod generator;
mod glyph;
mod layout;
mod render;

pub use codes::{DEFAULT_CHARSET, random_code, random_code_from};
pub use config::{GenerationConfig, MAX_DIMENSION, MAX_POINT_SIZE};
pub use encode::png::{ImageEncoder, PngEncoder};
pub use foundation::core::Rgba8;
pub use foundation::error::{CaptchaError, CaptchaResult};
pub use generator::{BatchOpts, CaptchaGenerator};
pub use glyph::cell::{CELL_INSET_X, cell_baseline_y, render_cell};
pub use glyph::source::{FontGlyphSource, GlyphBitmap, GlyphSource};
pub use layout::plan::{
    CELL_HEIGHT, CELL_WIDTH, EDGE_MARGIN, LayoutPlan, MAX_ROTATION_DEG, SpacingProfile,
    SpacingState, max_rotation_offset, worst_case_width,
};
pub use render::canvas::Canvas;
pub use render::compositor::{
    GlyphCompositor, GlyphPlacement, SAFETY_MARGIN, inside_safety_margin, stamp_rotated,
};
pub use render::noise::{NoiseInjector, draw_line};
pub use render::warp::{WaveDistorter, horizontal_offset, vertical_offset};
