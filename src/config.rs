use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{CaptchaError, CaptchaResult},
};

/// Largest accepted canvas side in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Largest accepted glyph size in points.
pub const MAX_POINT_SIZE: f32 = 512.0;

/// Colors, text size and canvas dimensions for a generator.
///
/// Missing JSON fields take their [`Default`] values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Canvas fill, also used for pixels exposed by the warp.
    pub background: Rgba8,
    /// Glyph color.
    pub text_color: Rgba8,
    /// Glyph size in points (72 DPI, so pixels per em).
    pub point_size: f32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            text_color: Rgba8::BLACK,
            point_size: 28.0,
            width: 250,
            height: 100,
        }
    }
}

impl GenerationConfig {
    /// Load a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> CaptchaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs the pipeline cannot render.
    pub fn validate(&self) -> CaptchaResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::validation(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(CaptchaError::validation(format!(
                "canvas sides must be <= {MAX_DIMENSION}, got {}x{}",
                self.width, self.height
            )));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| CaptchaError::validation("canvas buffer size overflows usize"))?;
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(CaptchaError::validation(
                "point_size must be finite and > 0",
            ));
        }
        if self.point_size > MAX_POINT_SIZE {
            return Err(CaptchaError::validation(format!(
                "point_size must be <= {MAX_POINT_SIZE}, got {}",
                self.point_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
