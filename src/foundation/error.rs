/// Convenience result type used across glyphwarp.
pub type CaptchaResult<T> = Result<T, CaptchaError>;

/// Top-level error taxonomy for generator APIs.
///
/// Only configuration loading, glyph rasterization and final encoding can fail; layout,
/// rotation, noise and warp are total.
#[derive(thiserror::Error, Debug)]
pub enum CaptchaError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The glyph source could not produce a bitmap.
    #[error("rasterization error: {0}")]
    Rasterization(String),

    /// The image encoder rejected the final canvas.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptchaError {
    /// Build a [`CaptchaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptchaError::Rasterization`] value.
    pub fn rasterization(msg: impl Into<String>) -> Self {
        Self::Rasterization(msg.into())
    }

    /// Build a [`CaptchaError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
