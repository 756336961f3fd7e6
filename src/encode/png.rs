use std::io::Cursor;

use crate::{
    foundation::error::{CaptchaError, CaptchaResult},
    render::canvas::Canvas,
};

/// Serializes a finished canvas into an image file.
pub trait ImageEncoder: Send + Sync {
    /// Encode `canvas`; failures surface as [`CaptchaError::Encoding`].
    fn encode(&self, canvas: &Canvas) -> CaptchaResult<Vec<u8>>;
}

impl<T: ImageEncoder + ?Sized> ImageEncoder for &T {
    fn encode(&self, canvas: &Canvas) -> CaptchaResult<Vec<u8>> {
        (**self).encode(canvas)
    }
}

/// RGBA8 PNG encoder backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, canvas: &Canvas) -> CaptchaResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(
            canvas.width(),
            canvas.height(),
            canvas.as_rgba8().to_vec(),
        )
        .ok_or_else(|| CaptchaError::encoding("canvas buffer does not match its dimensions"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| CaptchaError::encoding(e.to_string()))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
