use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

pub use image::RgbaImage;
use log::error;

use crate::error::StegmarkError;
use crate::result::Result;

use super::Persist;

/// A decoded carrier image, always held as 8 bit RGBA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier(RgbaImage);

impl Carrier {
    pub fn from_image(img: RgbaImage) -> Self {
        Self(img)
    }

    pub fn from_file(f: &Path) -> Result<Self> {
        let ext = f
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or(StegmarkError::UnsupportedMedia)?;

        let format = match ext.as_str() {
            "png" => image::ImageFormat::Png,
            "jpg" | "jpeg" => image::ImageFormat::Jpeg,
            _ => return Err(StegmarkError::UnsupportedMedia),
        };
        let bytes = std::fs::read(f).map_err(|source| {
            error!("Error reading image {f:?}: {source}");
            StegmarkError::ReadError { source }
        })?;
        let img = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            error!("Error decoding image {f:?}: {e}");
            StegmarkError::ImageDecodeError(e)
        })?;

        Ok(Self(img.to_rgba8()))
    }

    /// Decodes an in memory PNG or JPEG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| match e {
            image::ImageError::Unsupported(_) => StegmarkError::UnsupportedMedia,
            e => StegmarkError::ImageDecodeError(e),
        })?;

        Ok(Self(img.to_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn into_image(self) -> RgbaImage {
        self.0
    }

    pub fn pixel_count(&self) -> usize {
        self.0.width() as usize * self.0.height() as usize
    }

    pub fn save_to_writer<W: Write + Seek>(&self, mut writer: W) -> Result<()> {
        self.0
            .write_to(&mut writer, image::ImageFormat::Png)
            .map_err(|e| {
                error!("Error saving image: {e}");
                StegmarkError::ImageEncodingError
            })
    }

    /// The carrier encoded as PNG, lossless so the hidden bits survive.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.save_to_writer(&mut buf)?;

        Ok(buf.into_inner())
    }
}

impl From<RgbaImage> for Carrier {
    fn from(img: RgbaImage) -> Self {
        Self::from_image(img)
    }
}

impl Persist for Carrier {
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            StegmarkError::WriteError { source: e }
        })?;
        self.save_to_writer(f)
    }
}
