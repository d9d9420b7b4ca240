use image::RgbaImage;
use log::{debug, error};

use crate::media::payload::BitStream;
use crate::media::{ColorChannelMut, HideBit};
use crate::permutation::Permutation;
use crate::result::Result;
use crate::StegmarkError;

/// Red color channels of an `RgbaImage`, visited in permutation order.
///
/// ## Example of usage
/// ```rust
/// use image::RgbaImage;
/// use stegmark_core::media::image::encoder::ImageRedChannelMut;
/// use stegmark_core::media::HideBit;
/// use stegmark_core::{Permutation, SecretKey};
///
/// let mut image = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
/// let key = SecretKey::new("mysecret").unwrap();
/// let permutation = Permutation::generate(&key, 16);
/// let first = permutation.get(0).unwrap();
///
/// for channel in ImageRedChannelMut::new(&mut image, &permutation).take(1) {
///     channel.hide_bit(true).unwrap();
/// }
/// assert_eq!(image.as_raw()[first * 4], 11);
/// ```
pub struct ImageRedChannelMut<'a, 'p> {
    order: std::slice::Iter<'p, u32>,
    channels: Vec<Option<&'a mut u8>>,
}

impl<'a, 'p> ImageRedChannelMut<'a, 'p> {
    pub fn new(carrier: &'a mut RgbaImage, permutation: &'p Permutation) -> Self {
        let channels = carrier
            .pixels_mut()
            .map(|pixel| Some(&mut pixel.0[0]))
            .collect();

        Self {
            order: permutation.iter(),
            channels,
        }
    }
}

impl<'a> Iterator for ImageRedChannelMut<'a, '_> {
    type Item = ColorChannelMut<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pixel = *self.order.next()? as usize;
        self.channels
            .get_mut(pixel)
            .and_then(Option::take)
            .map(ColorChannelMut)
    }
}

/// Writes `bits` into a copy of `carrier`, one bit per pixel along `permutation`.
///
/// Fails with [`StegmarkError::CapacityExceeded`] before touching anything if
/// the frame is longer than the pixel count.
pub fn hide_bits(
    carrier: &RgbaImage,
    permutation: &Permutation,
    bits: &BitStream,
) -> Result<RgbaImage> {
    let available = permutation.len();
    ensure_capacity(bits.len(), available)?;

    let mut watermarked = carrier.clone();
    for (bit, channel) in bits
        .iter()
        .zip(ImageRedChannelMut::new(&mut watermarked, permutation))
    {
        channel.hide_bit(bit)?;
    }
    debug!("hid {} bits in {available} pixels", bits.len());

    Ok(watermarked)
}

/// Fails with [`StegmarkError::CapacityExceeded`] if `required` bits do not fit
/// into `available` pixels.
pub fn ensure_capacity(required: usize, available: usize) -> Result<()> {
    if required > available {
        error!("watermark needs {required} pixels, carrier has {available}");
        return Err(StegmarkError::CapacityExceeded {
            required,
            available,
        });
    }

    Ok(())
}
