use image::RgbaImage;

use crate::media::ColorChannel;
use crate::permutation::Permutation;

/// Read only red color channels of an `RgbaImage`, visited in permutation order.
///
/// ## Example of usage
/// ```rust
/// use image::RgbaImage;
/// use stegmark_core::media::image::decoder::ImageRedChannel;
/// use stegmark_core::media::UnveilBit;
/// use stegmark_core::{Permutation, SecretKey};
///
/// let image = RgbaImage::from_pixel(4, 4, image::Rgba([11, 20, 30, 255]));
/// let key = SecretKey::new("mysecret").unwrap();
/// let permutation = Permutation::generate(&key, 16);
///
/// let bits: Vec<bool> = ImageRedChannel::new(&image, &permutation)
///     .map(UnveilBit::unveil_bit)
///     .collect();
/// assert_eq!(bits, vec![true; 16]);
/// ```
pub struct ImageRedChannel<'i, 'p> {
    order: std::slice::Iter<'p, u32>,
    samples: &'i [u8],
}

impl<'i, 'p> ImageRedChannel<'i, 'p> {
    pub fn new(input: &'i RgbaImage, permutation: &'p Permutation) -> Self {
        Self {
            order: permutation.iter(),
            samples: input.as_raw(),
        }
    }
}

impl Iterator for ImageRedChannel<'_, '_> {
    type Item = ColorChannel;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let pixel = *self.order.next()? as usize;
        self.samples.get(pixel * 4).copied().map(ColorChannel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

#[cfg(test)]
mod decoder_tests {
    use super::*;
    use crate::test_utils::prepare_5x5_image;
    use crate::SecretKey;

    #[test]
    fn it_should_visit_every_pixel_once() {
        let img = prepare_5x5_image();
        let permutation = Permutation::generate(&SecretKey::new("k").unwrap(), 25);

        let mut reds: Vec<u8> = ImageRedChannel::new(&img, &permutation)
            .map(|c| c.0)
            .collect();
        reds.sort_unstable();

        let mut expected: Vec<u8> = img.pixels().map(|p| p.0[0]).collect();
        expected.sort_unstable();
        assert_eq!(reds, expected);
    }

    #[test]
    fn it_should_read_the_red_channel_only() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([7, 8, 9, 10]));
        let permutation = Permutation::generate(&SecretKey::new("k").unwrap(), 4);

        assert!(ImageRedChannel::new(&img, &permutation).all(|c| c == ColorChannel(7)));
    }
}
