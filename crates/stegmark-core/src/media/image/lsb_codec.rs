use image::RgbaImage;
use log::{debug, warn};

use super::decoder::ImageRedChannel;
use super::encoder::{ensure_capacity, hide_bits};
use crate::key::SecretKey;
use crate::media::payload::{framer, Record, Unframed};
use crate::media::{CodecOptions, UnveilBit};
use crate::permutation::Permutation;
use crate::result::Result;
use crate::verify::{verify_unframed, VerificationResult};

/// A watermarked carrier together with the record hidden in it
#[derive(Debug, Clone)]
pub struct Watermarked {
    pub image: RgbaImage,
    pub record: Record,
}

impl Watermarked {
    /// The serialized record as it sits in the image
    pub fn payload(&self) -> Result<String> {
        self.record.to_payload()
    }
}

/// Keyed one bit LSB codec over the red channel
pub struct LsbCodec;

impl LsbCodec {
    /// Hides `record` in a copy of `carrier`.
    ///
    /// The carrier itself is never modified, the returned image is the only output.
    pub fn embed(carrier: &RgbaImage, key: &SecretKey, record: &Record) -> Result<RgbaImage> {
        let bits = framer::frame(record)?;
        let pixel_count = pixel_count(carrier);
        // capacity is checked before the permutation is built
        ensure_capacity(bits.len(), pixel_count)?;

        let permutation = Permutation::generate(key, pixel_count);
        hide_bits(carrier, &permutation, &bits)
    }

    /// Stamps a new record for `text` and hides it in a copy of `carrier`.
    pub fn embed_text(carrier: &RgbaImage, key: &SecretKey, text: &str) -> Result<Watermarked> {
        let record = Record::stamp(key, text);
        let image = Self::embed(carrier, key, &record)?;

        Ok(Watermarked { image, record })
    }

    /// Reads the raw frame content, no interpretation is happening.
    pub fn extract_raw(carrier: &RgbaImage, key: &SecretKey, opts: &CodecOptions) -> Unframed {
        let pixel_count = pixel_count(carrier);
        let scan_limit = opts.scan_limit_for(pixel_count);
        let permutation = Permutation::generate(key, pixel_count);

        let unframed = framer::unframe(
            ImageRedChannel::new(carrier, &permutation).map(UnveilBit::unveil_bit),
            scan_limit,
        );
        if unframed.is_terminated() {
            debug!("found terminator after {} bytes", unframed.content().len());
        } else {
            warn!("no terminator within {scan_limit} bits, returning raw data");
        }

        unframed
    }

    /// Recovers the hidden record and verifies it against `key`.
    pub fn extract(carrier: &RgbaImage, key: &SecretKey, opts: &CodecOptions) -> VerificationResult {
        let unframed = Self::extract_raw(carrier, key, opts);
        verify_unframed(key, &unframed)
    }
}

fn pixel_count(carrier: &RgbaImage) -> usize {
    carrier.width() as usize * carrier.height() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_gradient_image;
    use crate::verify::VerificationStatus;
    use crate::StegmarkError;

    fn key(k: &str) -> SecretKey {
        SecretKey::new(k).unwrap()
    }

    #[test]
    fn should_embed_and_extract() {
        let carrier = prepare_gradient_image(64, 64);
        let watermarked = LsbCodec::embed_text(&carrier, &key("mysecret"), "Hello World!")
            .expect("Cannot embed watermark");

        let result = LsbCodec::extract(
            &watermarked.image,
            &key("mysecret"),
            &CodecOptions::default(),
        );

        assert!(result.is_valid);
        assert_eq!(result.text(), Some("Hello World!"));
        assert_eq!(result.record(), Some(&watermarked.record));
        assert_eq!(result.raw, watermarked.payload().unwrap());
    }

    #[test]
    fn should_not_modify_the_carrier() {
        let carrier = prepare_gradient_image(64, 64);
        let before = carrier.clone();

        let _ = LsbCodec::embed_text(&carrier, &key("mysecret"), "x").unwrap();

        assert_eq!(carrier, before);
    }

    #[test]
    fn should_fail_on_too_small_carrier() {
        let carrier = prepare_gradient_image(8, 8);

        match LsbCodec::embed_text(&carrier, &key("mysecret"), "") {
            Err(StegmarkError::CapacityExceeded { available, .. }) => assert_eq!(available, 64),
            other => panic!("expected a capacity error, got {other:?}"),
        }
    }

    #[test]
    fn should_report_unterminated_scan_on_plain_image() {
        // all red channels odd, no zero byte can ever be read
        let carrier = RgbaImage::from_pixel(32, 32, image::Rgba([1, 2, 3, 255]));
        let result = LsbCodec::extract(&carrier, &key("mysecret"), &CodecOptions::default());

        assert!(!result.is_valid);
        assert!(!result.terminated);
        assert_eq!(result.status(), VerificationStatus::NotTerminated);
        assert_eq!(result.raw.chars().count(), 1024 / 8);
    }

    #[test]
    fn should_honour_the_scan_limit() {
        let carrier = prepare_gradient_image(64, 64);
        let watermarked = LsbCodec::embed_text(&carrier, &key("mysecret"), "").unwrap();

        let unframed = LsbCodec::extract_raw(
            &watermarked.image,
            &key("mysecret"),
            &CodecOptions::default().with_scan_limit(16),
        );

        assert_eq!(unframed, Unframed::NotTerminated(b"{\"".to_vec()));
    }

    #[test]
    fn should_handle_empty_carrier() {
        let carrier = RgbaImage::new(0, 0);
        let unframed = LsbCodec::extract_raw(&carrier, &key("k"), &CodecOptions::default());

        assert_eq!(unframed, Unframed::NotTerminated(Vec::new()));
    }

    #[test]
    fn should_read_a_frame_laid_out_by_another_producer() {
        // order for "mysecret" over 16 pixels as written by the browser embedder
        let order = [4, 9, 5, 12, 10, 2, 3, 11, 14, 8, 1, 15, 7, 6, 13, 0];
        let frame = [false, true, false, false, false, false, false, true]
            .into_iter()
            .chain([false; 8]);
        let mut carrier = RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]));
        for (pixel, bit) in order.into_iter().zip(frame) {
            carrier.get_pixel_mut(pixel % 4, pixel / 4).0[0] |= u8::from(bit);
        }

        let unframed = LsbCodec::extract_raw(&carrier, &key("mysecret"), &CodecOptions::default());

        assert_eq!(unframed, Unframed::Terminated(b"A".to_vec()));
    }
}
