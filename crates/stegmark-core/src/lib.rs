//! # Stegmark Core API
//!
//! Keyed least significant bit watermarking of images. A small provenance
//! record (id, timestamp, integrity hash, text) is hidden in the red channel of
//! pixels visited in a key dependent order, and can only be found again with
//! the same key.
//!
//! There are 3 builders exposed via [`api`]:
//! - [`api::embed`] for watermarking an image file
//! - [`api::recover`] for recovering and verifying a watermark
//! - [`api::unveil_raw`] for dumping the plain raw bytes read in key order
//!
//! # Usage Examples
//!
//! ## Watermark an image
//!
//! ```rust
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! image::RgbaImage::from_pixel(64, 64, image::Rgba([40, 80, 120, 255]))
//!     .save(&carrier)
//!     .expect("Failed to write carrier image");
//!
//! stegmark_core::api::embed::prepare()
//!     .with_text("(c) 2024 ACME")     // will be part of the hidden record
//!     .using_key("SuperSecret42")     // decides the pixel order and signs the record
//!     .with_image(&carrier)
//!     .with_output(temp_dir.path().join("watermarked.png"))
//!     .execute()
//!     .expect("Failed to embed watermark");
//! ```
//!
//! ## Recover a watermark
//!
//! ```rust
//! use stegmark_core::{LsbCodec, SecretKey};
//!
//! let key = SecretKey::new("SuperSecret42").unwrap();
//! let carrier = image::RgbaImage::from_pixel(64, 64, image::Rgba([40, 80, 120, 255]));
//! let watermarked = LsbCodec::embed_text(&carrier, &key, "(c) 2024 ACME").unwrap();
//!
//! let result = LsbCodec::extract(&watermarked.image, &key, &Default::default());
//! assert!(result.is_valid);
//! assert_eq!(result.text(), Some("(c) 2024 ACME"));
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
// clippy::cargo_common_metadata,
// clippy::branches_sharing_code,
// clippy::cast_lossless,
// clippy::cognitive_complexity,
// clippy::get_unwrap,
// clippy::if_then_some_else_none,
// clippy::inefficient_to_string,
// clippy::match_bool,
// clippy::missing_const_for_fn,
// clippy::missing_panics_doc,
// clippy::option_if_let_else,
// clippy::redundant_closure,
    clippy::redundant_else,
// clippy::redundant_pub_crate,
// clippy::ref_binding_to_reference,
// clippy::ref_option_ref,
// clippy::same_functions_in_if_condition,
// clippy::unneeded_field_pattern,
// clippy::unnested_or_patterns,
// clippy::use_self,
)]

pub mod api;
pub mod commands;
pub mod error;
pub mod key;
pub mod media;
pub mod permutation;
pub mod result;
pub mod strategy;
pub mod verify;

pub use crate::error::StegmarkError;
pub use crate::key::{SecretKey, VISIBLE_DEFAULT_KEY};
pub use crate::media::image::{LsbCodec, OverlayOptions, Position, Watermarked};
pub use crate::media::payload::Record;
pub use crate::media::{Carrier, CodecOptions, Persist};
pub use crate::permutation::Permutation;
pub use crate::result::Result;
pub use crate::strategy::{FrequencyDomain, TransformService, Variant, WatermarkEngine};
pub use crate::verify::{Decoded, VerificationResult, VerificationStatus};

#[cfg(test)]
mod test_utils {
    use image::{ImageBuffer, RgbaImage};

    /// This image has some traits:
    /// --------------y-------------
    /// | 0,0 -> (0, 1, 2, 3 ) | 0,1 -> (4, 5, 6, 7 ) | ...
    /// | 1,0 -> (20,21,22,23) | 1,1 -> (24,25,26,27) | ...
    /// | 2,0 -> (40,41,42,43) | 2,1 -> (44,45,46,47) | ...
    /// x ...
    /// | ..
    /// | ..
    pub fn prepare_5x5_image() -> RgbaImage {
        ImageBuffer::from_fn(5, 5, |x, y| {
            let i = (4 * x + 20 * y) as u8;
            image::Rgba([i, i + 1, i + 2, i + 3])
        })
    }

    /// Opaque image with a diagonal color gradient, any size.
    pub fn prepare_gradient_image(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            image::Rgba([
                ((x + y) % 256) as u8,
                ((x * 3) % 256) as u8,
                ((y * 7) % 256) as u8,
                255,
            ])
        })
    }
}
