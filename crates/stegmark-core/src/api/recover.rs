use std::path::{Path, PathBuf};

use crate::api::KeyInput;
use crate::media::Carrier;
use crate::strategy::{Variant, WatermarkEngine};
use crate::verify::VerificationResult;
use crate::{CodecOptions, StegmarkError};

pub fn prepare() -> RecoverApi {
    RecoverApi::default()
}

#[derive(Default, Debug)]
pub struct RecoverApi {
    secret_media: Option<PathBuf>,
    key: KeyInput,
    variant: Variant,
    options: CodecOptions,
}

impl RecoverApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// This is the watermarked image
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Set the key the watermark was embedded with, ignored by the visible variant
    pub fn using_key<K: Into<KeyInput>>(mut self, key: K) -> Self {
        self.key = key.into();
        self
    }

    /// Recovers the watermark, a failed verification is part of the result.
    pub fn execute(self) -> Result<VerificationResult, StegmarkError> {
        if self.variant.requires_key() && self.key.is_missing() {
            return Err(StegmarkError::MissingSecretKey);
        }
        let Some(secret_media) = self.secret_media else {
            return Err(StegmarkError::CarrierNotSet);
        };

        let carrier = Carrier::from_file(&secret_media)?;
        WatermarkEngine::default()
            .with_codec_options(self.options)
            .recover(self.variant, carrier.image(), self.key.as_deref())
    }
}
