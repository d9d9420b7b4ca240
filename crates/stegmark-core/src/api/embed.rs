use std::path::{Path, PathBuf};

use log::info;

use crate::api::KeyInput;
use crate::media::image::OverlayOptions;
use crate::media::payload::Record;
use crate::media::{Carrier, Persist};
use crate::strategy::{Variant, WatermarkEngine};
use crate::{CodecOptions, StegmarkError};

pub fn prepare() -> EmbedApi {
    EmbedApi::default()
}

#[derive(Default, Debug)]
pub struct EmbedApi {
    text: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    key: KeyInput,
    variant: Variant,
    options: CodecOptions,
    overlay: OverlayOptions,
}

impl EmbedApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayOptions) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn use_text<S: AsRef<str>>(mut self, text: Option<S>) -> Self {
        self.text = text.map(|s| s.as_ref().to_string());
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the secret key, ignored by the visible variant
    pub fn using_key<K: Into<KeyInput>>(mut self, key: K) -> Self {
        self.key = key.into();
        self
    }

    /// Watermarks the image and writes it as PNG, returns the embedded record.
    pub fn execute(self) -> Result<Record, StegmarkError> {
        self.validate()?;
        let Some(image) = self.image else {
            return Err(StegmarkError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegmarkError::TargetNotSet);
        };

        let carrier = Carrier::from_file(&image)?;
        let engine = WatermarkEngine::default()
            .with_codec_options(self.options)
            .with_overlay_options(self.overlay);
        let watermarked = engine.apply(
            self.variant,
            carrier.image(),
            self.key.as_deref(),
            self.text.as_deref(),
        )?;

        Carrier::from_image(watermarked.image).save_as(&output)?;
        info!("{} watermark written to {output:?}", self.variant);

        Ok(watermarked.record)
    }

    /// Input checks that need no I/O
    fn validate(&self) -> Result<(), StegmarkError> {
        if self.variant.requires_key() && self.key.is_missing() {
            return Err(StegmarkError::MissingSecretKey);
        }
        if self.variant == Variant::Visible && self.text.as_deref().map_or(true, str::is_empty) {
            return Err(StegmarkError::MissingWatermarkText);
        }

        Ok(())
    }
}
