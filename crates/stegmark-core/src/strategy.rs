//! Selection among the watermark variants.
//!
//! [`WatermarkEngine`] validates the inputs a variant needs and routes the
//! carrier either to the local [`LsbCodec`], through the visible overlay first,
//! or to an external [`TransformService`] for the frequency domain variants.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use image::RgbaImage;
use log::{debug, error};

use crate::key::SecretKey;
use crate::media::image::{render_text, LsbCodec, OverlayOptions, Watermarked};
use crate::media::payload::Record;
use crate::media::CodecOptions;
use crate::result::Result;
use crate::verify::{verify, VerificationResult};
use crate::StegmarkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyDomain {
    Dct,
    Dwt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Text overlay plus a record hidden with the public default key
    Visible,
    /// Keyed LSB codec
    #[default]
    InvisibleLsb,
    /// Delegated to a [`TransformService`]
    Invisible(FrequencyDomain),
}

impl FromStr for Variant {
    type Err = StegmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "visible" => Ok(Self::Visible),
            "invisible_lsb" | "invisible-keyed" => Ok(Self::InvisibleLsb),
            "invisible_dct" => Ok(Self::Invisible(FrequencyDomain::Dct)),
            "invisible_dwt" => Ok(Self::Invisible(FrequencyDomain::Dwt)),
            other => Err(StegmarkError::UnknownVariant(other.to_string())),
        }
    }
}

impl Variant {
    /// Whether embedding and recovery need a user supplied key
    pub fn requires_key(&self) -> bool {
        !matches!(self, Variant::Visible)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Visible => "visible",
            Variant::InvisibleLsb => "invisible_lsb",
            Variant::Invisible(FrequencyDomain::Dct) => "invisible_dct",
            Variant::Invisible(FrequencyDomain::Dwt) => "invisible_dwt",
        })
    }
}

/// An external frequency domain watermarking backend.
///
/// The payload handed over is the serialized record, the text handed back is
/// verified locally.
pub trait TransformService: Send + Sync {
    fn embed(
        &self,
        domain: FrequencyDomain,
        carrier: &RgbaImage,
        key: &SecretKey,
        payload: &str,
    ) -> Result<RgbaImage>;

    fn extract(&self, domain: FrequencyDomain, carrier: &RgbaImage, key: &SecretKey)
        -> Result<String>;
}

#[derive(Default)]
pub struct WatermarkEngine {
    options: CodecOptions,
    overlay: OverlayOptions,
    transform: Option<Box<dyn TransformService>>,
}

impl WatermarkEngine {
    pub fn with_codec_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_overlay_options(mut self, overlay: OverlayOptions) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_transform_service<T: TransformService + 'static>(mut self, service: T) -> Self {
        self.transform = Some(Box::new(service));
        self
    }

    /// Watermarks a copy of `carrier` with the given variant.
    ///
    /// `key` is ignored by the visible variant, `text` defaults to empty for
    /// the invisible ones.
    pub fn apply(
        &self,
        variant: Variant,
        carrier: &RgbaImage,
        key: Option<&str>,
        text: Option<&str>,
    ) -> Result<Watermarked> {
        debug!("applying {variant} watermark");
        match variant {
            Variant::Visible => {
                let text = text
                    .filter(|t| !t.is_empty())
                    .ok_or(StegmarkError::MissingWatermarkText)?;
                let overlaid = render_text(carrier, text, &self.overlay)?;

                LsbCodec::embed_text(&overlaid, &SecretKey::visible_default(), text)
            }
            Variant::InvisibleLsb => {
                let key = SecretKey::require(key)?;
                LsbCodec::embed_text(carrier, &key, text.unwrap_or_default())
            }
            Variant::Invisible(domain) => {
                let key = SecretKey::require(key)?;
                let service = self.transform_service(variant)?;
                let record = Record::stamp(&key, text.unwrap_or_default());
                let image = service.embed(domain, carrier, &key, &record.to_payload()?)?;

                Ok(Watermarked { image, record })
            }
        }
    }

    /// Recovers and verifies the watermark of `carrier`.
    ///
    /// Integrity failures are reported through the result, never as an error.
    pub fn recover(
        &self,
        variant: Variant,
        carrier: &RgbaImage,
        key: Option<&str>,
    ) -> Result<VerificationResult> {
        debug!("recovering {variant} watermark");
        match variant {
            Variant::Visible => Ok(LsbCodec::extract(
                carrier,
                &SecretKey::visible_default(),
                &self.options,
            )),
            Variant::InvisibleLsb => {
                let key = SecretKey::require(key)?;
                Ok(LsbCodec::extract(carrier, &key, &self.options))
            }
            Variant::Invisible(domain) => {
                let key = SecretKey::require(key)?;
                let text = self.transform_service(variant)?.extract(domain, carrier, &key)?;

                Ok(verify(&key, &text))
            }
        }
    }

    fn transform_service(&self, variant: Variant) -> Result<&dyn TransformService> {
        self.transform.as_deref().ok_or_else(|| {
            error!("no transform service configured for {variant}");
            StegmarkError::TransformServiceUnavailable(variant.to_string())
        })
    }
}
