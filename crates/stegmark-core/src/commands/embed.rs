use std::path::Path;

use crate::media::image::OverlayOptions;
use crate::media::payload::Record;
use crate::strategy::Variant;
use crate::{CodecOptions, StegmarkError};

pub fn embed(
    media: &Path,
    write_to_file: &Path,
    variant: Variant,
    text: Option<String>,
    key: Option<String>,
    overlay: OverlayOptions,
    options: CodecOptions,
) -> Result<Record, StegmarkError> {
    crate::api::embed::prepare()
        .with_options(options)
        .with_overlay(overlay)
        .with_variant(variant)
        .with_image(media)
        .with_output(write_to_file)
        .using_key(key)
        .use_text(text)
        .execute()
}
