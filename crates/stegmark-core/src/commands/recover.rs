use std::path::Path;

use crate::strategy::Variant;
use crate::verify::VerificationResult;
use crate::{CodecOptions, StegmarkError};

pub fn recover(
    secret_media: &Path,
    variant: Variant,
    key: Option<String>,
    options: CodecOptions,
) -> Result<VerificationResult, StegmarkError> {
    crate::api::recover::prepare()
        .with_options(options)
        .with_variant(variant)
        .from_secret_file(secret_media)
        .using_key(key)
        .execute()
}
