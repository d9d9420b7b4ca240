use std::path::Path;

use crate::media::payload::Unframed;
use crate::{CodecOptions, StegmarkError};

/// unveil all raw data, no content format interpretation is happening.
/// Just a raw binary dump of the bytes read in key order.
pub fn unveil_raw(
    secret_media: &Path,
    destination_file: &Path,
    key: Option<String>,
    options: CodecOptions,
) -> Result<Unframed, StegmarkError> {
    crate::api::unveil_raw::prepare()
        .with_options(options)
        .from_secret_file(secret_media)
        .into_raw_file(destination_file)
        .using_key(key)
        .execute()
}
