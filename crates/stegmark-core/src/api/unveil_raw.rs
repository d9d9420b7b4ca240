use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    media::{image::LsbCodec, payload::Unframed, Carrier},
    CodecOptions, StegmarkError,
};

use super::KeyInput;

pub fn prepare() -> UnveilRawApi {
    UnveilRawApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilRawApi {
    secret_media: Option<PathBuf>,
    destination_file: Option<PathBuf>,
    key: KeyInput,
    options: CodecOptions,
}

impl UnveilRawApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the raw file where all data will be saved to
    pub fn into_raw_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    /// Set the key that decides the pixel order
    pub fn using_key<K: Into<KeyInput>>(mut self, key: K) -> Self {
        self.key = key.into();
        self
    }

    /// Dumps the bytes read in key order up to the terminator or the scan limit.
    /// No interpretation of the content is happening.
    pub fn execute(self) -> Result<Unframed, StegmarkError> {
        let key = self.key.require()?;
        let Some(secret_media) = self.secret_media else {
            return Err(StegmarkError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(StegmarkError::TargetNotSet);
        };

        let carrier = Carrier::from_file(&secret_media)?;
        let unframed = LsbCodec::extract_raw(carrier.image(), &key, &self.options);

        let mut destination_file =
            File::create(destination_file).map_err(|source| StegmarkError::WriteError { source })?;
        destination_file
            .write_all(unframed.content())
            .map_err(|source| StegmarkError::WriteError { source })?;

        Ok(unframed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_gradient_image;
    use crate::{LsbCodec, SecretKey};
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let secret = temp_dir.path().join("secret.png");
        let raw = temp_dir.path().join("raw.bin");
        let key = SecretKey::new("Secret42").unwrap();
        let watermarked =
            LsbCodec::embed_text(&prepare_gradient_image(64, 64), &key, "Hello World").unwrap();
        watermarked.image.save(&secret).unwrap();

        let unframed = crate::api::unveil_raw::prepare()
            .from_secret_file(&secret)
            .using_key("Secret42")
            .into_raw_file(&raw)
            .execute()
            .expect("Failed to unveil raw data from image");

        assert!(unframed.is_terminated());
        let dumped = std::fs::read(&raw).expect("Failed to read file");
        assert_eq!(dumped, watermarked.payload().unwrap().into_bytes());
    }

    #[test]
    fn should_require_a_key() {
        assert!(matches!(
            prepare()
                .from_secret_file("any.png")
                .into_raw_file("any.bin")
                .execute(),
            Err(StegmarkError::MissingSecretKey)
        ));
    }
}
