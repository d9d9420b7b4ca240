use std::path::PathBuf;

use clap::Args;
use stegmark_core::CodecOptions;

/// Dumps the raw bytes read in key order, without any interpretation
#[derive(Args, Debug)]
pub struct UnveilRawArgs {
    /// Secret key that decides the pixel order
    #[arg(short, long, value_name = "key")]
    pub key: Option<String>,

    /// Source image that contains the watermark
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Raw data will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,
}

impl UnveilRawArgs {
    pub fn run(self, options: CodecOptions) -> crate::CliResult<()> {
        let key = if self.key.is_none() {
            crate::cli::ask_for_key(false)
        } else {
            self.key
        };

        let unframed =
            stegmark_core::commands::unveil_raw(&self.media, &self.output_file, key, options)?;
        if !unframed.is_terminated() {
            log::warn!("no terminator found, the dump ends at the scan limit");
        }

        Ok(())
    }
}
