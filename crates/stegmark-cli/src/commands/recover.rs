use std::path::PathBuf;

use clap::Args;
use stegmark_core::{CodecOptions, Variant, VerificationResult, VerificationStatus};

use crate::CliResult;

const RAW_PREVIEW_CHARS: usize = 200;

/// Recovers and verifies the watermark of an image
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Secret key the watermark was embedded with
    #[arg(short, long, value_name = "key")]
    pub key: Option<String>,

    /// Image that carries the watermark
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// One of visible, invisible_lsb, invisible_dct, invisible_dwt
    #[arg(short, long, value_name = "variant", default_value = "invisible_lsb")]
    pub variant: Variant,

    /// Print the verification report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RecoverArgs {
    /// Returns whether the watermark verified.
    pub fn run(self, options: CodecOptions) -> CliResult<bool> {
        let key = if self.key.is_none() && self.variant.requires_key() {
            crate::cli::ask_for_key(false)
        } else {
            self.key
        };

        let result = stegmark_core::commands::recover(&self.media, self.variant, key, options)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result.report())?);
        } else {
            print_report(&result);
        }

        Ok(result.is_valid)
    }
}

fn print_report(result: &VerificationResult) {
    match result.status() {
        VerificationStatus::Authentic => println!("Watermark is authentic"),
        VerificationStatus::HashMismatch => {
            println!("Watermark found, but the integrity hash does not match the key")
        }
        VerificationStatus::NotTerminated => println!("No watermark found"),
        VerificationStatus::Unparsed => println!("Unreadable watermark data"),
    }

    if result.record().is_some() {
        println!("User:      {}", result.user_id().unwrap_or_default());
        if let Some(timestamp) = result.timestamp() {
            println!("Timestamp: {}", timestamp.to_rfc3339());
        }
        println!("Text:      {}", result.text().unwrap_or_default());
    } else if !result.raw.is_empty() {
        println!("Raw data:  {:?}", result.raw_preview(RAW_PREVIEW_CHARS));
    }
}
