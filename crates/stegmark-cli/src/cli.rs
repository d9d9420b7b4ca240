use clap::{Parser, Subcommand};
use dialoguer::Password;
use stegmark_core::media::codec_options::DEFAULT_SCAN_LIMIT;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: maximum number of pixels read while looking for a watermark
    #[arg(long = "x-scan-limit", default_value_t = DEFAULT_SCAN_LIMIT)]
    pub scan_limit: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Embed(embed::EmbedArgs),
    Recover(recover::RecoverArgs),
    UnveilRaw(unveil_raw::UnveilRawArgs),
}

/// Prompts for the secret key with masked input, `None` if the prompt fails.
pub fn ask_for_key(confirm: bool) -> Option<String> {
    let mut prompt = Password::new().with_prompt("Secret key");
    if confirm {
        prompt = prompt.with_confirmation("Repeat secret key", "Error: the keys don't match.");
    }

    prompt.interact().ok()
}
