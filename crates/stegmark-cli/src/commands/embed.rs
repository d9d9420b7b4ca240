use std::path::PathBuf;

use clap::Args;
use stegmark_core::{CodecOptions, OverlayOptions, Position, Variant};

use crate::CliResult;

/// Embeds a signed watermark into a PNG or JPEG image, the result is always PNG
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Secret key that decides the pixel order and signs the record
    #[arg(short, long, value_name = "key")]
    pub key: Option<String>,

    /// Carrier image, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Watermarked image will be stored as PNG file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// Text carried by the watermark, required for the visible variant
    #[arg(short, long, value_name = "text")]
    pub text: Option<String>,

    /// One of visible, invisible_lsb, invisible_dct, invisible_dwt
    #[arg(short, long, value_name = "variant", default_value = "invisible_lsb")]
    pub variant: Variant,

    /// Visible overlay anchor: center, topLeft, topRight, bottomLeft, bottomRight
    #[arg(long, value_name = "position", default_value = "center")]
    pub position: Position,

    /// Visible overlay opacity within (0, 1]
    #[arg(long, value_name = "opacity", default_value_t = 0.5)]
    pub opacity: f32,

    /// Visible overlay font size in pixels, defaults to 5% of the image width
    #[arg(long, value_name = "pixels")]
    pub font_size: Option<u32>,
}

impl EmbedArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let key = if self.key.is_none() && self.variant.requires_key() {
            crate::cli::ask_for_key(true)
        } else {
            self.key
        };
        let overlay = OverlayOptions::default()
            .with_position(self.position)
            .with_opacity(self.opacity)
            .with_font_size(self.font_size);

        let record = stegmark_core::commands::embed(
            &self.media,
            &self.write_to_file,
            self.variant,
            self.text,
            key,
            overlay,
            options,
        )?;
        println!("{}", record.to_payload()?);

        Ok(())
    }
}
