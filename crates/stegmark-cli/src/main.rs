use std::process::ExitCode;

use clap::Parser;
use stegmark_core::{CodecOptions, StegmarkError};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, StegmarkError>;

fn main() -> CliResult<ExitCode> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = CodecOptions::default().with_scan_limit(args.scan_limit);

    match args.command {
        Commands::Embed(embed) => embed.run(options)?,
        Commands::Recover(recover) => {
            if !recover.run(options)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::UnveilRaw(unveil_raw) => unveil_raw.run(options)?,
    }

    Ok(ExitCode::SUCCESS)
}
