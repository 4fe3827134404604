pub mod build;

use clap::Parser;

/// mojipack - Emoji picker bundle builder
#[derive(Parser, Debug)]
#[command(name = "mojipack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub build: build::BuildArgs,
}
