use clap::Parser;
use miette::Result;
use mojipack::cli::Cli;
use mojipack::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    mojipack::cli::build::run(cli.build, &printer)?;

    Ok(())
}
