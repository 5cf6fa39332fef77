use std::path::PathBuf;

use clap::Parser;
use plane_to_linear::config::DEFAULT_CONFIG_PATH;
use plane_to_linear::convert::{self, ConvertOptions};
use plane_to_linear::{Result, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.verbose)?;
    let options = ConvertOptions::new(cli.input, cli.output).with_config(cli.config);
    convert::convert(&options)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert a Plane CSV export into a Linear CSV import file.",
    override_usage = "plane-to-linear --input <plane.csv> --output <linear.csv> [--config <config.json>]"
)]
struct Cli {
    /// Path to input Plane CSV file.
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output Linear CSV file.
    #[arg(short, long)]
    output: PathBuf,

    /// Path to JSON config file for user email mappings.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}
