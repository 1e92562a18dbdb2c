use anyhow::Result;
use clap::{Parser, Subcommand};

use holiday_export::cli::{handle_countries_command, handle_export_command, ExportArgs};
use holiday_export::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "holiday-export",
    version,
    about = "Export holiday calendars to JSON, CSV or YAML",
    long_about = "holiday-export writes the holidays of one or more countries and \
                  years into a single file, optionally reshaping every record \
                  before it is written."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export holidays to a file
    Export(ExportArgs),

    /// List supported countries
    Countries,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Export(args)) => {
            handle_export_command(args)?;
        }
        Some(Commands::Countries) => {
            handle_countries_command()?;
        }
        None => {
            println!("holiday-export - export holiday calendars");
            println!();
            println!("Run 'holiday-export --help' for usage information.");
            println!("Run 'holiday-export export' to export this year's public holidays.");
        }
    }

    Ok(())
}
