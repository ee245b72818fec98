//! U-Takeoff command-line extractor

mod io;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use u_takeoff_d2::{Extractor, TakeoffConfig};

#[derive(Parser)]
#[command(name = "takeoff")]
#[command(about = "Extract a piece catalogue from a worktop template drawing")]
#[command(version)]
struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More progress output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pieces from a JSON drawing-entity dump
    Extract {
        /// Path to the drawing entities (JSON)
        input: PathBuf,

        /// Configuration file (JSON); defaults are used for missing fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file for the catalogue (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for every enumerated loop (JSON)
        #[arg(long)]
        loops: Option<PathBuf>,
    },

    /// Print the default configuration
    DefaultConfig {
        /// Output file (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(logging::level_for(cli.quiet, cli.verbose));

    match cli.command {
        Commands::Extract {
            input,
            config,
            output,
            loops,
        } => {
            let config = match config {
                Some(path) => io::load_config(&path)?,
                None => TakeoffConfig::default(),
            };
            let entities = io::load_entities(&input)?;
            log::info!("Read {} entities from {}", entities.len(), input.display());

            let extraction = Extractor::new(config).extract_entities(&entities)?;
            let summary = &extraction.summary;
            log::info!(
                "Extracted {} pieces ({} cutouts, {} drill holes) in {} ms",
                summary.pieces,
                summary.holes_assigned,
                summary.drill_holes_assigned,
                summary.computation_time_ms
            );
            for (category, count) in &extraction.catalogue.category_counts {
                log::info!("  {:<12} {}", category, count);
            }

            io::write_json(&extraction.catalogue, output.as_deref())?;
            if let Some(path) = output {
                log::info!("Catalogue saved to: {}", path.display());
            }
            if let Some(path) = loops {
                io::write_json(&extraction.loops, Some(&path))?;
                log::info!("Debug loops saved to: {}", path.display());
            }
        }

        Commands::DefaultConfig { output } => {
            io::write_json(&TakeoffConfig::default(), output.as_deref())?;
        }
    }

    Ok(())
}
