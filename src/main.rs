mod commands;

use crate::commands::{catalog, info, legend, style, sync, CommandResult, ViewArgs};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "election-map", about = "Style Moscow election results for map rendering")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the fill and stroke of every feature in a collection.
    Style {
        /// Report output path
        output: PathBuf,
        /// GeoJSON input (.geojson or .geojson.gz); defaults to the catalog dataset
        #[clap(long)]
        input: Option<PathBuf>,
        #[clap(flatten)]
        view: ViewArgs,
    },
    /// Build legend levels and swatches for a collection.
    Legend {
        /// GeoJSON input; defaults to the catalog dataset
        #[clap(long)]
        input: Option<PathBuf>,
        /// Write the legend report as JSON
        #[clap(long)]
        output: Option<PathBuf>,
        #[clap(flatten)]
        view: ViewArgs,
    },
    /// Print the result breakdown of one district or precinct.
    Info {
        /// GeoJSON input; defaults to the catalog dataset
        #[clap(long)]
        input: Option<PathBuf>,
        /// Precinct number
        #[clap(long)]
        uik: Option<String>,
        /// District name
        #[clap(long)]
        name: Option<String>,
        /// Print the panel as JSON
        #[clap(long)]
        json: bool,
        #[clap(flatten)]
        view: ViewArgs,
    },
    /// Dump the election catalog.
    Catalog {
        /// Catalog file to read instead of the built-in one
        #[clap(long)]
        source: Option<PathBuf>,
        /// Output path; prints to stdout when omitted
        output: Option<PathBuf>,
    },
    /// Fingerprint dataset files and record the hashes in a catalog file.
    Sync {
        /// Catalog file (created from the built-in catalog if missing)
        catalog_path: PathBuf,
        /// Dataset directory
        data_dir: PathBuf,
    },
}

fn run(command: Command) -> CommandResult {
    match command {
        Command::Style {
            output,
            input,
            view,
        } => style(input.as_deref(), &output, &view),
        Command::Legend {
            input,
            output,
            view,
        } => legend(input.as_deref(), output.as_deref(), &view),
        Command::Info {
            input,
            uik,
            name,
            json,
            view,
        } => info(
            input.as_deref(),
            uik.as_deref(),
            name.as_deref(),
            json,
            &view,
        ),
        Command::Catalog { source, output } => catalog(source.as_deref(), output.as_deref()),
        Command::Sync {
            catalog_path,
            data_dir,
        } => sync(&catalog_path, &data_dir),
    }
}

fn main() {
    let opts = Opts::parse();

    if let Err(e) = run(opts.command) {
        eprintln!("{} {}", "❌ Failed:".red().bold(), e);
        std::process::exit(1);
    }
}
