//! RO-Crate Packaging CLI
//!
//! Command-line tool for converting directories into RO-Crates and
//! packaging crates into directories or zip archives.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rocrate_package::{read_crate, CrateError, RoCrate};

#[derive(Parser)]
#[command(name = "rocrate-package")]
#[command(about = "Read, build, and package RO-Crates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a plain directory into an RO-Crate in place
    Convert(ConvertArgs),
    /// Package a crate into an output directory or zip archive
    Save(SaveArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Directory to convert
    dir: PathBuf,
}

#[derive(Args)]
struct SaveArgs {
    /// Directory containing ro-crate-metadata.json
    crate_dir: PathBuf,

    /// Output directory (or archive name stem with --zip)
    output: PathBuf,

    /// Produce a single <output>.zip archive instead of a directory
    #[arg(long)]
    zip: bool,
}

fn run_convert(args: ConvertArgs) -> Result<(), CrateError> {
    let mut rocrate = RoCrate::new();
    rocrate.convert(&args.dir)?;
    eprintln!(
        "Converted {} into an RO-Crate ({} entities)",
        args.dir.display(),
        rocrate.len()
    );
    Ok(())
}

fn run_save(args: SaveArgs) -> Result<(), CrateError> {
    let rocrate = read_crate(&args.crate_dir)?;
    rocrate.save(&args.output, args.zip)?;
    if args.zip {
        eprintln!(
            "Packaged {} into {}.zip",
            args.crate_dir.display(),
            args.output.display()
        );
    } else {
        eprintln!(
            "Packaged {} into {}",
            args.crate_dir.display(),
            args.output.display()
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Save(args) => run_save(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
