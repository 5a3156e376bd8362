use std::fs::{canonicalize, create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use gds21::GdsLibrary;

use crate::cli::args::{Args, Command};
use crate::config::{parse_showcase_config, ShowcaseConfig};
use crate::inspect;
use crate::paths::out_gds;
use crate::showcase::{build_showcase, ShowcaseParams};
use crate::{anyhow, Result};

pub mod args;

pub const BANNER: &str = r"
        _          _
  _ __ (_) ___ ___| |__   _____      __
 | '_ \| |/ __/ __| '_ \ / _ \ \ /\ / /
 | |_) | | (__\__ \ | | | (_) \ V  V /
 | .__/|_|\___|___/_| |_|\___/ \_/\_/
 |_|

PICSHOW v0.1
";

pub fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Showcase {
            components,
            config,
            output_dir,
        } => run_showcase(components, config, output_dir),
        Command::Dump { gds_file, output } => run_dump(gds_file, output),
    }
}

fn run_showcase(
    components: PathBuf,
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    println!("{BANNER}");

    let config = match config {
        Some(path) => {
            let path = canonicalize(path)?;
            println!("Configuration file: {path:?}");
            parse_showcase_config(&path)?
        }
        None => ShowcaseConfig::default(),
    };

    println!("Reading component library...\n");
    let source = load_gds(&components)?;

    let params = if config.components.is_empty() {
        let mut params = ShowcaseParams::for_library(&source);
        params.name = config.name;
        params.grid = config.grid;
        params
    } else {
        ShowcaseParams {
            name: config.name,
            grid: config.grid,
            entries: config.components,
        }
    };

    println!("Showcase parameters:");
    println!("\tName: {}", params.name);
    println!("\tComponents: {}", params.entries.len());
    println!("\tGrid columns: {}", params.grid.max_cols);
    println!(
        "\tGrid pitch: {} x {}",
        params.grid.x_spacing, params.grid.y_spacing
    );

    let lib = build_showcase(&source, &params)?;

    let work_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
    create_dir_all(&work_dir)?;
    let gds_path = out_gds(&work_dir, &params.name);
    lib.save(&gds_path)
        .map_err(|e| anyhow!("failed to write GDS file {gds_path:?}: {e:?}"))?;
    println!("\nShowcase saved to: {gds_path:?}");

    Ok(())
}

fn load_gds(path: &std::path::Path) -> Result<GdsLibrary> {
    GdsLibrary::load(path).map_err(|e| anyhow!("failed to read GDS library {path:?}: {e:?}"))
}

fn run_dump(gds_file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let lib = load_gds(&gds_file)?;

    match output {
        Some(path) => {
            // Scope the file handle so it is closed even if a write fails.
            let file = File::create(&path)
                .map_err(|e| anyhow!("failed to create log file {path:?}: {e}"))?;
            let mut out = BufWriter::new(file);
            inspect::dump(&lib, &mut out)?;
            out.flush()?;
            log::info!("report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            inspect::dump(&lib, &mut out)?;
        }
    }

    Ok(())
}
