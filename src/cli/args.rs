use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate PIC component showcase layouts and inspect GDS files.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template(
        "{before-help}{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
    )
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Arrange component cells from a GDS library into a labeled showcase grid.
    Showcase {
        /// Path to the GDS library providing the component cells.
        components: PathBuf,

        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to which output files should be saved.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the structure of a GDS file.
    Dump {
        /// Path to the GDS file to read.
        gds_file: PathBuf,

        /// Path to log file (default: print to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
