//! Command-line arguments of the replay driver.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hvacdraw")]
#[command(version, about = "Replay a pointer script against an HVAC diagram scene", long_about = None)]
pub struct Cli {
    /// Scene JSON with the shapes to edit
    #[arg(value_name = "SCENE")]
    pub scene: PathBuf,

    /// Action script JSON
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Document config (.toml or .json); the platform default otherwise
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
