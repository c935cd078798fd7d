//! CLI interface for Weft

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Continuously morphing wavetable texture synthesizer
#[derive(Parser)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play the morphing texture in real time
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "weft.yaml")]
        config: PathBuf,
    },

    /// Render to a WAV file
    Record {
        /// Configuration file path
        #[arg(short, long, default_value = "weft.yaml")]
        config: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "60")]
        duration: u64,
    },

    /// List available audio output devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "weft.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
