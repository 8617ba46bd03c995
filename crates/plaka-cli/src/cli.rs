//! CLI definition using clap

use clap::{Parser, Subcommand};
use plaka_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plaka-checker")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "License plate extraction and classification")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// External detector command override
    #[arg(long, global = true)]
    pub detector: Option<String>,

    /// External recognizer command override
    #[arg(long, global = true)]
    pub recognizer: Option<String>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect and read plates in a single image
    Image {
        /// Path to image file
        image: PathBuf,

        /// Write the annotated image to this path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Use the legacy single-image grammar (Standard and Police only)
        #[arg(long)]
        legacy_grammar: bool,
    },

    /// Read plates from a video given as a directory of extracted frames
    Video {
        /// Path to the frame directory
        frames: PathBuf,
    },

    /// Normalize and classify a raw plate string
    Classify {
        /// Recognized plate text (e.g. "TR 34 ABC 123")
        text: String,

        /// Use the legacy single-image grammar (Standard and Police only)
        #[arg(long)]
        legacy_grammar: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}
