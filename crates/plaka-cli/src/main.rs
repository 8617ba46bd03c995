//! Plaka Checker - license plate extraction and classification
//!
//! A CLI tool that reads license plates from images and video frame
//! sequences via external detector/recognizer tools, and classifies them
//! under the Turkish plate grammar.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
