//! Command handlers

use std::path::{Path, PathBuf};

use base64::Engine;
use indicatif::ProgressBar;

use plaka_app::{Config, ExtractionPipeline, PipelineOptions};
use plaka_domain::{classify_text, GrammarProfile};
use plaka_infra::{CommandPlateDetector, CommandTextRecognizer, FrameDirSource};
use plaka_types::{Error, Result};
use plaka_vision::VideoSource;

use crate::cli::{Cli, Commands};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Image {
            ref image,
            ref output,
            legacy_grammar,
        } => {
            let pipeline = build_pipeline(&cli, &config, legacy_grammar)?;
            run_image(&pipeline, image, output.as_deref(), format)
        }
        Commands::Video { ref frames } => {
            let mut pipeline = build_pipeline(&cli, &config, false)?;
            run_video(&mut pipeline, frames, format)
        }
        Commands::Classify {
            ref text,
            legacy_grammar,
        } => {
            let result = classify_text(text, grammar_profile(&config, legacy_grammar));
            output::print_classification(format, &result)
        }
        Commands::Config { show, init } => run_config(show, init),
    }
}

fn grammar_profile(config: &Config, legacy_grammar: bool) -> GrammarProfile {
    if legacy_grammar {
        GrammarProfile::ImageLegacy
    } else {
        config.grammar_profile
    }
}

type CommandPipeline = ExtractionPipeline<CommandPlateDetector, CommandTextRecognizer>;

fn build_pipeline(cli: &Cli, config: &Config, legacy_grammar: bool) -> Result<CommandPipeline> {
    let detector_command = cli
        .detector
        .clone()
        .or_else(|| config.detector_command.clone())
        .ok_or_else(|| {
            Error::Detector(
                "no detector command configured; set detector_command or pass --detector".into(),
            )
        })?;
    let recognizer_command = cli
        .recognizer
        .clone()
        .or_else(|| config.recognizer_command.clone())
        .ok_or_else(|| {
            Error::Recognizer(
                "no recognizer command configured; set recognizer_command or pass --recognizer"
                    .into(),
            )
        })?;

    let detector = CommandPlateDetector::new(detector_command, config.min_confidence)
        .with_verbose(cli.verbose);
    let recognizer = CommandTextRecognizer::new(recognizer_command).with_verbose(cli.verbose);

    let options = PipelineOptions::default()
        .with_grammar_profile(grammar_profile(config, legacy_grammar))
        .with_context_padding(config.context_padding);
    Ok(ExtractionPipeline::new(detector, recognizer).with_options(options))
}

fn run_image(
    pipeline: &CommandPipeline,
    image: &Path,
    output: Option<&Path>,
    format: plaka_types::OutputFormat,
) -> Result<()> {
    if !image.exists() {
        return Err(Error::FileNotFound(image.display().to_string()));
    }
    let bytes = std::fs::read(image)?;
    let report = pipeline.process_image(&bytes)?;

    if let Some(path) = output {
        save_data_uri(&report.image, path)?;
    }

    output::print_image_report(format, &report)
}

/// Feeds frames through while advancing a progress bar
struct ProgressSource<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: VideoSource> VideoSource for ProgressSource<S> {
    fn next_frame(&mut self) -> Result<Option<image::RgbImage>> {
        let frame = self.inner.next_frame()?;
        if frame.is_some() {
            self.bar.inc(1);
        }
        Ok(frame)
    }
}

fn run_video(
    pipeline: &mut CommandPipeline,
    frames: &PathBuf,
    format: plaka_types::OutputFormat,
) -> Result<()> {
    let source = FrameDirSource::open(frames)?;
    let bar = ProgressBar::new(source.frame_count() as u64);

    let mut source = ProgressSource { inner: source, bar };
    let readings = pipeline.process_video(&mut source);
    source.bar.finish_and_clear();

    output::print_track_readings(format, &readings?)
}

fn run_config(show: bool, init: bool) -> Result<()> {
    if init {
        let config = Config::default();
        config.save()?;
        println!("Wrote default config to {}", Config::config_path()?.display());
        return Ok(());
    }

    let _ = show;
    let config = Config::load()?;
    println!("Config file: {}", Config::config_path()?.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Decode a base64 data URI back to raw bytes and write it to disk
fn save_data_uri(data_uri: &str, path: &Path) -> Result<()> {
    let encoded = data_uri
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .unwrap_or(data_uri);
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| Error::InvalidImageFormat(e.to_string()))?;
    std::fs::write(path, bytes)?;
    Ok(())
}
