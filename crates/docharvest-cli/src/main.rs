//! docharvest - batch document ingestion into a single text corpus
//!
//! Reads files, directories, and ZIP archives, extracts their text through
//! the format dispatcher (with OCR for images), and writes the aggregated
//! corpus to stdout or a file. Per-file status goes to stderr so the corpus
//! on stdout stays clean for piping.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use docharvest_extract::ExtractOptions;
use docharvest_pipeline::IngestPipeline;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docharvest",
    version,
    about = "Normalize heterogeneous business documents into one text corpus"
)]
struct Cli {
    /// Files, directories, or .zip archives to ingest, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the corpus to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write per-file extraction results (including errors) as JSON
    #[arg(long, value_name = "FILE")]
    results_json: Option<PathBuf>,

    /// Tesseract language code for OCR
    #[arg(long, default_value = "eng")]
    ocr_language: String,

    /// Skip OCR for images embedded in word-processor documents
    #[arg(long)]
    no_embedded_ocr: bool,

    /// Suppress the per-file summary on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let options = ExtractOptions::default()
        .with_ocr_language(cli.ocr_language.clone())
        .with_embedded_image_ocr(!cli.no_embedded_ocr);

    let pipeline = IngestPipeline::new(options);
    let corpus = pipeline.ingest(&cli.inputs);

    if !cli.quiet {
        print_summary(&corpus);
    }

    if let Some(path) = &cli.results_json {
        let file = fs::File::create(path)
            .with_context(|| format!("could not create {}", path.display()))?;
        serde_json::to_writer_pretty(file, corpus.entries())
            .context("could not serialize extraction results")?;
    }

    match &cli.output {
        Some(path) => fs::write(path, corpus.text())
            .with_context(|| format!("could not write corpus to {}", path.display()))?,
        None => print!("{}", corpus.text()),
    }

    Ok(())
}

fn print_summary(corpus: &docharvest_pipeline::Corpus) {
    for entry in corpus.entries() {
        match &entry.result.error {
            None => {
                let chars = entry.result.content.chars().count();
                eprintln!("{} {} ({chars} chars)", "ok".green().bold(), entry.name);
            }
            Some(error) => {
                eprintln!("{} {}: {error}", "failed".red().bold(), entry.name);
            }
        }
    }

    let failed = corpus.failures().count();
    let total = corpus.entries().len();
    eprintln!(
        "{} {total} file(s), {failed} failed",
        "processed".bold()
    );
}
