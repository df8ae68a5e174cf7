use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use simcheck::{format_score, io, EngineOptions, SimilarityEngine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 原文と候補文の類似度を計算して結果ファイルに書き出す
#[derive(Debug, Parser)]
#[command(name = "simcheck", version, about = "Score how similar a candidate document is to an original")]
struct Cli {
    /// Original document (UTF-8)
    original: PathBuf,
    /// Candidate document (UTF-8)
    candidate: PathBuf,
    /// Where the score is written
    output: PathBuf,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Disable the segmentation cache
    #[arg(long)]
    no_cache: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simcheck=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<f64> {
    let mut options = EngineOptions::load(cli.config.as_deref()).context("loading config")?;
    if cli.no_cache {
        options.cache_enabled = false;
    }

    // 読み込みに失敗したら何も書かない
    let original = io::read_document(&cli.original).context("reading original")?;
    let candidate = io::read_document(&cli.candidate).context("reading candidate")?;

    let engine = SimilarityEngine::new(options)?;
    let score = engine.score(&original, &candidate)?;
    io::write_score(&cli.output, score).context("writing score")?;
    Ok(score)
}

fn main() -> ExitCode {
    // clap exits with code 2 on bad arguments
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(score) => {
            info!(similarity = %format_score(score), output = %cli.output.display(), "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
