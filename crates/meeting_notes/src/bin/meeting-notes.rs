use std::{
    io::{Read, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::{stream, StreamExt};
use meeting_notes::{
    heuristics, openai::OpenAIClient, tracing::init_tracing_subscriber, AnalysisEngine,
    AnalysisEngineBuilder, AnalysisResult, Transcript,
};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "meeting-notes", about = "Meeting transcript analyzer")]
struct Cli {
    /// OpenAI API key; without one, analysis runs locally
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    /// Chat completions model
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    base_url: String,

    /// Seconds to wait for the model before falling back to local analysis
    #[arg(long, env = "ANALYSIS_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one transcript and print the result as JSON
    Analyze {
        /// Transcript file; reads stdin when omitted
        path: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Re-analyze many transcripts, printing one JSON line per file
    Batch {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Maximum model requests in flight
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },
}

#[derive(Serialize)]
struct BatchLine<'a> {
    path: &'a PathBuf,
    analysis: AnalysisResult,
}

fn read_transcript(path: Option<&PathBuf>) -> anyhow::Result<Transcript> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read transcript from stdin")?;
            text
        }
    };

    Ok(Transcript::parse(text)?)
}

fn print_batch(results: Vec<(&PathBuf, AnalysisResult)>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for (path, analysis) in results {
        serde_json::to_writer(&mut stdout, &BatchLine { path, analysis })?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Reads every batch file, skipping the ones that cannot be used.
fn load_batch(paths: &[PathBuf]) -> Vec<(&PathBuf, Transcript)> {
    paths
        .iter()
        .filter_map(|path| match read_transcript(Some(path)) {
            Ok(transcript) => Some((path, transcript)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping transcript");
                None
            }
        })
        .collect()
}

async fn run_batch(
    engine: &AnalysisEngine<OpenAIClient>,
    paths: &[PathBuf],
    concurrency: usize,
) -> anyhow::Result<()> {
    let transcripts = load_batch(paths);

    let results = if engine.is_delegating() {
        stream::iter(transcripts)
            .map(|(path, transcript)| async move { (path, engine.analyze(&transcript).await) })
            .buffered(concurrency.max(1))
            .collect::<Vec<_>>()
            .await
    } else {
        transcripts
            .par_iter()
            .map(|(path, transcript)| (*path, heuristics::analyze(transcript)))
            .collect::<Vec<_>>()
    };

    tracing::info!(
        count = results.len(),
        skipped = paths.len() - results.len(),
        "Batch analysis complete"
    );
    print_batch(results)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let generator = cli
        .openai_key
        .filter(|key| !key.trim().is_empty())
        .map(|key| {
            OpenAIClient::new(key)
                .with_base_url(&cli.base_url)
                .with_model(&cli.model)
        });

    let engine = AnalysisEngineBuilder::new()
        .maybe_generator(generator)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build();
    tracing::info!(
        delegating = engine.is_delegating(),
        model = engine.model().unwrap_or("none"),
        "Analysis engine ready"
    );

    match cli.command {
        Command::Analyze { path, pretty } => {
            let transcript = read_transcript(path.as_ref())?;
            let result = engine.run(&transcript).await.into_result();
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
        Command::Batch { paths, concurrency } => {
            run_batch(&engine, &paths, concurrency).await?;
        }
    }

    Ok(())
}
