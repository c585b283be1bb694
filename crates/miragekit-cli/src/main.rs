//! `miragekit`: compare context-retention policies at a chosen retention.

#![forbid(unsafe_code)]

mod render;
mod sinks;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use miragekit_core::config::defaults::{DEFAULT_BENCHMARK_FILENAME, DEFAULT_CERTIFICATE_FILENAME};
use miragekit_core::config::MiragekitConfig;
use miragekit_core::constants::VERSION;
use miragekit_core::errors::MiragekitError;
use miragekit_core::traits::EvaluationSink;
use miragekit_observability::init_tracing_with_config;
use miragekit_session::{load_certificate_raw, load_replay, MirageSession, SinkDispatcher};

use crate::sinks::{JsonSink, TextSink};

/// Exit code for a source document that failed to load.
const EXIT_LOAD_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "miragekit", version = VERSION)]
#[command(about = "Compare recency and guarded context-retention policies")]
struct Cli {
    /// Benchmark document.
    #[arg(long, global = true, default_value = DEFAULT_BENCHMARK_FILENAME)]
    benchmark: PathBuf,

    /// Audit certificate document.
    #[arg(long, global = true, default_value = DEFAULT_CERTIFICATE_FILENAME)]
    certificate: PathBuf,

    /// Optional TOML config; `MIRAGEKIT_*` variables override it.
    #[arg(long, global = true, env = "MIRAGEKIT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate both policies at one retention percent.
    Eval {
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// Evaluate a range of retention percents.
    Sweep {
        #[arg(long, default_value_t = 0)]
        start: u8,
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
        end: u8,
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=100))]
        step: u8,
    },
    /// Show what each policy kept and dropped, plus the witness.
    Audit,
    /// Print the certificate as pretty JSON.
    Certificate,
    /// Cross-check the documents against a replay summary and an optional certificate copy.
    Verify {
        #[arg(long)]
        replay: PathBuf,
        #[arg(long)]
        certificate_copy: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = MiragekitConfig::load(cli.config.as_deref()).context("load configuration")?;
    init_tracing_with_config(&config.observability);

    let sink: Arc<dyn EvaluationSink> = match cli.format {
        OutputFormat::Text => Arc::new(TextSink::stdio()),
        OutputFormat::Json => Arc::new(JsonSink::stdout()),
    };
    let dispatcher = SinkDispatcher::new().with_sink(sink);

    let session =
        match MirageSession::load(&cli.benchmark, &cli.certificate, config, dispatcher).await {
            Ok(session) => session,
            // Already reported through the sink.
            Err(MiragekitError::Load(_)) => return Ok(ExitCode::from(EXIT_LOAD_FAILURE)),
            Err(e) => return Err(e).context("validate documents"),
        };

    match cli.command {
        Command::Eval { percent } => {
            session
                .evaluate_percent(percent)
                .context("evaluate retention")?;
        }
        Command::Sweep { start, end, step } => {
            let evaluations = session.sweep(start, end, step).context("sweep retention")?;
            match cli.format {
                OutputFormat::Text => {
                    for evaluation in &evaluations {
                        println!("{}", render::sweep_row(evaluation));
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&evaluations)?);
                }
            }
        }
        Command::Audit => session.publish_static(),
        Command::Certificate => println!("{}", session.certificate_json()?),
        Command::Verify {
            replay,
            certificate_copy,
        } => return verify(&session, &replay, certificate_copy.as_deref(), cli.format).await,
    }
    Ok(ExitCode::SUCCESS)
}

async fn verify(
    session: &MirageSession,
    replay_path: &Path,
    copy_path: Option<&Path>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let replay = load_replay(replay_path)
        .await
        .with_context(|| format!("load replay summary: {}", replay_path.display()))?;
    let copy = match copy_path {
        Some(path) => Some(
            load_certificate_raw(path)
                .await
                .with_context(|| format!("load certificate copy: {}", path.display()))?,
        ),
        None => None,
    };

    let report = session.integrity_report(&replay, copy.as_ref());
    match format {
        OutputFormat::Text => print!("{}", render::integrity(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
