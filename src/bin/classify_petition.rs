//! classify-petition: one-shot petition triage.
//!
//! Takes a base64-encoded JSON payload, prints exactly one JSON envelope on
//! stdout and exits 0 on success, 1 on any failure. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches, Parser};
use clap::error::ErrorKind;
use tracing::debug;

use petition_classifier::driver;
use petition_classifier::{BackendKind, Config, ConfigOverrides, Envelope};

/// Classify a petition's severity and department.
#[derive(Parser)]
#[command(name = "classify-petition")]
#[command(about = "Zero-shot severity and department triage for petitions")]
struct Args {
    /// Base64-encoded JSON: {"query": ..., "categories": [...], "need_department": bool}
    payload: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, env = "PETITION_CLASSIFIER_CONFIG")]
    config: Option<PathBuf>,

    /// Classification backend.
    #[arg(short, long, value_enum, env = "PETITION_CLASSIFIER_BACKEND")]
    backend: Option<BackendKind>,

    /// Model for the selected backend.
    #[arg(short, long, env = "PETITION_CLASSIFIER_MODEL")]
    model: Option<String>,

    /// Inference API base URL (remote backend).
    #[arg(long, env = "PETITION_CLASSIFIER_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (remote backend).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return emit(Envelope::failure(clap_message(&e))),
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => return emit(Envelope::from(e)),
    };

    init_tracing(&config.log_filter);
    debug!(version = petition_classifier::version_string(), "classify-petition starting");

    emit(driver::execute(args.payload.as_deref(), &config).await)
}

/// Parse arguments, reporting the git-enriched version for `--version`.
fn parse_args() -> Result<Args, clap::Error> {
    let matches = Args::command()
        .version(petition_classifier::version_string())
        .try_get_matches()?;
    Args::from_arg_matches(&matches)
}

fn load_config(args: &Args) -> petition_classifier::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(ConfigOverrides {
        backend: args.backend,
        model: args.model.clone(),
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout_secs,
    });
    Ok(config)
}

/// Logs go to stderr; stdout carries only the envelope.
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit(envelope: Envelope) -> ExitCode {
    println!("{}", envelope.to_json());
    ExitCode::from(envelope.exit_code())
}

/// First line of a clap error, without the `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments");
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
