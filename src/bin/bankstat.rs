//! Server binary for bankstat.
//!
//! A thin shim over the library crate: maps CLI flags and environment
//! variables to an `AnalysisConfig`, then either serves the HTTP API or —
//! with `--analyze-file` — runs one analysis locally and prints the JSON
//! report.

use anyhow::{Context, Result};
use bankstat::api::{router, AppState};
use bankstat::config::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use bankstat::{analyze, AnalysisConfig};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bankstat", version, about = "Bank statement analysis over LLMs")]
struct Cli {
    /// Address and port the HTTP server binds to.
    #[arg(long, default_value = "0.0.0.0:8000", env = "BANKSTAT_BIND")]
    bind: String,

    /// Model identifier sent to the completions API.
    #[arg(long, default_value = DEFAULT_MODEL, env = "BANKSTAT_MODEL")]
    model: String,

    /// Base URL of the OpenAI-compatible completions API.
    #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "BANKSTAT_API_BASE_URL")]
    api_base_url: String,

    /// API credential for the completions provider.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Directory uploaded files are saved into.
    #[arg(long, default_value = "uploads", env = "BANKSTAT_UPLOAD_DIR")]
    upload_dir: PathBuf,

    /// Per-call timeout for the completions API, in seconds.
    #[arg(long, default_value_t = 120, env = "BANKSTAT_API_TIMEOUT_SECS")]
    api_timeout_secs: u64,

    /// Analyse a local PDF and print the JSON report instead of serving.
    #[arg(long, value_name = "PDF")]
    analyze_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials commonly live in a local .env during development.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = AnalysisConfig::builder()
        .model(cli.model)
        .api_base_url(cli.api_base_url)
        .api_key(cli.api_key)
        .upload_dir(cli.upload_dir)
        .api_timeout_secs(cli.api_timeout_secs)
        .build()
        .context("invalid configuration")?;

    let state = AppState::new(config);

    if let Some(path) = cli.analyze_file {
        let output = analyze(&path, &state.config, &state.http)
            .await
            .with_context(|| format!("failed to analyse {}", path.display()))?;

        let mut value = serde_json::to_value(&output.report)?;
        value["costing"] = serde_json::to_value(&output.costing)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let app = router(state);
    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
