//! Scribecheck - Main Entry Point
//!
//! Validates responses of the audio transcription endpoint, either from a
//! recorded response file or by calling the live service.

mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scribecheck_application::{CheckHealth, ProbeEndpoint, ValidateResponse};
use scribecheck_domain::{EndpointMode, EndpointResponse, RecordedResponse};
use scribecheck_infrastructure::{
    AppConfig, FileVariableStore, HtmlReportRenderer, ReqwestEndpointProber, SystemClock,
    report_json, write_report,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scribecheck", version)]
#[command(about = "Validate responses of the audio transcription endpoint")]
struct Cli {
    /// Config file (default: ./scribecheck.{toml,yaml,json} if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a recorded response (`{"status", "elapsedMillis", "body"}`).
    Check {
        /// Recorded response file.
        response: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Upload an audio file to the live service and validate the response.
    Probe {
        /// Audio file to upload.
        #[arg(long)]
        file: PathBuf,

        /// Service base URL.
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Check the service health endpoint.
    Health {
        /// Service base URL.
        #[arg(long)]
        url: Option<String>,
    },
}

/// Options shared by the validating commands.
#[derive(Args)]
struct RunArgs {
    /// Endpoint variant: `full` or `summary-only`.
    #[arg(long)]
    mode: Option<EndpointMode>,

    /// Variable store file.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Write an HTML report to this file.
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print the full run as JSON instead of the check list.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Check { response, run } => {
            let document = tokio::fs::read_to_string(&response)
                .await
                .with_context(|| format!("Failed to read {}", response.display()))?;
            let recorded = RecordedResponse::parse(&document)
                .with_context(|| format!("Invalid recorded response in {}", response.display()))?;
            validate(config, EndpointResponse::from(recorded), &run).await
        }
        Command::Probe { file, url, run } => {
            let prober = prober(&config, url.as_deref())?;
            let mode = run.mode.unwrap_or(config.validation.mode);
            let response = ProbeEndpoint::new(prober)
                .execute(&file, mode)
                .await
                .context("Probe failed")?;
            validate(config, response, &run).await
        }
        Command::Health { url } => {
            let health = CheckHealth::new(prober(&config, url.as_deref())?)
                .execute()
                .await
                .context("Health check failed")?;
            println!(
                "{} is {}",
                health.service.as_deref().unwrap_or("service"),
                health.status
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn prober(config: &AppConfig, url: Option<&str>) -> Result<ReqwestEndpointProber> {
    let base_url = url.unwrap_or(&config.probe.base_url);
    Ok(ReqwestEndpointProber::new(base_url, config.probe.timeout_ms)?)
}

async fn open_store(path: Option<&Path>) -> Result<FileVariableStore> {
    let store = match path {
        Some(path) => FileVariableStore::open(path).await?,
        None => FileVariableStore::open_default().await?,
    };
    Ok(store)
}

async fn validate(mut config: AppConfig, response: EndpointResponse, args: &RunArgs) -> Result<ExitCode> {
    if let Some(mode) = args.mode {
        config.validation.mode = mode;
    }
    let store_path = args.store.clone().or(config.store.path);

    let mut store = open_store(store_path.as_deref())
        .await
        .context("Failed to open variable store")?;
    let use_case = ValidateResponse::new(
        config.validation,
        SystemClock::new(),
        HtmlReportRenderer::default(),
    );

    let run = use_case.execute(&response, &mut store);
    store.flush().await.context("Failed to save variable store")?;

    if args.json {
        print!("{}", report_json(&run)?);
    } else {
        print!("{}", output::render_terminal(&run));
    }

    if let Some(path) = &args.html {
        let page = HtmlReportRenderer::document(&run.report, run.visualization.as_ref())?;
        write_report(path, &page).await?;
        info!(path = %path.display(), "HTML report written");
    }

    Ok(if run.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
