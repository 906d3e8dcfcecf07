// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use resume_indexer::utils::logging::{
    LogFormat, format_error, format_field, format_success, init_logger,
};
use resume_indexer::{Config, PageTextNormalizer, PdfExtractor, Services, runtime};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "resume_indexer")]
#[command(version = "0.1.0")]
#[command(about = "Indexes uploaded PDF resumes with key phrases and entities", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Emit one JSON object per log line (always on inside the function runtime)
    #[arg(long, action = ArgAction::SetTrue)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve trigger events from the function runtime (default)
    Serve,

    /// Process one event file against the live services
    Invoke {
        #[arg(short, long, value_name = "FILE")]
        event: PathBuf,
    },

    /// Print the normalized page text of a local PDF without calling any service
    Extract {
        #[arg(long, value_name = "FILE")]
        pdf: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that the search domain answers signed requests
    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(LogFormat::detect(cli.json_logs, cli.color), cli.verbose);

    if let Some(path) = &cli.config {
        info!("Loading configuration from: {}", path.display());
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_config(cli.config.as_deref())?;
            cmd_serve(&config).await?;
        }
        Commands::Invoke { event } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_invoke(&config, &event).await?;
        }
        Commands::Extract { pdf, pretty } => {
            // extraction never talks to the search domain, so a missing host is fine
            let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
                warn!("Falling back to built-in defaults: {}", e);
                Config::default_config()
            });
            cmd_extract(&config, &pdf, pretty)?;
        }
        Commands::Verify => {
            let config = load_config(cli.config.as_deref())?;
            cmd_verify(&config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

async fn cmd_serve(config: &Config) -> Result<()> {
    info!("Starting resume indexer");

    let services = Services::initialize(config)
        .await
        .context("Failed to initialize service clients")?;

    runtime::serve(services.handler())
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Function runtime stopped")?;

    Ok(())
}

async fn cmd_invoke(config: &Config, event_path: &Path) -> Result<()> {
    info!("Processing event from: {}", event_path.display());
    let start_time = Instant::now();

    let raw = std::fs::read_to_string(event_path)
        .with_context(|| format!("Failed to read event file {}", event_path.display()))?;
    let payload: Value = serde_json::from_str(&raw).context("Event file is not valid JSON")?;

    let services = Services::initialize(config)
        .await
        .context("Failed to initialize service clients")?;

    let outcome = match services.handler().handle(&payload).await {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("{}", format_error(&e.to_string()));
            return Err(e).context("Invocation failed");
        }
    };

    println!("{}", format_success(outcome.message()));
    println!(
        "{}",
        format_field(
            "object",
            &format!("s3://{}/{}", outcome.event.bucket, outcome.event.key)
        )
    );
    println!("{}", format_field("document id", &outcome.receipt.document_id));
    println!("{}", format_field("index", &outcome.receipt.index));
    println!(
        "{}",
        format_field("pages", &outcome.document.page_count().to_string())
    );
    println!(
        "{}",
        format_field("key phrases", &outcome.document.key_phrases.len().to_string())
    );
    println!(
        "{}",
        format_field("entity types", &outcome.document.entities.len().to_string())
    );
    println!("{}", format_field("link", &outcome.document.source_link));
    println!(
        "{}",
        format_field("indexed at", &outcome.indexed_at.to_rfc3339())
    );

    info!(
        "Invocation complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn cmd_extract(config: &Config, pdf_path: &Path, pretty: bool) -> Result<()> {
    info!("Extracting page text from: {}", pdf_path.display());

    let document = PdfExtractor::new()
        .open(pdf_path)
        .with_context(|| format!("Failed to open {}", pdf_path.display()))?;
    let normalizer = PageTextNormalizer::new(config.pipeline.max_page_bytes);

    let mut pages = Vec::with_capacity(document.page_count());
    for index in 0..document.page_count() {
        let raw = document
            .page_text(index)
            .with_context(|| format!("Failed to extract page {}", index + 1))?;
        if normalizer.is_truncated(&raw) {
            warn!(page = index + 1, bytes = raw.len(), "Page text truncated");
        }
        pages.push(normalizer.normalize(&raw));
    }

    info!("Extracted {} pages", pages.len());

    let output = if pretty {
        serde_json::to_string_pretty(&pages)?
    } else {
        serde_json::to_string(&pages)?
    };
    println!("{}", output);

    Ok(())
}

async fn cmd_verify(config: &Config) -> Result<()> {
    info!("Verifying search domain at {}", config.search.endpoint());

    let services = Services::initialize(config)
        .await
        .context("Failed to initialize service clients")?;

    if !services.search_health().await? {
        error!("Search domain did not answer the health check");
        println!("{}", format_error("Search domain unreachable"));
        return Err(anyhow::anyhow!("Search domain connection failed"));
    }

    println!("{}", format_success("Search domain reachable"));
    println!("{}", format_field("endpoint", &config.search.endpoint()));
    println!("{}", format_field("index", &config.search.index_name));

    Ok(())
}
