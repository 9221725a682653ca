mod check;
mod export;

use anyhow::Result;
use clap::{Parser, Subcommand};
use staffsearch_common::{logger, AppConfig};
use staffsearch_embedding::{EmbeddingProvider, OpenAiEmbedder};
use staffsearch_source::source_from_config;
use staffsearch_vector::SearchEngine;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "staffsearch")]
#[command(about = "staffsearch - semantic search over employee records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Index employees and start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Verify configuration, record source and embedding provider
    Check,

    /// Write the OpenAPI document to disk for agent tool import
    Openapi {
        /// JSON output path
        #[arg(long, default_value = "openapi.json")]
        out: PathBuf,

        /// Also write a YAML copy to this path
        #[arg(long)]
        yaml: Option<PathBuf>,

        /// Server URL to advertise (defaults to PUBLIC_URL or the bind address)
        #[arg(long)]
        server_url: Option<String>,
    },
}

/// Build the index, then serve. Any indexing error aborts startup.
async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }

    logger::setup_logging(&config.log_dir, &config.log_level)?;
    config.validate()?;

    tracing::info!("staffsearch starting...");
    tracing::info!("  Bind address: {}", config.server_bind_address());
    tracing::info!("  Embedding model: {} ({} dims)", config.embedding_model, config.embedding_dim);

    let source = source_from_config(&config)?;
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::from_config(&config)?);

    let engine = match SearchEngine::build(source.as_ref(), embedder, config.embedding_dim).await {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!("Error during startup indexing: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Indexed {} employees", engine.employee_count());

    staffsearch_server::start_server(config, engine).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Check) => {
            logger::setup_console_logging(&config.log_level)?;
            check::run(&config).await
        }
        Some(Commands::Openapi { out, yaml, server_url }) => {
            export::write_openapi(&config, server_url.as_deref(), &out, yaml.as_deref())
        }
        None => serve(config, None, None).await,
    }
}
