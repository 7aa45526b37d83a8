//! CodeCtx CLI - Token-bounded code context assembly for LLM prompts.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use codectx::{
    connector::adapter::{
        embedding_cache::EmbeddingCache, mock_embedding::MockEmbeddingBackend,
        GoogleEmbeddingBackend, HttpCompletionBackend, OpenAiEmbeddingBackend,
    },
    connector::output::{markdown, xml},
    ContextBuilder, EmbeddingBackend, RetrievalConfig,
};

/// CodeCtx - Assembles a token-bounded, query-relevant code context from a repository
#[derive(Parser)]
#[command(name = "codectx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a repository and print an assembled context for a query
    Pack {
        /// Local path or Git hosting URL to scan
        path: String,

        /// The query to rank chunks against
        query: String,

        /// Maximum token budget for the assembled context
        #[arg(short, long)]
        budget: Option<usize>,

        /// Output format: markdown or xml
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Path to a .codectx.toml config file (defaults to <path>/.codectx.toml if present)
        #[arg(short, long)]
        config: Option<String>,

        /// Enable the optional LLM rerank pass
        #[arg(long)]
        rerank: bool,

        /// Use a deterministic mock embedding backend instead of a real provider
        #[arg(long)]
        mock_embeddings: bool,
    },

    /// Clear the on-disk embedding cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove every cached embedding vector
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Pack {
            path,
            query,
            budget,
            format,
            config,
            rerank,
            mock_embeddings,
        } => run_pack(path, query, budget, format, config, rerank, mock_embeddings).await,
        Commands::Cache { action } => run_cache(action).await,
    }
}

async fn run_pack(
    path: String,
    query: String,
    budget: Option<usize>,
    format: String,
    config_path: Option<String>,
    rerank: bool,
    mock_embeddings: bool,
) -> Result<()> {
    let mut config = load_config(&path, config_path)?;
    if let Some(budget) = budget {
        config.budget = budget;
    }
    config.use_smart_rerank = rerank;

    let cache_dir = EmbeddingCache::default_dir().unwrap_or_else(|| PathBuf::from(".codectx-cache"));
    let cache = EmbeddingCache::new(cache_dir);

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    progress.set_message("scanning repository...");
    progress.enable_steady_tick(std::time::Duration::from_millis(120));

    let embedding_backend: Arc<dyn EmbeddingBackend> = if mock_embeddings {
        Arc::new(MockEmbeddingBackend::new())
    } else if let Some(backend) = OpenAiEmbeddingBackend::from_env() {
        Arc::new(backend)
    } else if let Some(backend) = GoogleEmbeddingBackend::from_env() {
        Arc::new(backend)
    } else {
        Arc::new(MockEmbeddingBackend::new())
    };

    let mut builder = ContextBuilder::new(cache).with_embedding_backend(embedding_backend);
    if config.use_hyde || config.use_smart_rerank {
        builder = builder.with_completion_backend(Arc::new(HttpCompletionBackend::from_env()));
    }

    let result = builder.build(&path, &query, &config).await;
    progress.finish_and_clear();

    let result = result.context("failed to assemble context")?;

    info!(
        files_scanned = result.files_scanned(),
        files_included = result.files_included(),
        tokens = result.total_tokens(),
        "pack complete"
    );

    let rendered = match format.as_str() {
        "xml" => xml::render(&result),
        _ => markdown::render(&result),
    };
    println!("{rendered}");

    Ok(())
}

async fn run_cache(action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Clear => {
            if let Some(dir) = codectx::connector::adapter::embedding_cache::EmbeddingCache::default_dir() {
                if dir.exists() {
                    std::fs::remove_dir_all(&dir)
                        .with_context(|| format!("failed to remove cache dir {}", dir.display()))?;
                    println!("Cleared embedding cache at {}", dir.display());
                } else {
                    println!("No embedding cache to clear.");
                }
            } else {
                println!("Could not resolve a cache directory for this platform.");
            }
        }
    }
    Ok(())
}

fn load_config(root: &str, explicit: Option<String>) -> Result<RetrievalConfig> {
    let candidate = explicit.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(root).join(".codectx.toml"));

    if candidate.exists() {
        let text = std::fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read {}", candidate.display()))?;
        RetrievalConfig::from_toml_str(&text).with_context(|| format!("failed to parse {}", candidate.display()))
    } else {
        Ok(RetrievalConfig::default())
    }
}
