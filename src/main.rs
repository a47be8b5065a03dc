//! `vidscore` entrypoint: scores one batch file and prints the result.
//!
//! ```text
//! vidscore <batch.json> [--dry-run | --unique-count]
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vidscore::batch::VideosBatch;
use vidscore::config::ScoringConfig;
use vidscore::constants::{DimConfig, EMBEDDING_CONCURRENCY};
use vidscore::embedding::{EmbeddingService, RemoteEmbedder, StubEmbedder};
use vidscore::fetch::{HttpMediaFetcher, MediaFetcher, ProxyPool, UnavailableFetcher};
use vidscore::scoring::{ConcurrencyGates, SamplingRng, ScoringMode, VideoScorer};
use vidscore::sink::{DatasetSink, DiscardSink, JsonlDatasetSink, SinkError};
use vidscore::vectordb::QdrantClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const EMBEDDING_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Scores one submitted video batch against the configured index.
#[derive(Parser, Debug)]
#[command(name = "vidscore", version, about)]
struct Cli {
    /// JSON file holding `{query, num_videos, video_metadata}`.
    batch: PathBuf,

    /// Score without writing to the index or the dataset.
    #[arg(long, conflicts_with = "unique_count")]
    dry_run: bool,

    /// Only report how many videos are not near-duplicates.
    #[arg(long)]
    unique_count: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Score(ScoringMode),
    UniqueCount,
}

impl Cli {
    fn command(&self) -> Command {
        match (self.unique_count, self.dry_run) {
            (true, _) => Command::UniqueCount,
            (false, true) => Command::Score(ScoringMode::DryRun),
            (false, false) => Command::Score(ScoringMode::Upload),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let command = cli.command();
    let batch_path = cli.batch;

    let config = ScoringConfig::from_env()?;
    config.validate()?;

    let raw = tokio::fs::read_to_string(&batch_path)
        .await
        .with_context(|| format!("failed to read batch file {}", batch_path.display()))?;
    let batch: VideosBatch = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse batch file {}", batch_path.display()))?;

    info!(
        qdrant_url = %config.qdrant_url,
        collection = %config.collection,
        submitted = batch.video_metadata.len(),
        command = ?command,
        "vidscore starting"
    );

    let dims = DimConfig::new(config.embedding_dim);
    let index = Arc::new(QdrantClient::new(&config.qdrant_url)?);
    index.health_check().await?;
    index
        .ensure_collection(&config.collection, dims.vector_size())
        .await?;
    let stored = index.count_points(&config.collection).await?;
    info!(collection = %config.collection, stored, "Video index ready");

    match &config.embedding_url {
        Some(url) => {
            let embedder = RemoteEmbedder::new(url, dims, EMBEDDING_REQUEST_TIMEOUT)?;
            run(&config, Arc::new(embedder), index, &batch, command).await
        }
        None => {
            warn!("No VIDSCORE_EMBEDDING_URL configured, running embedder in stub mode");
            run(&config, Arc::new(StubEmbedder::new(dims)), index, &batch, command).await
        }
    }
}

async fn run<E: EmbeddingService>(
    config: &ScoringConfig,
    embedder: Arc<E>,
    index: Arc<QdrantClient>,
    batch: &VideosBatch,
    command: Command,
) -> anyhow::Result<()> {
    info!(device = embedder.device(), "Embedder ready");

    let fetcher: Arc<dyn MediaFetcher> = match &config.fetch_url {
        Some(url) => Arc::new(HttpMediaFetcher::new(url, config.download_timeout)?),
        None => {
            warn!("No VIDSCORE_FETCH_URL configured, audits check descriptions only");
            Arc::new(UnavailableFetcher)
        }
    };

    let (sink, writer): (Arc<dyn DatasetSink>, Option<JoinHandle<Result<usize, SinkError>>>) =
        match &config.dataset_path {
            Some(path) => {
                let (sink, handle) = JsonlDatasetSink::spawn(path.clone());
                (Arc::new(sink), Some(handle))
            }
            None => (Arc::new(DiscardSink), None),
        };

    let scorer = VideoScorer::new(embedder, index, config.collection.clone())
        .with_fetcher(fetcher)
        .with_sink(sink)
        .with_proxies(ProxyPool::new(config.proxies.clone()))
        .with_policy(config.policy())
        .with_gates(ConcurrencyGates::new(
            EMBEDDING_CONCURRENCY,
            config.download_concurrency,
        ))
        .with_rng(SamplingRng::from_seed_option(config.rng_seed));

    match command {
        Command::UniqueCount => {
            let unique = scorer.num_unique_videos(batch).await?;
            println!("{unique}");
        }
        Command::Score(mode) => {
            let response = scorer.run_scoring(batch, mode).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    // Last sink handle; the writer drains and exits.
    drop(scorer);
    if let Some(writer) = writer {
        let written = writer.await??;
        info!(written, "Dataset writer finished");
    }

    Ok(())
}
