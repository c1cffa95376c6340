//! Startup assembly of the process-wide handles.
//!
//! Everything here is loaded exactly once; a missing or corrupt resource is
//! fatal before the app serves its first query. After assembly the handles
//! are shared read-only.

use std::sync::Arc;

use anyhow::{Context, Result};

use vibewise_core::{Catalog, EnrichedTrack};
use vibewise_enrich::{Config, Enricher, ItunesClient, VideoClient};
use vibewise_search::{Embedder, Recommender, TrackIndex};

/// The assembled recommendation engine: catalog, recommender, enricher.
#[derive(Debug)]
pub struct Engine {
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    pub enricher: Arc<Enricher<ItunesClient, VideoClient>>,
}

impl Engine {
    /// Load all resources named by `config` and wire the pipeline.
    pub async fn load(config: &Config) -> Result<Self> {
        let catalog_path = config.catalog_path();
        let model_dir = config.model_dir();
        let index_path = config.index_path();

        // Model and index loading are disk- and CPU-heavy; keep them off
        // the runtime's core threads.
        let (catalog, recommender) =
            tokio::task::spawn_blocking(move || -> Result<(Arc<Catalog>, Arc<Recommender>)> {
                let catalog = Arc::new(Catalog::load(&catalog_path).with_context(|| {
                    format!("Failed to load track catalog {}", catalog_path.display())
                })?);

                let embedder = Embedder::new(&model_dir).with_context(|| {
                    format!("Failed to load embedding model from {}", model_dir.display())
                })?;

                let index =
                    TrackIndex::load(&index_path, embedder.dimensions()).with_context(|| {
                        format!("Failed to load vector index {}", index_path.display())
                    })?;

                let recommender =
                    Arc::new(Recommender::new(embedder, index, Arc::clone(&catalog)));
                Ok((catalog, recommender))
            })
            .await
            .context("Resource loading task failed")??;

        let itunes = ItunesClient::new().context("Failed to create cover lookup client")?;
        let video = VideoClient::new(config.video_api_base.clone())
            .context("Failed to create video lookup client")?;
        let enricher = Arc::new(Enricher::new(itunes, video));

        Ok(Self {
            catalog,
            recommender,
            enricher,
        })
    }

    /// One full query cycle: recommend, then enrich the batch.
    ///
    /// The embedding search is CPU-bound and runs on a blocking thread; the
    /// enrichment fan-out joins before anything is returned.
    pub async fn recommend_enriched(&self, query: &str, top_k: usize) -> Result<Vec<EnrichedTrack>> {
        let recommender = Arc::clone(&self.recommender);
        let query = query.to_string();

        let candidates =
            tokio::task::spawn_blocking(move || recommender.recommend(&query, top_k))
                .await
                .context("Recommendation task failed")??;

        Ok(self.enricher.enrich(&candidates).await)
    }
}
