//! Shared business logic for the report API
//!
//! Holds the ingestion cache only; every request recomputes its report from
//! the cached batch.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::engine::{summarize, EngineConfig, Report};
use crate::error::{LinehaulError, Result};
use crate::filter::{available_dates, available_hubs, TripFilter};
use crate::loader::{newest_file, BatchCache, LoadedBatch};

/// Selection requested by a client
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    /// Defaults to the newest date in the batch
    pub date: Option<NaiveDate>,
    /// Defaults to every hub
    pub hubs: Option<BTreeSet<String>>,
    pub top_n: Option<usize>,
}

pub struct ReportService {
    data_dir: PathBuf,
    engine: EngineConfig,
    cache: Arc<RwLock<BatchCache>>,
}

impl ReportService {
    pub fn new(data_dir: impl Into<PathBuf>, engine: EngineConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            engine,
            cache: Arc::new(RwLock::new(BatchCache::new())),
        }
    }

    /// Newest batch, parsed at most once per (path, mtime)
    pub async fn batch(&self) -> Result<LoadedBatch> {
        let dir = self.data_dir.clone();
        let (path, modified) = blocking(move || newest_file(&dir)).await?;

        // Check cache first
        {
            let cache = self.cache.read().await;
            if let Some(batch) = cache.get(&path, modified) {
                debug!("Batch cache hit for {:?}", path);
                return Ok(batch.clone());
            }
        }

        let batch = blocking(move || LoadedBatch::read(path, modified)).await?;

        let mut cache = self.cache.write().await;
        // Another request may have stored the same file while we parsed
        if let Some(existing) = cache.get(&batch.path, batch.modified) {
            return Ok(existing.clone());
        }
        cache.store(batch.clone());
        Ok(batch)
    }

    pub async fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(available_dates(&self.batch().await?.trips))
    }

    pub async fn hubs(&self) -> Result<Vec<String>> {
        Ok(available_hubs(&self.batch().await?.trips))
    }

    pub async fn report(&self, query: &ReportQuery) -> Result<Report> {
        let batch = self.batch().await?;

        let date = query
            .date
            .or_else(|| available_dates(&batch.trips).first().copied());
        let filter = TripFilter {
            date,
            hubs: query.hubs.clone(),
        };
        let selected = filter.apply(&batch.trips);

        let mut engine = self.engine.clone();
        if let Some(n) = query.top_n {
            engine.top_n = n;
        }

        info!(
            file = ?batch.path,
            date = ?date,
            selected = selected.len(),
            "Building report"
        );
        Ok(summarize(&selected, &engine))
    }
}

/// Run filesystem and CSV work off the async workers
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| LinehaulError::Io(std::io::Error::other(e)))?
}
