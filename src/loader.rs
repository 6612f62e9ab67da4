//! Trip CSV ingestion
//!
//! Finds the newest export in a directory, parses it into validated trips and
//! remembers the parsed batch keyed by the file's path and mtime.

use csv::{ReaderBuilder, Trim};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

use crate::error::{LinehaulError, Result};
use crate::models::{validate_batch, CsvRecord, TripRecord};

/// Newest `*.csv` directly inside `dir`, by modification time
pub fn latest_csv(dir: &Path) -> Result<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !is_csv {
            debug!("Skipping {:?}", path);
            continue;
        }

        let modified = fs::metadata(&path)?.modified()?;
        let newer = match &newest {
            None => true,
            Some((t, p)) => modified > *t || (modified == *t && path > *p),
        };
        if newer {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, p)| p)
        .ok_or_else(|| LinehaulError::NoInputFile(dir.to_path_buf()))
}

/// Newest CSV in `dir` together with the modification time that identifies it
pub fn newest_file(dir: &Path) -> Result<(PathBuf, SystemTime)> {
    let path = latest_csv(dir)?;
    let modified = fs::metadata(&path)?.modified()?;
    Ok((path, modified))
}

/// Parse and validate trips from any CSV source
pub fn read_trips<R: Read>(source: R) -> Result<Vec<TripRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let rows: Vec<CsvRecord> = reader.deserialize().collect::<std::result::Result<_, _>>()?;
    validate_batch(&rows)
}

pub fn read_trips_from_path(path: &Path) -> Result<Vec<TripRecord>> {
    info!("Reading CSV from {:?}", path);
    let trips = read_trips(fs::File::open(path)?)?;
    info!("Parsed {} trips from {:?}", trips.len(), path);
    Ok(trips)
}

/// A parsed batch and the file identity it came from
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub trips: Arc<Vec<TripRecord>>,
}

impl LoadedBatch {
    pub fn read(path: PathBuf, modified: SystemTime) -> Result<Self> {
        let trips = read_trips_from_path(&path)?;
        Ok(Self {
            path,
            modified,
            trips: Arc::new(trips),
        })
    }
}

/// Last parsed batch, reloaded when the newest file or its mtime changes
#[derive(Debug, Default)]
pub struct BatchCache {
    current: Option<LoadedBatch>,
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached batch for `path` if it is still fresh
    pub fn get(&self, path: &Path, modified: SystemTime) -> Option<&LoadedBatch> {
        self.current
            .as_ref()
            .filter(|b| b.path == path && b.modified == modified)
    }

    /// Replace the cached batch
    pub fn store(&mut self, batch: LoadedBatch) {
        if let Some(stale) = &self.current {
            info!("Input changed ({:?} -> {:?}), reloading", stale.path, batch.path);
        }
        self.current = Some(batch);
    }
}
