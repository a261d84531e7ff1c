use std::path::PathBuf;
use std::sync::OnceLock;

use super::error::DataError;
use super::loader::load_file;
use super::model::Dataset;
use crate::config;

// ---------------------------------------------------------------------------
// Init-once dataset cell
// ---------------------------------------------------------------------------

/// Reads a dataset file at most once and hands out the same snapshot after.
///
/// The outcome of the first read is kept whether it succeeded or not, so a
/// broken file is reported consistently without being re-read. Racing first
/// accesses from several threads still perform a single read.
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceLock<Result<Dataset, DataError>>,
}

impl DatasetCache {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cell: OnceLock::new(),
        }
    }

    /// Load on first call, then return the memoized result.
    pub fn get(&self) -> Result<&Dataset, DataError> {
        self.cell
            .get_or_init(|| {
                let result = load_file(&self.path);
                match &result {
                    Ok(ds) => log::info!(
                        "Loaded {} pubs from {} with columns {:?}",
                        ds.len(),
                        self.path.display(),
                        ds.columns
                    ),
                    Err(e) => log::error!("Failed to load {}: {e}", self.path.display()),
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether the file has been read yet.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// The process-wide dataset, read from [`config::data_path`] on first access.
pub fn load() -> Result<&'static Dataset, DataError> {
    static DATASET: OnceLock<DatasetCache> = OnceLock::new();
    DATASET
        .get_or_init(|| DatasetCache::new(config::data_path()))
        .get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pubs-england-{tag}-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn second_get_returns_same_snapshot_without_rereading() {
        let path = temp_csv(
            "cache-hit",
            "id,name,latitude,longitude,local_authority\n1,Crown,53.8,-1.5,Leeds\n",
        );
        let cache = DatasetCache::new(path.clone());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap() as *const Dataset;
        // Changing the file afterwards must not affect the cached snapshot.
        std::fs::write(&path, "garbage").unwrap();
        let second = cache.get().unwrap();

        assert!(cache.is_loaded());
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.records[0].name, "Crown");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn failed_load_is_memoized() {
        let cache = DatasetCache::new(PathBuf::from("no/such/pubs.csv"));
        let first = cache.get().unwrap_err();
        let second = cache.get().unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(first, DataError::DataUnavailable { .. }));
    }
}
