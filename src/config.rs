use std::ops::RangeInclusive;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Environment-driven configuration
// ---------------------------------------------------------------------------

/// Env var overriding the dataset location.
pub const DATA_PATH_VAR: &str = "PUBS_DATA_PATH";
/// Env var overriding the banner image shown on the map tab.
pub const BANNER_PATH_VAR: &str = "PUBS_BANNER_PATH";

pub const DEFAULT_DATA_PATH: &str = "open_pubs_8000_sample.csv";
pub const DEFAULT_BANNER_PATH: &str = "boris.jpeg";

/// Point sizes (metres) offered by the map's size selector.
pub const POINT_SIZE_STEP: u32 = 50;
pub const POINT_SIZES: RangeInclusive<u32> = 1000..=1950;

/// Upper bound of the "top pub names" slider.
pub const MAX_TOP_NAMES: usize = 50;

/// Settings the dashboard reads once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub banner_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            banner_path: PathBuf::from(DEFAULT_BANNER_PATH),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by any non-empty environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path_or = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };
        Self {
            data_path: path_or(DATA_PATH_VAR, defaults.data_path),
            banner_path: path_or(BANNER_PATH_VAR, defaults.banner_path),
        }
    }
}

/// Dataset location used by the process-wide cache.
pub fn data_path() -> PathBuf {
    DashboardConfig::from_env().data_path
}

/// The selectable point sizes, ascending.
pub fn point_sizes() -> Vec<u32> {
    POINT_SIZES.step_by(POINT_SIZE_STEP as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let cfg = DashboardConfig::from_lookup(|_| None);
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.data_path, PathBuf::from("open_pubs_8000_sample.csv"));
    }

    #[test]
    fn environment_overrides_and_blank_values_are_ignored() {
        let cfg = DashboardConfig::from_lookup(|key| match key {
            DATA_PATH_VAR => Some("/data/pubs.csv".to_string()),
            BANNER_PATH_VAR => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.data_path, PathBuf::from("/data/pubs.csv"));
        assert_eq!(cfg.banner_path, PathBuf::from(DEFAULT_BANNER_PATH));
    }

    #[test]
    fn point_sizes_step_by_fifty() {
        let sizes = point_sizes();
        assert_eq!(sizes.len(), 20);
        assert_eq!(sizes.first(), Some(&1000));
        assert_eq!(sizes.last(), Some(&1950));
    }
}
