use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::{self, DashboardConfig};
use crate::data::error::DataError;
use crate::data::model::{Dataset, PubRecord};
use crate::data::query::{
    authority_counts_descending, count_by_authority, counts_for_each, distinct_authorities,
    filter_by_authorities, map_points, mean_position, top_names,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which page the side panel has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
    Chart,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the load finished successfully).
    pub dataset: Option<&'static Dataset>,

    /// Set when the dataset could not be loaded; replaces every page.
    pub load_error: Option<String>,

    pub tab: Tab,

    /// Picture shown on the map page, `None` when the file is absent.
    pub banner: Option<PathBuf>,

    /// Selected marker size in metres.
    pub point_size: u32,

    /// `(name, longitude, latitude)` of every mappable pub.
    pub map_points: Vec<(&'static str, f64, f64)>,
    /// Mean `[longitude, latitude]` of `map_points`.
    pub map_center: Option<[f64; 2]>,

    /// Distinct local authorities in first-seen order.
    pub authorities: Vec<String>,

    /// Authority chosen in the side panel's city selector.
    pub city: Option<String>,
    pub city_search: String,

    /// Pubs of the city whose crawl table is shown (empty = hidden).
    pub crawl: Vec<&'static PubRecord>,
    pub crawl_city: Option<String>,

    /// How many of the most common pub names the bar chart shows.
    pub top_n: usize,
    pub top_names: Vec<(String, usize)>,

    /// Authorities picked for the pie chart, in the order they were picked.
    pub picked: Vec<String>,
    pub picked_counts: Vec<usize>,
    pub authority_search: String,

    pub show_area_chart: bool,
    /// Per-authority counts, descending (area chart input).
    pub area_counts: Vec<(String, usize)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(cfg: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            load_error: None,
            tab: Tab::Map,
            banner: cfg.banner_path.is_file().then(|| cfg.banner_path.clone()),
            point_size: *config::POINT_SIZES.start(),
            map_points: Vec::new(),
            map_center: None,
            authorities: Vec::new(),
            city: None,
            city_search: String::new(),
            crawl: Vec::new(),
            crawl_city: None,
            top_n: 0,
            top_names: Vec::new(),
            picked: Vec::new(),
            picked_counts: Vec::new(),
            authority_search: String::new(),
            show_area_chart: false,
            area_counts: Vec::new(),
            status_message: None,
        }
    }

    /// Ingest the loaded dataset and precompute what every page needs.
    pub fn set_dataset(&mut self, dataset: &'static Dataset) {
        self.authorities = distinct_authorities(&dataset.records);
        self.city = self.authorities.first().cloned();
        self.area_counts = authority_counts_descending(&count_by_authority(&dataset.records));
        self.map_points = map_points(&dataset.records);
        self.map_center = mean_position(&self.map_points);

        self.dataset = Some(dataset);
        self.load_error = None;
        self.hide_crawl();
        self.set_top_n(self.top_n);
        self.recount_picked();
    }

    pub fn set_load_error(&mut self, err: &DataError) {
        self.dataset = None;
        self.load_error = Some(err.to_string());
    }

    // -- map page --------------------------------------------------------

    /// Choose a city; a crawl table for another city is hidden.
    pub fn set_city(&mut self, city: String) {
        if self.crawl_city.as_ref() != Some(&city) {
            self.hide_crawl();
        }
        self.city = Some(city);
    }

    /// Fill the crawl table with every pub of the chosen city.
    pub fn show_crawl(&mut self) {
        let (Some(ds), Some(city)) = (self.dataset, self.city.clone()) else {
            return;
        };
        let selection = BTreeSet::from([city.clone()]);
        self.crawl = filter_by_authorities(ds, &selection);
        log::debug!("Crawl table for {city}: {} pubs", self.crawl.len());
        self.crawl_city = Some(city);
    }

    pub fn hide_crawl(&mut self) {
        self.crawl.clear();
        self.crawl_city = None;
    }

    // -- chart page ------------------------------------------------------

    /// Change the bar chart size and recompute the most common names.
    pub fn set_top_n(&mut self, n: usize) {
        self.top_n = n.min(config::MAX_TOP_NAMES);
        self.top_names = match self.dataset {
            Some(ds) => top_names(&ds.records, self.top_n),
            None => Vec::new(),
        };
        log::debug!("Top {} names: {:?}", self.top_n, self.top_names);
    }

    /// Add or remove an authority from the pie chart selection.
    pub fn toggle_authority(&mut self, authority: &str) {
        if let Some(pos) = self.picked.iter().position(|a| a == authority) {
            self.picked.remove(pos);
        } else {
            self.picked.push(authority.to_string());
        }
        self.recount_picked();
    }

    pub fn clear_picked(&mut self) {
        self.picked.clear();
        self.recount_picked();
    }

    fn recount_picked(&mut self) {
        self.picked_counts = match self.dataset {
            Some(ds) => {
                let selection: BTreeSet<String> = self.picked.iter().cloned().collect();
                counts_for_each(&self.picked, filter_by_authorities(ds, &selection))
            }
            None => Vec::new(),
        };
        log::debug!("Pie counts {:?} for {:?}", self.picked_counts, self.picked);
    }

    // -- shared ----------------------------------------------------------

    /// Authorities whose name contains `query`, ignoring case.
    pub fn matching_authorities<'a>(&'a self, query: &str) -> Vec<&'a String> {
        let query = query.trim().to_lowercase();
        self.authorities
            .iter()
            .filter(|a| query.is_empty() || a.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;
    use std::path::Path;

    const SAMPLE: &str = "\
id,name,latitude,longitude,local_authority
1,Red Lion,51.45,-2.58,Bristol
2,Red Lion,51.46,-2.59,Bristol
3,Crown,53.80,-1.55,Leeds
4,Swan,53.96,-1.08,York
";

    fn loaded_state() -> AppState {
        let ds = load_from_reader(SAMPLE.as_bytes(), Path::new("inline.csv")).unwrap();
        let mut state = AppState::default();
        state.set_dataset(Box::leak(Box::new(ds)));
        state
    }

    #[test]
    fn set_dataset_prepares_selectors_and_area_counts() {
        let state = loaded_state();
        assert_eq!(state.authorities, ["Bristol", "Leeds", "York"]);
        assert_eq!(state.city.as_deref(), Some("Bristol"));
        assert_eq!(state.area_counts[0], ("Bristol".to_string(), 2));
        assert!(state.crawl.is_empty());
        assert_eq!(state.point_size, 1000);
        assert_eq!(state.map_points.len(), 4);
        assert!(state.map_center.is_some());
    }

    #[test]
    fn crawl_table_follows_city_choice() {
        let mut state = loaded_state();
        state.set_city("Leeds".to_string());
        state.show_crawl();
        assert_eq!(state.crawl.len(), 1);
        assert_eq!(state.crawl[0].name, "Crown");

        state.set_city("Leeds".to_string());
        assert_eq!(state.crawl.len(), 1);

        state.set_city("York".to_string());
        assert!(state.crawl.is_empty());
        assert_eq!(state.crawl_city, None);
    }

    #[test]
    fn top_n_is_clamped_and_recomputed() {
        let mut state = loaded_state();
        state.set_top_n(1);
        assert_eq!(state.top_names, vec![("Red Lion".to_string(), 2)]);
        state.set_top_n(500);
        assert_eq!(state.top_n, config::MAX_TOP_NAMES);
        assert_eq!(state.top_names.len(), 3);
        state.set_top_n(0);
        assert!(state.top_names.is_empty());
    }

    #[test]
    fn picked_authorities_keep_pick_order_and_counts() {
        let mut state = loaded_state();
        state.toggle_authority("York");
        state.toggle_authority("Bristol");
        assert_eq!(state.picked, ["York", "Bristol"]);
        assert_eq!(state.picked_counts, vec![1, 2]);

        state.toggle_authority("York");
        assert_eq!(state.picked_counts, vec![2]);

        state.clear_picked();
        assert!(state.picked_counts.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let state = loaded_state();
        assert_eq!(state.matching_authorities("or"), vec!["York"]);
        assert_eq!(state.matching_authorities("  ").len(), 3);
        assert!(state.matching_authorities("bath").is_empty());
    }

    #[test]
    fn load_error_replaces_dataset() {
        let mut state = loaded_state();
        state.set_load_error(&DataError::InvalidData {
            row: 3,
            column: "latitude".to_string(),
            value: "x".to_string(),
        });
        assert!(state.dataset.is_none());
        assert!(state.load_error.as_deref().unwrap_or("").contains("row 3"));
    }
}
