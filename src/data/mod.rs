/// Data layer: record types, loading, memoization, queries and export.
///
/// Architecture:
/// ```text
///  open_pubs_8000_sample.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, forward-fill, coerce coordinates → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  OnceLock: read once, same snapshot afterwards
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  filter / count / top names → chart inputs
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  crawl table → .csv / .json
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod query;
