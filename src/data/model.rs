use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// PubRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single pub (one row of the source CSV, after forward-fill).
#[derive(Debug, Clone, PartialEq)]
pub struct PubRecord {
    /// Row identifier taken from the first CSV column.
    pub id: String,
    pub name: String,
    pub local_authority: String,
    /// `NaN` when the value was missing on the first row.
    pub latitude: f64,
    /// `NaN` when the value was missing on the first row.
    pub longitude: f64,
    /// Every non-id cell in header order, aligned with [`Dataset::columns`].
    pub fields: Vec<String>,
}

impl PubRecord {
    /// Whether both coordinates are usable for plotting.
    pub fn has_position(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Occurrences per local authority.
pub type AuthorityCount = BTreeMap<String, usize>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// The full parsed dataset, read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Header of the first (row id) column.
    pub id_column: String,
    /// Ordered list of the remaining column names.
    pub columns: Vec<String>,
    /// All pubs in file order.
    pub records: Vec<PubRecord>,
}

impl Dataset {
    /// Number of pubs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
