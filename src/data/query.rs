use std::collections::{BTreeSet, HashMap};

use super::model::{AuthorityCount, Dataset, PubRecord};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pubs whose local authority is in `authorities`, in file order.
///
/// An empty selection selects nothing.
pub fn filter_by_authorities<'a>(
    dataset: &'a Dataset,
    authorities: &BTreeSet<String>,
) -> Vec<&'a PubRecord> {
    if authorities.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .filter(|r| authorities.contains(&r.local_authority))
        .collect()
}

/// Every distinct local authority in first-seen order.
pub fn distinct_authorities<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PubRecord>,
{
    let mut seen = BTreeSet::new();
    let mut ordered = Vec::new();
    for r in records {
        if seen.insert(r.local_authority.as_str()) {
            ordered.push(r.local_authority.clone());
        }
    }
    ordered
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Number of pubs per local authority.
pub fn count_by_authority<'a, I>(records: I) -> AuthorityCount
where
    I: IntoIterator<Item = &'a PubRecord>,
{
    let mut counts = AuthorityCount::new();
    for r in records {
        *counts.entry(r.local_authority.clone()).or_default() += 1;
    }
    counts
}

/// One count per requested authority, aligned by position.
pub fn counts_for_each<'a, I>(authorities: &[String], records: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a PubRecord>,
{
    let counts = count_by_authority(records);
    authorities
        .iter()
        .map(|a| counts.get(a).copied().unwrap_or(0))
        .collect()
}

/// The `n` most frequent pub names with their counts, most frequent first.
///
/// Equal counts keep the order in which the names were first encountered.
/// Returns fewer than `n` entries when there are fewer distinct names.
pub fn top_names<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a PubRecord>,
{
    if n == 0 {
        return Vec::new();
    }

    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for r in records {
        let slot = *slot_of.entry(r.name.as_str()).or_insert_with(|| {
            tally.push((r.name.as_str(), 0));
            tally.len() - 1
        });
        tally[slot].1 += 1;
    }

    // sort_by is stable: ties stay in first-seen order
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .take(n)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// Flatten counts for the area chart: descending by count, then by name.
pub fn authority_counts_descending(counts: &AuthorityCount) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = counts.iter().map(|(a, c)| (a.clone(), *c)).collect();
    // BTreeMap iteration is already name-ordered, so a stable sort keeps that for ties
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

// ---------------------------------------------------------------------------
// Map helpers
// ---------------------------------------------------------------------------

/// `(name, longitude, latitude)` for every pub with usable coordinates.
pub fn map_points<'a, I>(records: I) -> Vec<(&'a str, f64, f64)>
where
    I: IntoIterator<Item = &'a PubRecord>,
{
    records
        .into_iter()
        .filter(|r| r.has_position())
        .map(|r| (r.name.as_str(), r.longitude, r.latitude))
        .collect()
}

/// Mean `[longitude, latitude]` of the points, `None` when there are none.
pub fn mean_position(points: &[(&str, f64, f64)]) -> Option<[f64; 2]> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lon, lat) = points
        .iter()
        .fold((0.0, 0.0), |(lon, lat), &(_, x, y)| (lon + x, lat + y));
    Some([lon / n, lat / n])
}
