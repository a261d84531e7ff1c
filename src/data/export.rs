use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue};

use super::model::{Dataset, PubRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a selection of pubs to a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – same layout as the source file (row id first)
/// * `.json` – `[{ "fsa_id": "...", "name": "...", "latitude": 52.1, ... }, ...]`
pub fn export_records(path: &Path, dataset: &Dataset, records: &[&PubRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => export_csv(path, dataset, records),
        "json" => export_json(path, dataset, records),
        other => bail!("Unsupported export extension: .{other}"),
    }?;

    log::info!("Exported {} pubs to {}", records.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

fn export_csv(path: &Path, dataset: &Dataset, records: &[&PubRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;

    writer
        .write_record(std::iter::once(&dataset.id_column).chain(&dataset.columns))
        .context("writing CSV header")?;

    for (row_no, r) in records.iter().enumerate() {
        writer
            .write_record(std::iter::once(&r.id).chain(&r.fields))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer.flush().context("flushing CSV file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON writer
// ---------------------------------------------------------------------------

fn export_json(path: &Path, dataset: &Dataset, records: &[&PubRecord]) -> Result<()> {
    let rows: Vec<JsonValue> = records.iter().map(|r| record_to_json(dataset, r)).collect();
    let text = serde_json::to_string_pretty(&rows).context("serialising JSON")?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

/// Coordinates become numbers (`null` when missing); every other cell stays text.
fn record_to_json(dataset: &Dataset, record: &PubRecord) -> JsonValue {
    let mut obj = Map::new();
    obj.insert(dataset.id_column.clone(), JsonValue::String(record.id.clone()));

    for (col, cell) in dataset.columns.iter().zip(&record.fields) {
        let value = match col.as_str() {
            "latitude" => coordinate(record.latitude),
            "longitude" => coordinate(record.longitude),
            _ => JsonValue::String(cell.clone()),
        };
        obj.insert(col.clone(), value);
    }
    JsonValue::Object(obj)
}

fn coordinate(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_file, load_from_reader};

    const SAMPLE: &str = "\
fsa_id,name,address,latitude,longitude,local_authority
22,Anchor Inn,\"Upper Street, Harbury\",52.237052,-1.516098,Stratford-on-Avon
36,Angel Inn,Sambourne,52.290991,-1.875786,Stratford-on-Avon
";

    fn sample() -> Dataset {
        load_from_reader(SAMPLE.as_bytes(), Path::new("inline.csv")).unwrap()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pubs-england-{}-{name}", std::process::id()))
    }

    #[test]
    fn csv_export_reloads_to_same_rows() {
        let ds = sample();
        let selection: Vec<&PubRecord> = ds.records.iter().collect();
        let path = temp_path("crawl.csv");

        export_records(&path, &ds, &selection).unwrap();
        let reloaded = load_file(&path).unwrap();

        assert_eq!(reloaded, ds);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn json_export_has_numeric_coordinates() {
        let ds = sample();
        let selection = vec![&ds.records[1]];
        let path = temp_path("crawl.json");

        export_records(&path, &ds, &selection).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let rows: JsonValue = serde_json::from_str(&text).unwrap();

        let row = &rows[0];
        assert_eq!(rows.as_array().map(Vec::len), Some(1));
        assert_eq!(row["fsa_id"], "36");
        assert_eq!(row["name"], "Angel Inn");
        assert_eq!(row["latitude"].as_f64(), Some(52.290991));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let ds = sample();
        let err = export_records(&temp_path("crawl.xlsx"), &ds, &[]).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
