use std::io::Read;
use std::path::Path;

use super::error::DataError;
use super::model::{Dataset, PubRecord};

/// Columns every pubs file must carry (besides the leading row id).
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "local_authority", "latitude", "longitude"];

/// Cell contents treated as "no value" before forward-fill.
const MISSING_MARKERS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "\\N"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the pubs dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::unavailable(path, e))?;
    load_from_reader(file, path)
}

/// Load the pubs dataset from any CSV source.
///
/// Layout: a header row, the first column is the row id, the remaining
/// columns must include [`REQUIRED_COLUMNS`]. Missing cells are forward-filled
/// from the previous row of the same column; `latitude` and `longitude` are
/// then parsed as `f64` (still-missing values become `NaN`).
///
/// `source` is only used in error messages.
pub fn load_from_reader<R: Read>(reader: R, source: &Path) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::unavailable(source, format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let Some((id_column, columns)) = headers.split_first() else {
        return Err(DataError::unavailable(source, "CSV has no columns"));
    };
    let columns = columns.to_vec();

    let position = |wanted: &str| -> Result<usize, DataError> {
        columns
            .iter()
            .position(|c| c == wanted)
            .ok_or_else(|| DataError::unavailable(source, format!("CSV missing '{wanted}' column")))
    };
    let name_idx = position("name")?;
    let authority_idx = position("local_authority")?;
    let lat_idx = position("latitude")?;
    let lon_idx = position("longitude")?;

    let mut previous: Vec<Option<String>> = vec![None; columns.len()];
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DataError::unavailable(source, format!("CSV row {row_no}: {e}")))?;

        let id = record.get(0).unwrap_or("").to_string();

        let mut fields = Vec::with_capacity(columns.len());
        for (col_idx, slot) in previous.iter_mut().enumerate() {
            let cell = record.get(col_idx + 1).unwrap_or("");
            if !is_missing(cell) {
                *slot = Some(cell.to_string());
            }
            fields.push(slot.clone().unwrap_or_default());
        }

        let latitude = coerce_f64(previous[lat_idx].as_deref(), row_no, "latitude")?;
        let longitude = coerce_f64(previous[lon_idx].as_deref(), row_no, "longitude")?;

        records.push(PubRecord {
            id,
            name: fields[name_idx].clone(),
            local_authority: fields[authority_idx].clone(),
            latitude,
            longitude,
            fields,
        });
    }

    Ok(Dataset {
        id_column: id_column.clone(),
        columns,
        records,
    })
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

fn coerce_f64(cell: Option<&str>, row: usize, column: &str) -> Result<f64, DataError> {
    match cell {
        None => Ok(f64::NAN),
        Some(text) => text.trim().parse::<f64>().map_err(|_| DataError::InvalidData {
            row,
            column: column.to_string(),
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(csv: &str) -> Result<Dataset, DataError> {
        load_from_reader(csv.as_bytes(), Path::new("inline.csv"))
    }

    const SAMPLE: &str = "\
fsa_id,name,address,postcode,easting,northing,latitude,longitude,local_authority
22,Anchor Inn,\"Upper Street, Harbury\",CV33 9HX,437371,256108,52.237052,-1.516098,Stratford-on-Avon
36,Angel Inn,Sambourne,B96 6NS,406050,262048,52.290991,-1.875786,Stratford-on-Avon
74,Bell Inn,Welford Road,CV37 8EN,,,\\N,\\N,Stratford-on-Avon
";

    #[test]
    fn loads_rows_with_id_column_and_pass_through_fields() {
        let ds = load_str(SAMPLE).unwrap();
        assert_eq!(ds.id_column, "fsa_id");
        assert_eq!(ds.columns.len(), 8);
        assert_eq!(ds.len(), 3);

        let anchor = &ds.records[0];
        assert_eq!(anchor.id, "22");
        assert_eq!(anchor.name, "Anchor Inn");
        assert_eq!(anchor.fields[1], "Upper Street, Harbury");
        assert!((anchor.latitude - 52.237052).abs() < 1e-9);
        assert!((anchor.longitude + 1.516098).abs() < 1e-9);
    }

    #[test]
    fn missing_cells_are_forward_filled() {
        let ds = load_str(SAMPLE).unwrap();
        let bell = &ds.records[2];
        let angel = &ds.records[1];
        assert_eq!(bell.latitude, angel.latitude);
        assert_eq!(bell.longitude, angel.longitude);
        // easting column filled as text as well
        assert_eq!(bell.fields[3], "406050");
    }

    #[test]
    fn first_row_gap_stays_missing() {
        let csv = "\
id,name,latitude,longitude,local_authority
1,Crown,,-1.5,Leeds
2,Swan,53.8,-1.6,
";
        let ds = load_str(csv).unwrap();
        assert!(ds.records[0].latitude.is_nan());
        assert!(!ds.records[0].has_position());
        assert_eq!(ds.records[1].latitude, 53.8);
        assert_eq!(ds.records[1].local_authority, "Leeds");
    }

    #[test]
    fn non_numeric_latitude_is_invalid_data() {
        let csv = "\
id,name,latitude,longitude,local_authority
1,Crown,north,-1.5,Leeds
";
        let err = load_str(csv).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidData {
                row: 0,
                column: "latitude".to_string(),
                value: "north".to_string(),
            }
        );
    }

    #[test]
    fn missing_required_column_is_unavailable() {
        let csv = "id,name,latitude,longitude\n1,Crown,53.8,-1.5\n";
        let err = load_str(csv).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
        assert!(err.to_string().contains("local_authority"));
    }

    #[test]
    fn required_column_in_id_position_does_not_count() {
        let csv = "name,local_authority,latitude,longitude\nCrown,Leeds,53.8,-1.5\n";
        assert!(matches!(
            load_str(csv),
            Err(DataError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn ragged_row_is_unavailable() {
        let csv = "id,name,latitude,longitude,local_authority\n1,Crown,53.8\n";
        assert!(matches!(
            load_str(csv),
            Err(DataError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }
}
