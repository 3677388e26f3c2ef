use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use serde_json::Value as JsonValue;

use super::model::Dataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a county dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "County": "...", "State": "...", "Population": 1234, ... }, ...]`
/// * anything else – CSV with a header row (standard quoting rules)
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("opened dataset {}", path.display());

    let dataset = match ext.as_str() {
        "json" => load_json(BufReader::new(file))?,
        _ => load_csv(file)?,
    };
    info!(
        "loaded {} records with {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one county per subsequent row.
/// Rows may be shorter or longer than the header.
pub fn load_csv<R: std::io::Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Parse { row: 0, source })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Parse {
            row: row_no + 1,
            source,
        })?;
        rows.push(record.iter().map(|v| v.to_string()).collect::<Vec<_>>());
    }

    Ok(Dataset::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')` writes):
///
/// ```json
/// [
///   { "County": "Autauga County", "State": "AL", "Population": 55347 },
///   ...
/// ]
/// ```
///
/// The header is the key order of the first object. Scalars are kept as their
/// text (`null` becomes an empty cell); a key an object leaves out is an absent
/// cell, as in a short CSV row. Nested values are rejected.
pub fn load_json<R: std::io::Read>(source: R) -> Result<Dataset, LoadError> {
    let root: JsonValue =
        serde_json::from_reader(source).map_err(|e| LoadError::Json(e.to_string()))?;

    let objects = root
        .as_array()
        .ok_or_else(|| LoadError::Json("expected top-level JSON array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(objects.len());

    for (i, rec) in objects.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Json(format!("row {i} is not a JSON object")))?;

        if i == 0 {
            headers = obj.keys().cloned().collect();
        }

        let row = headers
            .iter()
            .map(|col| obj.get(col).map(|val| json_to_cell(val, i, col)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok(Dataset::from_cells(headers, rows))
}

fn json_to_cell(val: &JsonValue, row: usize, col: &str) -> Result<String, LoadError> {
    match val {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Null => Ok(String::new()),
        _ => Err(LoadError::Json(format!(
            "row {row}, column '{col}': nested values are not supported"
        ))),
    }
}
