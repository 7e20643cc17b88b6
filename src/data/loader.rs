use std::path::Path;

use thiserror::Error;

use crate::data::payload::TrendsPayload;
use crate::error::TrendError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row}: {reason}")]
    BadRow { row: usize, reason: String },

    #[error("No data found after header row")]
    Empty,

    #[error(transparent)]
    Trend(#[from] TrendError),
}

/// Load a trends payload from a JSON, CSV or Excel file.
///
/// Tables need a header row followed by `period,count` rows. Columns named
/// `period`/`count` (case-insensitive) are used when present, otherwise the
/// first two columns.
pub fn load_payload(path: &Path) -> Result<TrendsPayload, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let payload = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)?;
            TrendsPayload::from_json(&text)?
        }
        "csv" => load_csv(path)?,
        "xls" | "xlsx" => load_excel(path)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };

    payload.validate()?;
    tracing::info!(
        "Loaded {} periods from {:?}",
        payload.periods.len(),
        path
    );
    Ok(payload)
}

fn load_csv(path: &Path) -> Result<TrendsPayload, LoadError> {
    let content = std::fs::read(path)?;
    // Fall back to latin1 when the file is not valid UTF-8.
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };
    parse_csv(&text)
}

/// Parse a `period,count` table from CSV text.
pub fn parse_csv(text: &str) -> Result<TrendsPayload, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    rows_to_payload(rows)
}

fn load_excel(path: &Path) -> Result<TrendsPayload, LoadError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::Spreadsheet("no sheets found".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.trim().to_string(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    Data::DateTime(dt) => dt.to_string(),
                    Data::DateTimeIso(s) => s.clone(),
                    Data::DurationIso(s) => s.clone(),
                    Data::Error(e) => format!("{e:?}"),
                })
                .collect()
        })
        .filter(|row: &Vec<String>| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    rows_to_payload(rows)
}

fn rows_to_payload(rows: Vec<Vec<String>>) -> Result<TrendsPayload, LoadError> {
    let (header, data) = rows.split_first().ok_or(LoadError::Empty)?;
    if data.is_empty() {
        return Err(LoadError::Empty);
    }

    let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
    let period_col = find("period").unwrap_or(0);
    let count_col = find("count").unwrap_or(1);

    let mut periods = Vec::with_capacity(data.len());
    let mut counts = Vec::with_capacity(data.len());
    for (i, row) in data.iter().enumerate() {
        // +2: one for the header, one for 1-based row numbers
        let row_no = i + 2;
        let period = row.get(period_col).cloned().unwrap_or_default();
        let count = row
            .get(count_col)
            .ok_or_else(|| LoadError::BadRow {
                row: row_no,
                reason: "missing count column".to_string(),
            })?
            .parse::<f64>()
            .map_err(|e| LoadError::BadRow {
                row: row_no,
                reason: format!("count is not a number ({e})"),
            })?;
        periods.push(period);
        counts.push(count);
    }

    Ok(TrendsPayload::new(periods, counts, None))
}
