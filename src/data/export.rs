use std::io::Write;
use std::path::Path;

use crate::data::loader::LoadError;

/// Write `period,count,trend` rows.
///
/// `trend` may be empty (no trend line for fewer than two periods), in which
/// case the trend column is left blank. Periods without a count are skipped.
pub fn export_csv<W: Write>(
    writer: W,
    labels: &[String],
    counts: &[f64],
    trend: &[f64],
) -> Result<usize, csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["period", "count", "trend"])?;

    let mut rows = 0usize;
    for (i, (label, count)) in labels.iter().zip(counts.iter()).enumerate() {
        let count_cell = format!("{count}");
        let trend_cell = trend.get(i).map(|v| format!("{v}")).unwrap_or_default();
        out.write_record([label.as_str(), count_cell.as_str(), trend_cell.as_str()])?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

pub fn export_csv_file(
    path: &Path,
    labels: &[String],
    counts: &[f64],
    trend: &[f64],
) -> Result<usize, LoadError> {
    let file = std::fs::File::create(path)?;
    let rows = export_csv(std::io::BufWriter::new(file), labels, counts, trend)?;
    tracing::info!("Exported {rows} periods to {:?}", path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_export_with_trend() {
        let mut buf = Vec::new();
        let rows = export_csv(&mut buf, &labels(&["2024-01", "2024-02"]), &[2.0, 4.0], &[2.0, 4.0]).unwrap();
        assert_eq!(rows, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "period,count,trend\n2024-01,2,2\n2024-02,4,4\n");
    }

    #[test]
    fn test_export_without_trend() {
        let mut buf = Vec::new();
        export_csv(&mut buf, &labels(&["2024-01"]), &[3.5], &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "period,count,trend\n2024-01,3.5,\n");
    }

    #[test]
    fn test_export_quotes_labels() {
        let mut buf = Vec::new();
        export_csv(&mut buf, &labels(&["Mar 5, 2024"]), &[1.0], &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Mar 5, 2024\",1,"));
    }

    #[test]
    fn test_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");
        let rows = export_csv_file(&path, &labels(&["a", "b"]), &[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert_eq!(rows, 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("period,count,trend\n"));
    }
}
