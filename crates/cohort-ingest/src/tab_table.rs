//! Raw tab-separated file reading.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A tab-separated file as raw strings, before typing.
#[derive(Debug, Clone)]
pub struct TabTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a tab-separated extract into headers and string rows.
///
/// Cells are trimmed and BOM-stripped; fully empty rows are skipped. Short
/// rows are padded with empty cells to the header width.
pub fn read_tab_table(path: &Path) -> Result<TabTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize_cell)
        .collect();
    if headers.is_empty() {
        return Err(IngestError::EmptyExtract {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }

    Ok(TabTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_headers_and_pads_short_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "MCSID\tAPNUM00\tAPCIPR00\nM001\t1\nM002\t2\t10\n").unwrap();
        let table = read_tab_table(file.path()).unwrap();
        assert_eq!(table.headers, vec!["MCSID", "APNUM00", "APCIPR00"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["M001", "1", ""]);
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = read_tab_table(Path::new("/nonexistent/w1.tab")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
