use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use serde::{Serialize, de::DeserializeOwned};

use crate::PrepVistaError;

/// Writes one JSON document per line. Returns the number of lines written.
pub fn write_json_lines<T: Serialize>(
    path: &Path,
    items: &[T],
) -> Result<usize, PrepVistaError> {
    serde_jsonlines::write_json_lines(path, items)
        .map_err(|e| PrepVistaError::ExportError { source: e })?;
    info!("Exported {} records to {}", items.len(), path.display());
    Ok(items.len())
}

pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PrepVistaError> {
    serde_jsonlines::json_lines(path)
        .map_err(|e| PrepVistaError::ExportError { source: e })?
        .collect::<Result<Vec<T>, std::io::Error>>()
        .map_err(|e| PrepVistaError::ExportError { source: e })
}

/// Saves a single analysis result as pretty-printed JSON.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PrepVistaError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PrepVistaError::ExportSerializeError { source: e })?;
    let file = File::create(path).map_err(|e| PrepVistaError::ExportError { source: e })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| PrepVistaError::ExportError { source: e })?;
    info!("Saved result to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        score: u8,
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.jsonl");
        let rows = vec![Row { id: 1, score: 87 }, Row { id: 2, score: 73 }];

        assert_eq!(write_json_lines(&path, &rows).unwrap(), 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(read_json_lines::<Row>(&path).unwrap(), rows);
    }

    #[test]
    fn test_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.json");
        write_pretty_json(&path, &Row { id: 7, score: 81 }).unwrap();
        let back: Row = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, Row { id: 7, score: 81 });
    }

    #[test]
    fn test_missing_directory_is_an_export_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("rows.jsonl");
        let result = write_json_lines(&path, &[Row { id: 1, score: 1 }]);
        assert!(matches!(result, Err(PrepVistaError::ExportError { .. })));
    }
}
