//! Catalog JSON export and import.
//!
//! The file is one JSON object mapping shape id to its record, in catalog order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::ShapeCatalog;
use crate::domain::ShapeRecord;
use crate::error::{Error, Result};

/// `shapes_catalog_<local timestamp>.json` in the working directory.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(
        Local::now()
            .format("shapes_catalog_%Y%m%d_%H%M%S.json")
            .to_string(),
    )
}

/// Write the whole catalog as pretty-printed JSON.
pub fn write_catalog_json(path: &Path, catalog: &ShapeCatalog) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, catalog)?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), shapes = catalog.len(), "exported catalog");
    Ok(())
}

/// Load a catalog previously written by [`write_catalog_json`].
///
/// Each key must match the `id` of the record it maps to.
pub fn read_catalog_json(path: &Path) -> Result<ShapeCatalog> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let map: Map<String, Value> = serde_json::from_reader(BufReader::new(file))?;

    let records = map
        .into_iter()
        .map(|(key, value)| -> Result<ShapeRecord> {
            let record: ShapeRecord = serde_json::from_value(value)?;
            if record.id != key {
                return Err(Error::invalid_argument(format!(
                    "catalog key '{key}' does not match record id '{}'",
                    record.id
                )));
            }
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;
    ShapeCatalog::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_preserves_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = ShapeCatalog::builtin();

        write_catalog_json(&path, &catalog).unwrap();
        let loaded = read_catalog_json(&path).unwrap();

        assert_eq!(loaded.len(), catalog.len());
        assert!(loaded.ids().eq(catalog.ids()));
        for (a, b) in loaded.iter().zip(catalog.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn export_layout_is_keyed_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_catalog_json(&path, &ShapeCatalog::builtin()).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let square = &raw["square_basic"];
        assert_eq!(square["name"], "Square");
        assert_eq!(square["category"], "geometric");
        assert_eq!(square["components"][0]["type"], "linear");
        assert_eq!(square["components"][0]["params"]["beta"], 1.0);
        assert_eq!(raw.as_object().unwrap().keys().next().unwrap(), "square_basic");
    }

    #[test]
    fn mismatched_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"a": {"id": "b", "name": "B", "category": "abstract", "complexity": "basic", "components": []}}"#,
        )
        .unwrap();
        assert!(matches!(read_catalog_json(&path), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_catalog_json(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn default_path_is_timestamped() {
        let name = default_export_path().to_string_lossy().into_owned();
        assert!(name.starts_with("shapes_catalog_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "shapes_catalog_20250101_120000.json".len());
    }
}
