//! TOML record files.
//!
//! A records file is a list of `[[record]]` tables, each optionally nesting
//! `[[record.children]]` tables:
//!
//! ```toml
//! [[record]]
//! id = "comp-pump"
//! label = "Infusion pump"
//! kind = "component"
//!
//! [[record.children]]
//! id = "rsk-001"
//! kind = "sequence"
//! payload = { owner = "safety" }
//! ```
//!
//! A missing `label` falls back to the `id`. The free-form `payload` table is
//! carried through to selection events untouched.

use std::{fs, path::Path};

use log::info;
use serde::Deserialize;

use canopy::{NodeKind, Record};

use crate::error::{CliError, Document, TomlError};

/// Per-node payload of records loaded from TOML.
pub type Payload = toml::Table;

#[derive(Debug, Deserialize)]
struct RecordsFile {
    #[serde(default, rename = "record")]
    records: Vec<RecordEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordEntry {
    id: String,
    label: Option<String>,
    kind: NodeKind,
    #[serde(default)]
    collapsed: bool,
    #[serde(default)]
    payload: Payload,
    #[serde(default)]
    children: Vec<RecordEntry>,
}

impl RecordEntry {
    fn into_record(self) -> Record<Payload> {
        let label = self.label.unwrap_or_else(|| self.id.clone());
        Record::new(self.id, label, self.kind, self.payload)
            .with_collapsed(self.collapsed)
            .with_children(self.children.into_iter().map(RecordEntry::into_record))
    }
}

/// Parses a record forest from TOML text. `path` is only used for reporting.
pub fn parse_records(src: &str, path: &Path) -> Result<Vec<Record<Payload>>, TomlError> {
    let file: RecordsFile =
        toml::from_str(src).map_err(|err| TomlError::new(Document::Records, path, src, &err))?;
    Ok(file.records.into_iter().map(RecordEntry::into_record).collect())
}

/// Reads and parses a records file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record<Payload>>, CliError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|err| CliError::read(path, err))?;
    let records = parse_records(&src, path)?;

    info!(
        path:% = path.display(),
        roots = records.len(),
        total = records.iter().map(Record::count).sum::<usize>();
        "Records loaded"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUMP: &str = r#"
        [[record]]
        id = "comp-pump"
        label = "Infusion pump"
        kind = "component"

        [[record.children]]
        id = "harm-1"
        kind = "harm"
        collapsed = true
        payload = { severity = 4 }

        [[record.children.children]]
        id = "harm-1-sev"
        label = "Severity: 4"
        kind = "detail"

        [[record]]
        id = "comp-line"
        kind = "component"
    "#;

    #[test]
    fn test_parse_nested_records() {
        let records = parse_records(PUMP, Path::new("pump.toml")).unwrap();
        assert_eq!(records.len(), 2);

        let pump = &records[0];
        assert_eq!(pump.label(), "Infusion pump");
        assert_eq!(pump.kind(), NodeKind::Component);
        assert_eq!(pump.count(), 3);

        let harm = &pump.children()[0];
        assert!(harm.is_collapsed());
        assert_eq!(harm.payload().get("severity"), Some(&toml::Value::Integer(4)));
        assert_eq!(harm.children()[0].label(), "Severity: 4");
    }

    #[test]
    fn test_missing_label_defaults_to_id() {
        let records = parse_records(PUMP, Path::new("pump.toml")).unwrap();
        assert_eq!(records[1].label(), "comp-line");
        assert!(records[1].payload().is_empty());
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let records = parse_records("", Path::new("empty.toml")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_reported_with_span() {
        let src = "[[record]]\nid = \"x\"\nkind = \"widget\"\n";
        let err = parse_records(src, Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.document(), Document::Records);
        assert!(err.message().contains("widget"));
        let span = err.span().expect("toml reports a span");
        assert!(src[span].contains("widget"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let src = "[[record]]\nid = \"x\"\nkind = \"hazard\"\ncolour = \"red\"\n";
        assert!(parse_records(src, Path::new("bad.toml")).is_err());
    }
}
