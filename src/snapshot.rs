//! JSON snapshot of the scheme catalog.
//!
//! A snapshot publishes the compiled table as `{"schema_version", "schemes":
//! [{"S", "SV"}]}` and lets a reviewer compare a file cut from a new KMEHR
//! schema revision against what this build carries. Snapshots are validated
//! against `schema/cd_item_schemes.schema.json`, which is embedded at compile
//! time.

use crate::catalog::{CdItemScheme, validate_table};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const SNAPSHOT_SCHEMA_VERSION: &str = "kmehr_cd_item_schemes_v1";

const SNAPSHOT_SCHEMA: &str = include_str!("../schema/cd_item_schemes.schema.json");

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// Catalog rendered as plain data.
pub struct CatalogSnapshot {
    pub schema_version: String,
    pub schemes: Vec<SchemeEntry>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One `(S, SV)` pair as it appears in a snapshot.
pub struct SchemeEntry {
    #[serde(rename = "S")]
    pub wire_name: String,
    #[serde(rename = "SV")]
    pub version: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A scheme whose snapshot version differs from the compiled one.
pub struct VersionChange {
    pub scheme: CdItemScheme,
    pub catalog: &'static str,
    pub snapshot: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Differences between a snapshot and the compiled table.
pub struct SnapshotDiff {
    /// Wire names in the snapshot that this build does not know.
    pub missing_from_catalog: Vec<SchemeEntry>,
    /// Compiled schemes absent from the snapshot.
    pub missing_from_snapshot: Vec<CdItemScheme>,
    pub version_changes: Vec<VersionChange>,
}

impl CatalogSnapshot {
    /// Snapshot of the compiled table, in declaration order.
    pub fn current() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            schemes: CdItemScheme::all()
                .iter()
                .map(|scheme| SchemeEntry {
                    wire_name: scheme.wire_name().to_string(),
                    version: scheme.version().to_string(),
                })
                .collect(),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("serializing catalog snapshot")
    }
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_from_catalog.is_empty()
            && self.missing_from_snapshot.is_empty()
            && self.version_changes.is_empty()
    }
}

impl fmt::Display for SnapshotDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.missing_from_catalog {
            writeln!(f, "+ {} {}", entry.wire_name, entry.version)?;
        }
        for scheme in &self.missing_from_snapshot {
            writeln!(f, "- {} {}", scheme.wire_name(), scheme.version())?;
        }
        for change in &self.version_changes {
            writeln!(
                f,
                "~ {} {} -> {}",
                change.scheme.wire_name(),
                change.catalog,
                change.snapshot
            )?;
        }
        Ok(())
    }
}

/// Validate a snapshot document against the embedded JSON Schema.
pub fn validate_snapshot(value: &Value) -> Result<()> {
    let schema = compiled_snapshot_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("catalog snapshot failed schema validation:\n{}", details);
    }
    Ok(())
}

/// Read a snapshot file, validate it, and check its table invariants.
pub fn load_snapshot(path: &Path) -> Result<CatalogSnapshot> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    validate_snapshot(&value).with_context(|| format!("validating {}", path.display()))?;

    let snapshot: CatalogSnapshot = serde_json::from_value(value)
        .with_context(|| format!("decoding snapshot {}", path.display()))?;
    let entries: Vec<(&str, &str)> = snapshot
        .schemes
        .iter()
        .map(|entry| (entry.wire_name.as_str(), entry.version.as_str()))
        .collect();
    validate_table(&entries).with_context(|| format!("checking {}", path.display()))?;
    Ok(snapshot)
}

/// Compare a snapshot with the compiled table.
///
/// Results are ordered by snapshot position for additions and by catalog
/// declaration order for removals and version changes.
pub fn diff_against_catalog(snapshot: &CatalogSnapshot) -> SnapshotDiff {
    let by_name: BTreeMap<&str, &SchemeEntry> = snapshot
        .schemes
        .iter()
        .map(|entry| (entry.wire_name.as_str(), entry))
        .collect();

    let mut diff = SnapshotDiff {
        missing_from_catalog: snapshot
            .schemes
            .iter()
            .filter(|entry| CdItemScheme::from_wire_name(&entry.wire_name).is_err())
            .cloned()
            .collect(),
        ..SnapshotDiff::default()
    };

    for scheme in CdItemScheme::all() {
        match by_name.get(scheme.wire_name()) {
            None => diff.missing_from_snapshot.push(*scheme),
            Some(entry) if entry.version != scheme.version() => {
                diff.version_changes.push(VersionChange {
                    scheme: *scheme,
                    catalog: scheme.version(),
                    snapshot: entry.version.clone(),
                });
            }
            Some(_) => {}
        }
    }
    diff
}

fn compiled_snapshot_schema() -> Result<&'static JSONSchema> {
    static RAW: OnceLock<Value> = OnceLock::new();
    static COMPILED: OnceLock<JSONSchema> = OnceLock::new();

    if let Some(compiled) = COMPILED.get() {
        return Ok(compiled);
    }
    let raw = match RAW.get() {
        Some(raw) => raw,
        None => {
            let parsed: Value = serde_json::from_str(SNAPSHOT_SCHEMA)
                .context("parsing embedded snapshot schema")?;
            RAW.get_or_init(|| parsed)
        }
    };
    let compiled = JSONSchema::compile(raw)
        .map_err(|err| anyhow!("compiling embedded snapshot schema: {err}"))?;
    Ok(COMPILED.get_or_init(|| compiled))
}
