//! Hashed view of the scheme table.
//!
//! The index checks the table invariants before anything is served from it:
//! wire names must be non-empty and unique, versions must be `major.minor`.
//! Readers that resolve many `S` attributes share the process-wide instance
//! returned by [`SchemeIndex::global`].

use crate::catalog::identity::CdItemScheme;
use anyhow::{Result, bail};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

#[derive(Debug)]
/// Scheme table keyed by wire name.
pub struct SchemeIndex {
    by_wire_name: HashMap<&'static str, CdItemScheme>,
}

impl SchemeIndex {
    /// Build an index over `schemes`, rejecting tables that break the
    /// catalog invariants.
    pub fn build(schemes: &[CdItemScheme]) -> Result<Self> {
        let entries: Vec<(&'static str, &'static str)> = schemes
            .iter()
            .map(|scheme| (scheme.wire_name(), scheme.version()))
            .collect();
        validate_table(&entries)?;

        let by_wire_name = schemes
            .iter()
            .map(|scheme| (scheme.wire_name(), *scheme))
            .collect();
        Ok(Self { by_wire_name })
    }

    /// Process-wide index over the compiled table.
    ///
    /// Returns `None` only if the compiled table itself is inconsistent,
    /// which the unit tests rule out.
    pub fn global() -> Option<&'static SchemeIndex> {
        static INDEX: OnceLock<Option<SchemeIndex>> = OnceLock::new();
        INDEX
            .get_or_init(|| SchemeIndex::build(CdItemScheme::all()).ok())
            .as_ref()
    }

    /// Resolve a wire name; exact match only.
    pub fn resolve(&self, wire_name: &str) -> Option<CdItemScheme> {
        self.by_wire_name.get(wire_name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_wire_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_wire_name.is_empty()
    }

    /// Iterates wire names in sorted order.
    pub fn wire_names(&self) -> impl Iterator<Item = &'static str> {
        let sorted: BTreeSet<&'static str> = self.by_wire_name.keys().copied().collect();
        sorted.into_iter()
    }
}

/// Check a `(wire name, version)` table against the catalog invariants.
pub fn validate_table(entries: &[(&str, &str)]) -> Result<()> {
    if entries.is_empty() {
        bail!("scheme table contains no entries");
    }

    let mut seen = BTreeSet::new();
    for (wire_name, version) in entries {
        if wire_name.is_empty() {
            bail!("encountered scheme with no wire name");
        }
        if !seen.insert(*wire_name) {
            bail!("duplicate scheme wire name {}", wire_name);
        }
        if !is_major_minor(version) {
            bail!(
                "scheme {} has version {:?}, expected ^[0-9]+\\.[0-9]+$",
                wire_name,
                version
            );
        }
    }
    Ok(())
}

pub(crate) fn is_major_minor(version: &str) -> bool {
    let Some((major, minor)) = version.split_once('.') else {
        return false;
    };
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    digits(major) && digits(minor)
}
