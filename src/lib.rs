//! KMEHR `CD-ITEM` scheme catalog.
//!
//! The crate pins the closed set of scheme names that may appear in the `S`
//! attribute of a KMEHR coded item, together with the version each one is
//! written with in `SV`. XML writers take both strings from
//! [`CdItemScheme::wire_name`] and [`CdItemScheme::version`]; XML readers
//! resolve `S` through [`CdItemScheme::from_wire_name`] and surface
//! [`UnknownScheme`] as a schema violation.

pub mod catalog;
pub mod coded_item;
pub mod snapshot;

pub use catalog::{CdItemScheme, SchemeIndex, UnknownScheme, validate_table};
pub use coded_item::{CdItem, VersionCheck};
pub use snapshot::{
    CatalogSnapshot, SNAPSHOT_SCHEMA_VERSION, SchemeEntry, SnapshotDiff, VersionChange,
    diff_against_catalog, load_snapshot, validate_snapshot,
};
