//! KMEHR `CD-ITEM` scheme catalog.
//!
//! `identity` holds the closed scheme table and its two lookups; `index`
//! validates the table and serves a hashed reverse lookup for readers.

pub mod identity;
pub mod index;

pub use identity::{CdItemScheme, UnknownScheme};
pub use index::{SchemeIndex, validate_table};
