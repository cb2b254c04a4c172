//! KMEHR `CD-ITEM` coded values.
//!
//! Writers build items with [`CdItem::new`], which takes both `S` and `SV`
//! from the catalog so no scheme string is ever typed by hand. Readers go
//! through [`CdItem::from_attributes`], which resolves `S` strictly and keeps
//! `SV` exactly as declared in the document.

use crate::catalog::{CdItemScheme, UnknownScheme};
use serde::{Deserialize, Serialize};

/// One coded item: the `CD` element of a KMEHR item with its attributes.
///
/// Field names follow the XML attribute names on the wire (`S`, `SV`, `SL`,
/// `DN`, `L`); the element text lands in `value`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CdItem {
    #[serde(rename = "S")]
    pub s: CdItemScheme,
    #[serde(rename = "SV")]
    pub sv: String,
    #[serde(rename = "SL", default, skip_serializing_if = "Option::is_none")]
    pub sl: Option<String>,
    #[serde(rename = "DN", default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub l: Option<String>,
    pub value: String,
}

/// Outcome of comparing a declared `SV` with the catalog version.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VersionCheck {
    Matches,
    Differs {
        catalog: &'static str,
        declared: String,
    },
}

impl CdItem {
    /// Item in `scheme` with `SV` set to the catalog version.
    pub fn new(scheme: CdItemScheme, value: impl Into<String>) -> Self {
        Self {
            s: scheme,
            sv: scheme.version().to_string(),
            sl: None,
            dn: None,
            l: None,
            value: value.into(),
        }
    }

    /// `LOCAL` item; `SL` names the local code list.
    pub fn local(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            sl: Some(label.into()),
            ..Self::new(CdItemScheme::Local, value)
        }
    }

    /// Rebuild an item from raw XML attribute values.
    ///
    /// `S` must name a known scheme; the error carries the raw value so the
    /// parser can report it as a schema violation. `SV` is not checked here,
    /// see [`CdItem::version_check`].
    pub fn from_attributes(
        s: &str,
        sv: &str,
        value: impl Into<String>,
    ) -> Result<Self, UnknownScheme> {
        let scheme = CdItemScheme::from_wire_name(s)?;
        Ok(Self {
            sv: sv.to_string(),
            ..Self::new(scheme, value)
        })
    }

    pub fn with_display_name(mut self, dn: impl Into<String>) -> Self {
        self.dn = Some(dn.into());
        self
    }

    pub fn with_language(mut self, l: impl Into<String>) -> Self {
        self.l = Some(l.into());
        self
    }

    /// Emit an explicit `SV` instead of the catalog version.
    pub fn with_scheme_version(mut self, sv: impl Into<String>) -> Self {
        self.sv = sv.into();
        self
    }

    /// The `S` attribute text.
    pub fn scheme_attribute(&self) -> &'static str {
        self.s.wire_name()
    }

    /// Compare the declared `SV` with the catalog.
    ///
    /// Informational only; deciding whether a mismatch invalidates the
    /// document is left to the document-level validator.
    pub fn version_check(&self) -> VersionCheck {
        let catalog = self.s.version();
        if self.sv == catalog {
            VersionCheck::Matches
        } else {
            VersionCheck::Differs {
                catalog,
                declared: self.sv.clone(),
            }
        }
    }
}
