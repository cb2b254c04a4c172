use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheme carried in the `S` attribute of a KMEHR `CD-ITEM` element.
///
/// The set mirrors the `CD-ITEMschemes` simple type of the KMEHR schema and is
/// closed: parsing rejects anything that is not byte-for-byte one of the
/// listed wire names. A schema revision is a source change here.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CdItemScheme {
    CdItem,
    CdItemMaa,
    CdItemCarenet,
    CdLab,
    CdTechnical,
    CdContactPerson,
    Icd,
    Icpc,
    Local,
    CdVaccine,
    CdEcg,
    CdEcareClinical,
    CdEcareLab,
    CdEcareHaq,
    CdItemEbirth,
    CdParameter,
    CdItemBvt,
    CdBvtAvailableMaterials,
    CdBvtConservationDelay,
    CdBvtConservationMode,
    CdBvtSampleType,
    CdBcrDifferentationDegree,
    CdBvtLaterality,
    CdBvtPatientOpposition,
    CdBvtStatus,
    CdItemReg,
    CdItemMyCarenet,
    CdDefibDiagnosis,
    CdActsNursing,
    CdQermidInterventionType,
}

const ALL: [CdItemScheme; 30] = [
    CdItemScheme::CdItem,
    CdItemScheme::CdItemMaa,
    CdItemScheme::CdItemCarenet,
    CdItemScheme::CdLab,
    CdItemScheme::CdTechnical,
    CdItemScheme::CdContactPerson,
    CdItemScheme::Icd,
    CdItemScheme::Icpc,
    CdItemScheme::Local,
    CdItemScheme::CdVaccine,
    CdItemScheme::CdEcg,
    CdItemScheme::CdEcareClinical,
    CdItemScheme::CdEcareLab,
    CdItemScheme::CdEcareHaq,
    CdItemScheme::CdItemEbirth,
    CdItemScheme::CdParameter,
    CdItemScheme::CdItemBvt,
    CdItemScheme::CdBvtAvailableMaterials,
    CdItemScheme::CdBvtConservationDelay,
    CdItemScheme::CdBvtConservationMode,
    CdItemScheme::CdBvtSampleType,
    CdItemScheme::CdBcrDifferentationDegree,
    CdItemScheme::CdBvtLaterality,
    CdItemScheme::CdBvtPatientOpposition,
    CdItemScheme::CdBvtStatus,
    CdItemScheme::CdItemReg,
    CdItemScheme::CdItemMyCarenet,
    CdItemScheme::CdDefibDiagnosis,
    CdItemScheme::CdActsNursing,
    CdItemScheme::CdQermidInterventionType,
];

impl CdItemScheme {
    /// Every scheme in schema declaration order.
    pub fn all() -> &'static [CdItemScheme] {
        &ALL
    }

    /// Canonical `S` attribute value.
    pub fn wire_name(self) -> &'static str {
        self.entry().0
    }

    /// Catalog version emitted in the `SV` attribute.
    pub fn version(self) -> &'static str {
        self.entry().1
    }

    /// Resolve an `S` attribute value.
    ///
    /// Matching is exact: no case folding and no whitespace trimming. The
    /// error carries the rejected input unchanged.
    pub fn from_wire_name(value: &str) -> Result<Self, UnknownScheme> {
        let scheme = match value {
            "CD-ITEM" => CdItemScheme::CdItem,
            "CD-ITEM-MAA" => CdItemScheme::CdItemMaa,
            "CD-ITEM-CARENET" => CdItemScheme::CdItemCarenet,
            "CD-LAB" => CdItemScheme::CdLab,
            "CD-TECHNICAL" => CdItemScheme::CdTechnical,
            "CD-CONTACT-PERSON" => CdItemScheme::CdContactPerson,
            "ICD" => CdItemScheme::Icd,
            "ICPC" => CdItemScheme::Icpc,
            "LOCAL" => CdItemScheme::Local,
            "CD-VACCINE" => CdItemScheme::CdVaccine,
            "CD-ECG" => CdItemScheme::CdEcg,
            "CD-ECARE-CLINICAL" => CdItemScheme::CdEcareClinical,
            "CD-ECARE-LAB" => CdItemScheme::CdEcareLab,
            "CD-ECARE-HAQ" => CdItemScheme::CdEcareHaq,
            "CD-ITEM-EBIRTH" => CdItemScheme::CdItemEbirth,
            "CD-PARAMETER" => CdItemScheme::CdParameter,
            "CD-ITEM-BVT" => CdItemScheme::CdItemBvt,
            "CD-BVT-AVAILABLEMATERIALS" => CdItemScheme::CdBvtAvailableMaterials,
            "CD-BVT-CONSERVATIONDELAY" => CdItemScheme::CdBvtConservationDelay,
            "CD-BVT-CONSERVATIONMODE" => CdItemScheme::CdBvtConservationMode,
            "CD-BVT-SAMPLETYPE" => CdItemScheme::CdBvtSampleType,
            "CD-BCR-DIFFERENTATIONDEGREE" => CdItemScheme::CdBcrDifferentationDegree,
            "CD-BVT-LATERALITY" => CdItemScheme::CdBvtLaterality,
            "CD-BVT-PATIENTOPPOSITION" => CdItemScheme::CdBvtPatientOpposition,
            "CD-BVT-STATUS" => CdItemScheme::CdBvtStatus,
            "CD-ITEM-REG" => CdItemScheme::CdItemReg,
            "CD-ITEM-MYCARENET" => CdItemScheme::CdItemMyCarenet,
            "CD-DEFIB-DIAGNOSIS" => CdItemScheme::CdDefibDiagnosis,
            "CD-ACTS-NURSING" => CdItemScheme::CdActsNursing,
            "CD-QERMID-INTERVENTIONTYPE" => CdItemScheme::CdQermidInterventionType,
            other => return Err(UnknownScheme(other.to_string())),
        };
        Ok(scheme)
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            CdItemScheme::CdItem => ("CD-ITEM", "1.11"),
            CdItemScheme::CdItemMaa => ("CD-ITEM-MAA", "1.0"),
            CdItemScheme::CdItemCarenet => ("CD-ITEM-CARENET", "1.0"),
            CdItemScheme::CdLab => ("CD-LAB", "1.1"),
            CdItemScheme::CdTechnical => ("CD-TECHNICAL", "1.0"),
            CdItemScheme::CdContactPerson => ("CD-CONTACT-PERSON", "1.2"),
            CdItemScheme::Icd => ("ICD", "1.0"),
            CdItemScheme::Icpc => ("ICPC", "1.0"),
            CdItemScheme::Local => ("LOCAL", "1.0"),
            CdItemScheme::CdVaccine => ("CD-VACCINE", "2.0"),
            CdItemScheme::CdEcg => ("CD-ECG", "1.0"),
            CdItemScheme::CdEcareClinical => ("CD-ECARE-CLINICAL", "1.0"),
            CdItemScheme::CdEcareLab => ("CD-ECARE-LAB", "1.0"),
            CdItemScheme::CdEcareHaq => ("CD-ECARE-HAQ", "1.0"),
            CdItemScheme::CdItemEbirth => ("CD-ITEM-EBIRTH", "1.1"),
            CdItemScheme::CdParameter => ("CD-PARAMETER", "1.1"),
            CdItemScheme::CdItemBvt => ("CD-ITEM-BVT", "1.0"),
            CdItemScheme::CdBvtAvailableMaterials => ("CD-BVT-AVAILABLEMATERIALS", "1.0"),
            CdItemScheme::CdBvtConservationDelay => ("CD-BVT-CONSERVATIONDELAY", "1.0"),
            CdItemScheme::CdBvtConservationMode => ("CD-BVT-CONSERVATIONMODE", "1.0"),
            CdItemScheme::CdBvtSampleType => ("CD-BVT-SAMPLETYPE", "1.0"),
            // Misspelling is part of the schema literal.
            CdItemScheme::CdBcrDifferentationDegree => ("CD-BCR-DIFFERENTATIONDEGREE", "1.0"),
            CdItemScheme::CdBvtLaterality => ("CD-BVT-LATERALITY", "1.0"),
            CdItemScheme::CdBvtPatientOpposition => ("CD-BVT-PATIENTOPPOSITION", "1.0"),
            CdItemScheme::CdBvtStatus => ("CD-BVT-STATUS", "1.0"),
            CdItemScheme::CdItemReg => ("CD-ITEM-REG", "1.6"),
            CdItemScheme::CdItemMyCarenet => ("CD-ITEM-MYCARENET", "1.3"),
            CdItemScheme::CdDefibDiagnosis => ("CD-DEFIB-DIAGNOSIS", "1.0"),
            CdItemScheme::CdActsNursing => ("CD-ACTS-NURSING", "1.0"),
            CdItemScheme::CdQermidInterventionType => ("CD-QERMID-INTERVENTIONTYPE", "1.0"),
        }
    }
}

/// Raised when an `S` attribute value names no known scheme.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownScheme(pub String);

impl UnknownScheme {
    /// The rejected input, verbatim.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown CD-ITEM scheme {:?}", self.0)
    }
}

impl std::error::Error for UnknownScheme {}

impl fmt::Display for CdItemScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for CdItemScheme {
    type Err = UnknownScheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_wire_name(value)
    }
}

impl Serialize for CdItemScheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for CdItemScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_wire_name(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_wire_name_resolves_back_to_its_scheme() {
        for scheme in CdItemScheme::all() {
            let resolved = CdItemScheme::from_wire_name(scheme.wire_name()).unwrap();
            assert_eq!(resolved, *scheme);
        }
    }

    #[test]
    fn wire_names_are_distinct_and_versions_are_major_minor() {
        let names: HashSet<&str> = CdItemScheme::all().iter().map(|s| s.wire_name()).collect();
        assert_eq!(names.len(), CdItemScheme::all().len());
        assert_eq!(CdItemScheme::all().len(), 30);

        for scheme in CdItemScheme::all() {
            assert!(!scheme.wire_name().is_empty());
            let (major, minor) = scheme
                .version()
                .split_once('.')
                .unwrap_or_else(|| panic!("{} has no dot in its version", scheme));
            assert!(!major.is_empty() && major.chars().all(|c| c.is_ascii_digit()));
            assert!(!minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn known_versions_match_schema() {
        assert_eq!(CdItemScheme::CdItem.version(), "1.11");
        assert_eq!(CdItemScheme::CdVaccine.version(), "2.0");
        assert_eq!(CdItemScheme::CdItemReg.version(), "1.6");
        assert_eq!(CdItemScheme::CdItemMyCarenet.version(), "1.3");
        assert_eq!(CdItemScheme::CdContactPerson.version(), "1.2");
        assert_eq!(CdItemScheme::Icd.wire_name(), "ICD");
        assert_eq!(CdItemScheme::Icd.version(), "1.0");
    }

    #[test]
    fn lookup_is_exact() {
        for input in ["cd-item", " CD-ITEM", "CD-ITEM ", "", "CD-BCR-DIFFERENTIATIONDEGREE"] {
            let err = CdItemScheme::from_wire_name(input).unwrap_err();
            assert_eq!(err.value(), input);
        }
        assert_eq!(
            CdItemScheme::from_wire_name("CD-BCR-DIFFERENTATIONDEGREE").unwrap(),
            CdItemScheme::CdBcrDifferentationDegree
        );
    }

    #[test]
    fn from_str_and_display_use_wire_name() {
        let parsed: CdItemScheme = "CD-ITEM-EBIRTH".parse().unwrap();
        assert_eq!(parsed, CdItemScheme::CdItemEbirth);
        assert_eq!(parsed.to_string(), "CD-ITEM-EBIRTH");
        assert!("LOCAL ".parse::<CdItemScheme>().is_err());
    }

    #[test]
    fn serde_uses_wire_name_and_rejects_unknown() {
        let json = serde_json::to_string(&CdItemScheme::CdEcareHaq).unwrap();
        assert_eq!(json, "\"CD-ECARE-HAQ\"");
        let back: CdItemScheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CdItemScheme::CdEcareHaq);

        let err = serde_json::from_str::<CdItemScheme>("\"CD-UNKNOWN\"").unwrap_err();
        assert!(err.to_string().contains("CD-UNKNOWN"), "{err}");
    }

    #[test]
    fn unknown_scheme_message_quotes_input() {
        let err = UnknownScheme(" CD-ITEM".to_string());
        assert_eq!(err.to_string(), "unknown CD-ITEM scheme \" CD-ITEM\"");
    }
}
