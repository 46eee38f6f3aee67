//! Raw entry -> flat record

use serde::{Deserialize, Serialize};

use super::models::{Bundle, RawEntry};

/// Flat projection of one patient, the row shape every sink writes
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub patient_id: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
}

impl FlatRecord {
    pub const HEADER: [&'static str; 4] = ["patient_id", "full_name", "gender", "birth_date"];
}

/// All records produced from one fetched page, in page order
pub type Batch = Vec<FlatRecord>;

/// Flatten one entry. Never fails: absent fields stay absent, and a missing
/// name yields an empty `full_name`. Only the first `name` element is used.
pub fn normalize(entry: &RawEntry) -> FlatRecord {
    let patient = &entry.resource;

    FlatRecord {
        patient_id: patient.id.clone(),
        full_name: patient
            .name
            .first()
            .map(|name| name.full_name())
            .unwrap_or_default(),
        gender: patient.gender.clone(),
        birth_date: patient.birth_date.clone(),
    }
}

pub fn normalize_bundle(bundle: &Bundle) -> Batch {
    bundle.entry.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fhir::models::{BundleEntry, HumanName, Patient};

    fn entry(id: &str, given: &[&str], family: Option<&str>) -> RawEntry {
        BundleEntry {
            resource: Patient {
                id: Some(id.to_string()),
                name: vec![HumanName {
                    given: given.iter().map(|g| g.to_string()).collect(),
                    family: family.map(str::to_string),
                }],
                gender: Some("female".to_string()),
                birth_date: Some("1980-02-01".to_string()),
            },
        }
    }

    #[test]
    fn test_normalize_joins_given_and_family() {
        let record = normalize(&entry("p1", &["Jane", "Q"], Some("Doe")));

        assert_eq!(
            record,
            FlatRecord {
                patient_id: Some("p1".to_string()),
                full_name: "Jane Q Doe".to_string(),
                gender: Some("female".to_string()),
                birth_date: Some("1980-02-01".to_string()),
            }
        );
    }

    #[test]
    fn test_normalize_without_name() {
        let record = normalize(&BundleEntry::default());

        assert_eq!(record.full_name, "");
        assert_eq!(record.patient_id, None);
        assert_eq!(record.gender, None);
        assert_eq!(record.birth_date, None);
    }

    #[test]
    fn test_normalize_uses_first_name_only() {
        let mut raw = entry("p2", &["Peter"], Some("Chalmers"));
        raw.resource.name.push(HumanName {
            given: vec!["Jim".to_string()],
            family: Some("Windsor".to_string()),
        });

        assert_eq!(normalize(&raw).full_name, "Peter Chalmers");
    }

    #[test]
    fn test_normalize_bundle_keeps_order_and_duplicates() {
        let bundle = Bundle {
            entry: vec![
                entry("b", &["B"], None),
                entry("a", &["A"], None),
                entry("b", &["B"], None),
            ],
        };

        let ids: Vec<_> = normalize_bundle(&bundle)
            .into_iter()
            .map(|r| r.patient_id.unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_empty_bundle_gives_empty_batch() {
        assert!(normalize_bundle(&Bundle::default()).is_empty());
    }
}
