//! Subset of the FHIR R4 `Bundle` / `Patient` shapes the ingest reads
//!
//! Every field is optional on the wire. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// A searchset Bundle as returned by `GET [base]/Patient`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(default)]
    pub resource: Patient,
}

/// One raw record of a fetched page
pub type RawEntry = BundleEntry;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Option<String>,
    #[serde(default)]
    pub name: Vec<HumanName>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(default)]
    pub given: Vec<String>,
    pub family: Option<String>,
}

impl HumanName {
    /// Given names then family name, single-space separated, trimmed
    pub fn full_name(&self) -> String {
        let family = self.family.as_deref().unwrap_or("");
        let parts: Vec<&str> = self
            .given
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(family))
            .collect();

        parts.join(" ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_searchset_bundle() {
        let body = json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "entry": [{
                "fullUrl": "https://hapi.fhir.org/baseR4/Patient/592912",
                "resource": {
                    "resourceType": "Patient",
                    "id": "592912",
                    "name": [{ "use": "official", "family": "Chalmers", "given": ["Peter", "James"] }],
                    "gender": "male",
                    "birthDate": "1974-12-25"
                },
                "search": { "mode": "match" }
            }]
        });

        let bundle: Bundle = serde_json::from_value(body).unwrap();
        let patient = &bundle.entry[0].resource;

        assert_eq!(patient.id.as_deref(), Some("592912"));
        assert_eq!(patient.gender.as_deref(), Some("male"));
        assert_eq!(patient.birth_date.as_deref(), Some("1974-12-25"));
        assert_eq!(patient.name[0].given, vec!["Peter", "James"]);
    }

    #[test]
    fn test_bundle_without_entries() {
        let bundle: Bundle =
            serde_json::from_value(json!({ "resourceType": "Bundle", "total": 0 })).unwrap();
        assert!(bundle.entry.is_empty());
    }

    #[test]
    fn test_entry_without_resource() {
        let entry: BundleEntry = serde_json::from_value(json!({ "fullUrl": "urn:x" })).unwrap();
        assert_eq!(entry.resource, Patient::default());
    }

    #[test]
    fn test_full_name_edges() {
        let family_only = HumanName { given: vec![], family: Some("Doe".to_string()) };
        assert_eq!(family_only.full_name(), "Doe");

        let given_only = HumanName { given: vec!["Jane".to_string()], family: None };
        assert_eq!(given_only.full_name(), "Jane");

        assert_eq!(HumanName::default().full_name(), "");
    }
}
