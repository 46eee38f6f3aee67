//! Shared fixtures for the ingest integration tests

#![allow(dead_code)]

use medpipe_ingest::config::{AwsConfig, IngestConfig, SourceConfig};
use medpipe_ingest::fhir::FlatRecord;
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn patient(id: &str, given: &[&str], family: &str, gender: &str, birth_date: &str) -> Value {
    json!({
        "fullUrl": format!("http://fhir.test/Patient/{}", id),
        "resource": {
            "resourceType": "Patient",
            "id": id,
            "name": [{ "given": given, "family": family }],
            "gender": gender,
            "birthDate": birth_date
        },
        "search": { "mode": "match" }
    })
}

pub fn bundle(entries: Vec<Value>) -> Value {
    json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "entry": entries
    })
}

pub fn two_patient_bundle() -> Value {
    bundle(vec![
        patient("p1", &["Jane", "Q"], "Doe", "female", "1980-02-01"),
        patient("p2", &["Peter"], "Chalmers", "male", "1974-12-25"),
    ])
}

/// Config pointing the FHIR client at `fhir` and the AWS clients at `aws`
pub fn config_for(fhir: &MockServer, aws: Option<&MockServer>) -> IngestConfig {
    IngestConfig {
        source: SourceConfig {
            patient_url: format!("{}/Patient", fhir.uri()),
            page_size: 1000,
        },
        aws: aws_config_for(aws),
    }
}

pub fn aws_config_for(aws: Option<&MockServer>) -> AwsConfig {
    AwsConfig {
        region: "us-east-1".to_string(),
        endpoint: aws.map(|server| server.uri()),
        access_key: Some("AKIDEXAMPLE".to_string()),
        secret_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string()),
        path_style: true,
    }
}

pub fn record(id: &str, full_name: &str) -> FlatRecord {
    FlatRecord {
        patient_id: Some(id.to_string()),
        full_name: full_name.to_string(),
        gender: Some("unknown".to_string()),
        birth_date: Some("2001-01-01".to_string()),
    }
}
