//! Tabular encoding shared by the file and object-store sinks

use crate::error::SinkError;
use crate::fhir::FlatRecord;

/// Encode the batch as CSV, header first
///
/// The header is written even for an empty batch. Absent values become empty
/// cells.
pub fn encode(batch: &[FlatRecord]) -> Result<Vec<u8>, SinkError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(FlatRecord::HEADER)?;
    for record in batch {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| SinkError::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rows() {
        let batch = vec![
            FlatRecord {
                patient_id: Some("p1".to_string()),
                full_name: "Jane Q Doe".to_string(),
                gender: Some("female".to_string()),
                birth_date: Some("1980-02-01".to_string()),
            },
            FlatRecord {
                patient_id: Some("p2".to_string()),
                full_name: "Smith, Jr".to_string(),
                gender: None,
                birth_date: None,
            },
        ];

        let out = String::from_utf8(encode(&batch).unwrap()).unwrap();
        assert_eq!(
            out,
            "patient_id,full_name,gender,birth_date\n\
             p1,Jane Q Doe,female,1980-02-01\n\
             p2,\"Smith, Jr\",,\n"
        );
    }

    #[test]
    fn test_encode_empty_batch_has_header() {
        let out = String::from_utf8(encode(&[]).unwrap()).unwrap();
        assert_eq!(out, "patient_id,full_name,gender,birth_date\n");
    }
}
