//! FHIR Patient source
//!
//! Fetching one page of `Patient` resources and flattening each entry into a
//! [`FlatRecord`] that every sink understands.

pub mod client;
pub mod models;
pub mod normalize;

pub use client::FhirClient;
pub use models::{Bundle, BundleEntry, HumanName, Patient, RawEntry};
pub use normalize::{normalize, normalize_bundle, Batch, FlatRecord};
