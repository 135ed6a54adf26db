//! Observation record data model.
//!
//! These types are the wire contract toward the hosted document store:
//! one document per observation, camelCase field names. A record is
//! assembled once, uploaded, and never mutated in place afterwards.

use serde::{Deserialize, Serialize};

/// Radius sentinel meaning "single point, no meaningful radius".
pub const NO_RADIUS: f64 = -1.0;

/// Attribution of an observation to the submitting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub ref_id: String,
    pub name: String,
}

/// One species identification attached to an observation.
///
/// A fresh submission always carries exactly one tag with `upvotes: 0`;
/// vote aggregation happens elsewhere, never in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalTag {
    pub ref_id: String,
    pub name: String,
    pub upvotes: u32,
}

/// Centroid of the accepted captures plus an enclosing radius in km.
///
/// `radius` is either the sentinel [`NO_RADIUS`] or a value strictly
/// greater than the significance threshold that produced it. The
/// sentinel is part of the wire contract and serializes as `-1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEstimate {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

/// Per-image metadata carried alongside each uploaded image reference.
///
/// Only the raw coordinate strings travel with the image; no other EXIF
/// field is copied into the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub uri: String,
    pub metadata: ImageMetadata,
}

/// The unit of upload: one normalized sighting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub user: UserRef,
    pub animal_name: Vec<AnimalTag>,
    pub location: LocationEstimate,
    /// RFC 3339, the earliest capture time in the batch.
    pub timestamp: String,
    pub description: String,
    pub images: Vec<ImageUpload>,
}

/// A remote document: the durable identifier the store assigned, merged
/// into the record's field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObservation {
    pub id: String,
    #[serde(flatten)]
    pub record: ObservationRecord,
}
