//! Observation assembly: capture batch in, normalized upload record out.
//!
//! The assembler is the gatekeeper for the clustering preconditions: it
//! rejects empty batches and any accepted capture lacking coordinates
//! or a parseable timestamp, so undefined values never flow into the
//! centroid or the canonical-timestamp reduction.

use chrono::SecondsFormat;

use crate::clustering::{
    accepted_captures, earliest_timestamp, estimate_location, parse_capture_timestamp,
    ClusterConfig, GeoFix,
};
use crate::models::{
    AnimalTag, Capture, ImageMetadata, ImageUpload, ObservationRecord, UserRef,
};
use crate::observations::UploadError;
use crate::remote::UserIdentity;

/// A submission request: what the user typed plus the capture batch.
/// The batch is owned by the assembly operation that consumes it.
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub animal_name: String,
    pub description: String,
    pub captures: Vec<Capture>,
}

/// Build the upload record for a batch.
///
/// `species_id` is the stable identifier the identification service
/// returned for `request.animal_name`. Fails without side effects; the
/// remote write happens in the controller afterwards.
pub(crate) fn assemble_record(
    user: &UserIdentity,
    species_id: String,
    request: NewObservation,
    config: &ClusterConfig,
) -> Result<ObservationRecord, UploadError> {
    let kept = accepted_captures(request.captures);
    if kept.is_empty() {
        return Err(UploadError::NoAcceptedCaptures);
    }

    let mut fixes = Vec::with_capacity(kept.len());
    let mut instants = Vec::with_capacity(kept.len());
    for capture in &kept {
        let (latitude, longitude) =
            capture
                .coordinates()
                .ok_or_else(|| UploadError::MissingCoordinates {
                    uri: capture.uri.clone(),
                })?;
        let raw = capture
            .timestamp_raw()
            .ok_or_else(|| UploadError::InvalidTimestamp {
                uri: capture.uri.clone(),
            })?;
        let instant =
            parse_capture_timestamp(raw).map_err(|_| UploadError::InvalidTimestamp {
                uri: capture.uri.clone(),
            })?;

        fixes.push(GeoFix {
            latitude,
            longitude,
        });
        instants.push(instant);
    }

    // Both reductions are total; the empty case was rejected above.
    let location =
        estimate_location(&fixes, config).ok_or(UploadError::NoAcceptedCaptures)?;
    let timestamp = earliest_timestamp(&instants)
        .ok_or(UploadError::NoAcceptedCaptures)?
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    // Only the raw coordinate strings travel with each image; copying
    // the full EXIF block would leak fields the user never reviewed.
    let images = kept
        .iter()
        .zip(&fixes)
        .map(|(capture, fix)| ImageUpload {
            uri: capture.uri.clone(),
            metadata: ImageMetadata {
                latitude: fix.latitude.to_string(),
                longitude: fix.longitude.to_string(),
            },
        })
        .collect();

    Ok(ObservationRecord {
        user: UserRef {
            ref_id: user.uid.clone(),
            name: user.display_name.clone(),
        },
        animal_name: vec![AnimalTag {
            ref_id: species_id,
            name: request.animal_name,
            upvotes: 0,
        }],
        location,
        timestamp,
        description: request.description,
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExifData, NO_RADIUS};

    fn user() -> UserIdentity {
        UserIdentity {
            uid: "user-1".into(),
            display_name: "Ada".into(),
        }
    }

    fn capture(uri: &str, lat: f64, lon: f64, ts: &str) -> Capture {
        Capture {
            uri: uri.into(),
            exif: Some(ExifData {
                gps_latitude: Some(lat),
                gps_longitude: Some(lon),
                timestamp: Some(ts.into()),
            }),
            accepted: true,
        }
    }

    fn request(captures: Vec<Capture>) -> NewObservation {
        NewObservation {
            animal_name: "fox".into(),
            description: "seen near river".into(),
            captures,
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let discarded = Capture {
            accepted: false,
            ..capture("a", 10.0, 10.0, "2024-01-01T00:00:00Z")
        };
        let err = assemble_record(
            &user(),
            "species-fox".into(),
            request(vec![discarded]),
            &ClusterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::NoAcceptedCaptures));
    }

    #[test]
    fn capture_without_gps_fails_the_submission() {
        let mut no_gps = capture("b", 10.0, 10.0, "2024-01-01T00:00:00Z");
        no_gps.exif.as_mut().unwrap().gps_longitude = None;

        let batch = vec![capture("a", 10.0, 10.0, "2024-01-01T00:00:00Z"), no_gps];
        let err = assemble_record(
            &user(),
            "species-fox".into(),
            request(batch),
            &ClusterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::MissingCoordinates { uri } if uri == "b"));
    }

    #[test]
    fn capture_with_bad_timestamp_fails_the_submission() {
        let batch = vec![capture("a", 10.0, 10.0, "not a timestamp")];
        let err = assemble_record(
            &user(),
            "species-fox".into(),
            request(batch),
            &ClusterConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::InvalidTimestamp { uri } if uri == "a"));
    }

    #[test]
    fn assembles_a_normalized_record() {
        // ~0.1 km apart: inside the significance threshold.
        let batch = vec![
            capture("a", 10.0, 10.0, "2024-01-01T01:00:00Z"),
            capture("b", 10.0009, 10.0, "2024-01-01T00:00:00Z"),
        ];
        let record = assemble_record(
            &user(),
            "species-fox".into(),
            request(batch),
            &ClusterConfig::default(),
        )
        .unwrap();

        assert_eq!(record.user.ref_id, "user-1");
        assert_eq!(record.user.name, "Ada");

        assert_eq!(record.animal_name.len(), 1);
        assert_eq!(record.animal_name[0].ref_id, "species-fox");
        assert_eq!(record.animal_name[0].name, "fox");
        assert_eq!(record.animal_name[0].upvotes, 0);

        assert!((record.location.latitude - 10.00045).abs() < 1e-9);
        assert_eq!(record.location.longitude, 10.0);
        assert_eq!(record.location.radius, NO_RADIUS);

        // Anchored to the earliest capture, not the batch order.
        assert_eq!(record.timestamp, "2024-01-01T00:00:00Z");

        assert_eq!(record.images.len(), 2);
        assert_eq!(record.images[0].uri, "a");
        assert_eq!(record.images[0].metadata.latitude, "10");
        assert_eq!(record.images[1].metadata.latitude, "10.0009");
    }

    #[test]
    fn discarded_captures_do_not_contribute() {
        let far_but_discarded = Capture {
            accepted: false,
            ..capture("x", 55.0, 90.0, "2020-01-01T00:00:00Z")
        };
        let batch = vec![
            capture("a", 10.0, 10.0, "2024-01-01T00:00:00Z"),
            far_but_discarded,
        ];
        let record = assemble_record(
            &user(),
            "species-fox".into(),
            request(batch),
            &ClusterConfig::default(),
        )
        .unwrap();

        assert_eq!(record.images.len(), 1);
        assert_eq!(record.location.latitude, 10.0);
        assert_eq!(record.location.radius, NO_RADIUS);
        assert_eq!(record.timestamp, "2024-01-01T00:00:00Z");
    }
}
