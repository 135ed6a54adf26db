//! Capture data model.
//!
//! Represents a single photographed frame handed over by the camera
//! facility, together with whatever EXIF metadata the device recorded.
//! GPS and timestamp fields are genuinely optional on real devices
//! (location services off, clock unset), so they are modeled as
//! `Option` rather than sentinel values.

use serde::{Deserialize, Serialize};

/// EXIF block attached to a capture. Every field may be absent.
///
/// Field names follow the EXIF keys the capture facility emits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExifData {
    #[serde(rename = "GPSLatitude")]
    pub gps_latitude: Option<f64>,
    #[serde(rename = "GPSLongitude")]
    pub gps_longitude: Option<f64>,
    /// RFC 3339 text as written by the capture facility.
    pub timestamp: Option<String>,
}

/// One photographed frame plus its metadata and the user's keep/discard
/// decision. Created by the capture facility; read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    /// Opaque handle to the image (file URI or upload token).
    pub uri: String,
    pub exif: Option<ExifData>,
    /// False when the user discarded this frame during review.
    pub accepted: bool,
}

impl Capture {
    /// GPS coordinates, present only when both axes were recorded.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let exif = self.exif.as_ref()?;
        match (exif.gps_latitude, exif.gps_longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Raw capture timestamp text, if the device recorded one.
    pub fn timestamp_raw(&self) -> Option<&str> {
        self.exif.as_ref()?.timestamp.as_deref()
    }
}
