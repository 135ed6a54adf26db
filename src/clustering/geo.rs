//! Geospatial clustering: centroid and enclosing radius of a capture
//! batch.
//!
//! A batch of accepted captures collapses to one location: the
//! arithmetic-mean coordinate, plus the maximum great-circle distance
//! from that centroid to any capture. Spreads at or below the
//! significance threshold are reported as a single point so GPS jitter
//! between burst shots never produces a spurious near-zero radius.

use crate::clustering::config::ClusterConfig;
use crate::models::{LocationEstimate, NO_RADIUS};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated GPS coordinate. Captures without coordinates never make
/// it this far; the assembler rejects them before clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle (haversine) distance between two coordinates, in km.
pub fn haversine_km(a: GeoFix, b: GeoFix) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Estimate the location of a capture batch: mean coordinate plus the
/// enclosing radius.
///
/// Returns `None` for an empty slice. A single fix, or a spread whose
/// maximum centroid distance is within `config.radius_significance_km`,
/// yields the [`NO_RADIUS`] sentinel.
pub fn estimate_location(fixes: &[GeoFix], config: &ClusterConfig) -> Option<LocationEstimate> {
    if fixes.is_empty() {
        return None;
    }

    let count = fixes.len() as f64;
    let centroid = GeoFix {
        latitude: fixes.iter().map(|f| f.latitude).sum::<f64>() / count,
        longitude: fixes.iter().map(|f| f.longitude).sum::<f64>() / count,
    };

    let mut radius = NO_RADIUS;
    if fixes.len() > 1 {
        let max_distance = fixes
            .iter()
            .map(|f| haversine_km(centroid, *f))
            .fold(0.0, f64::max);
        if max_distance > config.radius_significance_km {
            radius = max_distance;
        }
    }

    Some(LocationEstimate {
        latitude: centroid.latitude,
        longitude: centroid.longitude,
        radius,
    })
}
