//! Temporal reduction: the canonical timestamp of an observation.
//!
//! An observation is anchored to when the animal was first recorded,
//! so the canonical timestamp is the earliest capture time in the
//! batch, not the last supporting photo.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

/// Parse a capture's EXIF timestamp (RFC 3339 text) into a UTC instant.
pub fn parse_capture_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid capture timestamp '{raw}': {err}"))
}

/// The earliest instant in the batch, or `None` for an empty slice.
pub fn earliest_timestamp(instants: &[DateTime<Utc>]) -> Option<DateTime<Utc>> {
    instants.iter().min().copied()
}
