pub mod assembler;
pub mod controller;
pub mod feed;

use thiserror::Error;

pub use assembler::NewObservation;
pub use controller::ObservationController;

/// Why a submission failed. Every failure aborts the whole upload; no
/// partial record is created and nothing is retried locally.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No signed-in user at submission time.
    #[error("no signed-in user to attribute the observation to")]
    IdentityUnavailable,

    /// The species-identification service failed or timed out.
    #[error("species lookup for {name:?} failed")]
    IdentificationFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The batch contained no captures the user kept.
    #[error("observation batch has no accepted captures")]
    NoAcceptedCaptures,

    /// An accepted capture carries no GPS coordinates, so the batch
    /// cannot be clustered. The whole submission is rejected rather
    /// than silently dropping the capture.
    #[error("capture {uri} has no GPS coordinates")]
    MissingCoordinates { uri: String },

    /// An accepted capture has no usable timestamp.
    #[error("capture {uri} has a missing or unparseable timestamp")]
    InvalidTimestamp { uri: String },

    /// The remote store rejected the document or the write timed out.
    #[error("remote write failed")]
    WriteFailed(#[source] anyhow::Error),
}
