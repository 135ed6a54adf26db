//! Observation assembly and live-sync core for a wildlife sighting app.
//!
//! The app photographs animals, geotags and timestamps the shots, and
//! folds each reviewed batch into one normalized observation: centroid
//! location with an enclosing radius, the earliest capture time, user
//! attribution, and a species tag. Observations upload to a hosted
//! document store whose change feed streams full snapshots back to
//! every client; [`ObservationController`] keeps the local view
//! reconciled against that feed.
//!
//! Camera capture, UI, auth, and the hosted store itself live outside
//! this crate: captures arrive as records, and the external services
//! plug in behind the traits in [`remote`].

pub mod clustering;
pub mod models;
pub mod observations;
pub mod remote;

pub use clustering::ClusterConfig;
pub use models::{Capture, ExifData, ObservationRecord, StoredObservation, NO_RADIUS};
pub use observations::{NewObservation, ObservationController, UploadError};
pub use remote::{
    IdentityProvider, MemoryStore, ObservationStore, Snapshot, SpeciesResolver, UserIdentity,
};

/// Initialize logging (reads RUST_LOG env var). Call once at startup.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
