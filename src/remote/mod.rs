//! External service seams.
//!
//! The hosted document store, the species-identification service, and
//! the identity provider are consumed behind traits so the core can be
//! driven by real network adapters in the app and by stubs or the
//! in-process [`MemoryStore`] in tests.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::models::{ObservationRecord, StoredObservation};

pub use memory::MemoryStore;

/// A full replacement view of all observations, as delivered by one
/// feed notification. Ordering is whatever the store emits.
pub type Snapshot = Vec<StoredObservation>;

/// The hosted document store holding the observation collection.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Persist one observation document; returns the durable id the
    /// store assigned.
    async fn write_observation(&self, record: &ObservationRecord) -> Result<String>;

    /// Subscribe to the observation collection, unfiltered. Every
    /// change notification delivers a full snapshot on the returned
    /// channel; a closed channel means the feed was disrupted.
    async fn subscribe(&self) -> Result<UnboundedReceiver<Snapshot>>;
}

/// Species-name canonicalization: free text in, stable identifier out.
#[async_trait]
pub trait SpeciesResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<String>;
}

/// The signed-in user, as the identity provider reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub uid: String,
    pub display_name: String,
}

/// Synchronous accessor for the current authenticated user.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
}
