//! In-process observation store.
//!
//! Holds schemaless JSON documents the way the hosted store does and
//! pushes a full replacement snapshot to every subscriber after each
//! accepted write. Stands in for the hosted store in tests and offline
//! development; nothing here touches the network.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::models::{ObservationRecord, StoredObservation};
use crate::remote::{ObservationStore, Snapshot};

#[derive(Default)]
struct MemoryStoreInner {
    documents: Vec<(String, serde_json::Value)>,
    subscribers: Vec<UnboundedSender<Snapshot>>,
}

impl MemoryStoreInner {
    fn snapshot(&self) -> Snapshot {
        self.documents
            .iter()
            .filter_map(|(id, fields)| {
                match serde_json::from_value::<ObservationRecord>(fields.clone()) {
                    Ok(record) => Some(StoredObservation {
                        id: id.clone(),
                        record,
                    }),
                    Err(err) => {
                        warn!("skipping malformed document {id}: {err}");
                        None
                    }
                }
            })
            .collect()
    }

    fn broadcast(&mut self) {
        let snapshot = self.snapshot();
        // Drop subscribers whose receiving side has gone away.
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

/// In-memory [`ObservationStore`] with live snapshot fan-out.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the collection, outside any subscription.
    pub fn current(&self) -> Snapshot {
        self.inner.lock().unwrap().snapshot()
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn write_observation(&self, record: &ObservationRecord) -> Result<String> {
        let fields =
            serde_json::to_value(record).context("failed to serialize observation record")?;
        let id = Uuid::new_v4().to_string();

        let mut inner = self.inner.lock().unwrap();
        inner.documents.push((id.clone(), fields));
        inner.broadcast();
        Ok(id)
    }

    async fn subscribe(&self) -> Result<UnboundedReceiver<Snapshot>> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut inner = self.inner.lock().unwrap();
        // New subscribers see the collection as it stands right away.
        let _ = tx.send(inner.snapshot());
        inner.subscribers.push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnimalTag, ImageMetadata, ImageUpload, LocationEstimate, UserRef, NO_RADIUS,
    };

    fn record(description: &str) -> ObservationRecord {
        ObservationRecord {
            user: UserRef {
                ref_id: "user-1".into(),
                name: "Ada".into(),
            },
            animal_name: vec![AnimalTag {
                ref_id: "species-fox".into(),
                name: "fox".into(),
                upvotes: 0,
            }],
            location: LocationEstimate {
                latitude: 10.0,
                longitude: 10.0,
                radius: NO_RADIUS,
            },
            timestamp: "2024-01-01T00:00:00+00:00".into(),
            description: description.into(),
            images: vec![ImageUpload {
                uri: "file:///photos/0001.jpg".into(),
                metadata: ImageMetadata {
                    latitude: "10".into(),
                    longitude: "10".into(),
                },
            }],
        }
    }

    #[tokio::test]
    async fn subscribe_delivers_current_contents_immediately() {
        let store = MemoryStore::new();
        store.write_observation(&record("first")).await.unwrap();

        let mut rx = store.subscribe().await.unwrap();
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].record.description, "first");
    }

    #[tokio::test]
    async fn each_write_broadcasts_a_full_snapshot() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe().await.unwrap();
        assert!(rx.recv().await.unwrap().is_empty());

        let id = store.write_observation(&record("first")).await.unwrap();
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);

        store.write_observation(&record("second")).await.unwrap();
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].record.description, "second");
    }

    #[tokio::test]
    async fn writes_assign_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.write_observation(&record("a")).await.unwrap();
        let b = store.write_observation(&record("b")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.current().len(), 2);
    }
}
