//! Observation controller: upload orchestration plus live-view
//! reconciliation against the remote observation feed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;

use crate::clustering::ClusterConfig;
use crate::observations::assembler::{assemble_record, NewObservation};
use crate::observations::feed::feed_loop;
use crate::observations::UploadError;
use crate::remote::{IdentityProvider, ObservationStore, Snapshot, SpeciesResolver};

const RESOLVE_TIMEOUT_SECS: u64 = 30;
const WRITE_TIMEOUT_SECS: u64 = 30;

struct FeedHandle {
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

/// Clears the advisory upload flag on every exit path of a submission.
struct UploadGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> UploadGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Owns the locally-held view of all observations and the one upload
/// path toward the remote store.
///
/// The view is written only by the feed task; consumers read immutable
/// [`Snapshot`] references via [`snapshot`](Self::snapshot). The upload
/// flag is advisory: it does not serialize concurrent submissions,
/// callers disable the submit action while it is set.
pub struct ObservationController {
    store: Arc<dyn ObservationStore>,
    species: Arc<dyn SpeciesResolver>,
    identity: Arc<dyn IdentityProvider>,
    config: ClusterConfig,
    view: Arc<Mutex<Arc<Snapshot>>>,
    uploading: Arc<AtomicBool>,
    live: Arc<AtomicBool>,
    feed: AsyncMutex<Option<FeedHandle>>,
}

impl ObservationController {
    pub fn new(
        store: Arc<dyn ObservationStore>,
        species: Arc<dyn SpeciesResolver>,
        identity: Arc<dyn IdentityProvider>,
        config: ClusterConfig,
    ) -> Self {
        Self {
            store,
            species,
            identity,
            config,
            view: Arc::new(Mutex::new(Arc::new(Vec::new()))),
            uploading: Arc::new(AtomicBool::new(false)),
            live: Arc::new(AtomicBool::new(false)),
            feed: AsyncMutex::new(None),
        }
    }

    /// Subscribe to the remote feed and start applying snapshots.
    pub async fn start(&self) -> Result<()> {
        let mut feed = self.feed.lock().await;
        if feed.is_some() {
            bail!("observation feed already attached");
        }

        let notifications = self
            .store
            .subscribe()
            .await
            .context("failed to subscribe to observation feed")?;

        let cancel_token = CancellationToken::new();
        self.live.store(true, Ordering::SeqCst);
        let task = tokio::spawn(feed_loop(
            notifications,
            self.view.clone(),
            self.live.clone(),
            cancel_token.clone(),
        ));

        *feed = Some(FeedHandle { cancel_token, task });
        info!("observation feed attached");
        Ok(())
    }

    /// Detach from the remote feed. Safe to call repeatedly; once this
    /// returns, no late notification can mutate the view.
    pub async fn stop(&self) -> Result<()> {
        let handle = self.feed.lock().await.take();
        if let Some(FeedHandle { cancel_token, task }) = handle {
            cancel_token.cancel();
            task.await.context("observation feed task failed to join")?;
        }
        self.live.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// The current view of all observations, in feed order.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.view.lock().unwrap().clone()
    }

    /// Whether a submission is currently in flight.
    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Whether the feed task is currently attached and healthy.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Assemble and upload one observation; returns the durable
    /// document id the store assigned.
    ///
    /// The view is not updated optimistically; the new observation
    /// appears once the feed delivers a snapshot containing it.
    pub async fn submit(&self, request: NewObservation) -> Result<String, UploadError> {
        let _guard = UploadGuard::engage(&self.uploading);

        let user = self
            .identity
            .current_user()
            .ok_or(UploadError::IdentityUnavailable)?;

        let resolve = self.species.resolve(&request.animal_name);
        let species_id = match timeout(Duration::from_secs(RESOLVE_TIMEOUT_SECS), resolve).await
        {
            Ok(Ok(id)) => id,
            Ok(Err(err)) => {
                return Err(UploadError::IdentificationFailed {
                    name: request.animal_name.clone(),
                    source: err,
                })
            }
            Err(_) => {
                return Err(UploadError::IdentificationFailed {
                    name: request.animal_name.clone(),
                    source: anyhow!("timed out after {RESOLVE_TIMEOUT_SECS}s"),
                })
            }
        };

        let record = assemble_record(&user, species_id, request, &self.config)?;

        let write = self.store.write_observation(&record);
        let document_id = match timeout(Duration::from_secs(WRITE_TIMEOUT_SECS), write).await {
            Ok(Ok(id)) => id,
            Ok(Err(err)) => return Err(UploadError::WriteFailed(err)),
            Err(_) => {
                return Err(UploadError::WriteFailed(anyhow!(
                    "timed out after {WRITE_TIMEOUT_SECS}s"
                )))
            }
        };

        info!(
            "uploaded observation {document_id} ({} images)",
            record.images.len()
        );
        Ok(document_id)
    }
}
