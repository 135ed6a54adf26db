//! Feed worker: applies remote snapshot notifications to the local view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use crate::remote::Snapshot;

/// Receives snapshots until cancelled or the feed closes. Each
/// notification fully replaces the view: last notification wins, no
/// merging with previous local state.
pub(crate) async fn feed_loop(
    mut notifications: UnboundedReceiver<Snapshot>,
    view: Arc<Mutex<Arc<Snapshot>>>,
    live: Arc<AtomicBool>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            notification = notifications.recv() => match notification {
                Some(snapshot) => {
                    debug!("observation feed delivered {} documents", snapshot.len());
                    *view.lock().unwrap() = Arc::new(snapshot);
                }
                None => {
                    // No automatic resubscription; the last view stays
                    // readable but stale until the host restarts the feed.
                    warn!("observation feed closed, local view is now stale");
                    live.store(false, Ordering::SeqCst);
                    break;
                }
            },
            _ = cancel_token.cancelled() => {
                info!("observation feed shutting down");
                break;
            }
        }
    }
}
