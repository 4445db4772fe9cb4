//! Quiet-period scheduling for filter edits and keystrokes.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs the most recently scheduled action once `window` has passed
/// without another call to [`schedule`](Debouncer::schedule).
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<Pending>>,
}

#[derive(Debug)]
struct Pending {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// The quiet period.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the quiet period with `action` as the pending action.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("Debounced action superseded");
                }
                _ = tokio::time::sleep(window) => {
                    action.await;
                }
            }
        });

        let previous = self.lock().replace(Pending { cancel, handle });
        if let Some(previous) = previous {
            previous.cancel.cancel();
        }
    }

    /// Drop the pending action, if any, before it fires.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock().take() {
            pending.cancel.cancel();
        }
    }

    /// Whether an action is scheduled and has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished() && !p.cancel.is_cancelled())
    }

    /// Wait for the pending action (quiet period plus the action itself)
    /// to finish.
    pub async fn settle(&self) {
        let pending = self.lock().take();
        if let Some(pending) = pending {
            let _ = pending.handle.await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
