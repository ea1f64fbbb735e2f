use crate::{ImportError, Result};
use std::time::Duration;
use tokio::sync::watch;

/// Cancellation token for the poll timer.
///
/// - `cancel()` flips a boolean and wakes sleepers.
/// - Clones share the same flag, so a caller can keep one to stop polling.
/// - Sleeps select on either the timer or cancellation.
#[derive(Clone, Debug)]
pub struct CancellationState {
    tx: watch::Sender<bool>,
}

impl Default for CancellationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Sleep for `duration`, returning `ImportError::Cancelled` early if the
/// token fires first.
pub async fn sleep_with_cancel(
    mut cancel_rx: watch::Receiver<bool>,
    duration: Duration,
) -> Result<()> {
    if *cancel_rx.borrow() {
        return Err(ImportError::Cancelled);
    }

    let sleeper = tokio::time::sleep(duration);
    tokio::pin!(sleeper);
    tokio::select! {
        _ = &mut sleeper => Ok(()),
        _ = async {
            loop {
                if cancel_rx.changed().await.is_err() {
                    // Sender dropped; nothing can cancel us any more.
                    std::future::pending::<()>().await;
                }
                if *cancel_rx.borrow() {
                    break;
                }
            }
        } => Err(ImportError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_sleep_completes_without_cancel() {
        let state = CancellationState::new();
        assert!(sleep_with_cancel(state.subscribe(), Duration::from_millis(5))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let state = CancellationState::new();
        state.cancel();
        assert!(state.is_cancelled());
        assert!(matches!(
            sleep_with_cancel(state.subscribe(), Duration::from_secs(60)).await,
            Err(ImportError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_cancel_wakes_sleeper() {
        let state = CancellationState::new();
        let canceller = state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let result = sleep_with_cancel(state.subscribe(), Duration::from_secs(60)).await;
        assert!(matches!(result, Err(ImportError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
