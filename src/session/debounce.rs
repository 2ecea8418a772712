//! Cancellable debounce task

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delivers only the last value of a burst, after a quiet period
///
/// Every `schedule` aborts the pending delivery and starts a new timer.
/// Settled values arrive on the receiver returned by [`Debouncer::new`].
/// Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(wait: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            wait,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Replace any pending value with `value`
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a value is still waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    const WAIT: Duration = Duration::from_millis(220);

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule("r");
        debouncer.schedule("ru");
        debouncer.schedule("rust");

        assert_eq!(rx.recv().await, Some("rust"));
        tokio::time::sleep(WAIT * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_restarts_timer() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        let start = Instant::now();

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
        debouncer.schedule(2);

        assert_eq!(rx.recv().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(320));
        tokio::task::yield_now().await;
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_inputs_all_arrive() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule("a");
        assert_eq!(rx.recv().await, Some("a"));
        debouncer.schedule("b");
        assert_eq!(rx.recv().await, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (mut debouncer, mut rx) = Debouncer::new(WAIT);
        debouncer.schedule("x");
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(WAIT * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
