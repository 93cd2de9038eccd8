//! Outstanding-work counter shared by every resolver of one call

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Counts requests that were submitted but not yet fully handled
///
/// Work is charged before it is handed to another resolver and discharged
/// once by whoever finishes or abandons it, so the count only reaches
/// zero when nothing is left in flight.
#[derive(Debug, Default)]
pub(crate) struct Completion {
    outstanding: AtomicUsize,
    drained: Notify,
}

impl Completion {
    pub fn add(&self, units: usize) {
        if units > 0 {
            self.outstanding.fetch_add(units, Ordering::SeqCst);
        }
    }

    pub fn done(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "completion counter underflow");
        if previous == 1 {
            self.drained.notify_waiters();
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Wait until the counter reaches zero
    pub async fn wait(&self) {
        loop {
            // Register before checking so a concurrent drain is not missed
            let drained = self.drained.notified();
            if self.outstanding() == 0 {
                return;
            }
            drained.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_immediately_when_idle() {
        let completion = Completion::default();
        tokio_test::block_on(completion.wait());
        assert_eq!(completion.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_wait_blocks_until_every_unit_is_done() {
        let completion = Arc::new(Completion::default());
        completion.add(3);

        let worker = Arc::clone(&completion);
        let handle = tokio::spawn(async move {
            for _ in 0..3 {
                tokio::time::sleep(Duration::from_millis(5)).await;
                worker.done();
            }
        });

        tokio::time::timeout(Duration::from_secs(2), completion.wait())
            .await
            .expect("counter never drained");
        assert_eq!(completion.outstanding(), 0);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_nested_charges_keep_counter_above_zero() {
        let completion = Completion::default();
        completion.add(1);
        // a unit charges its children before discharging itself
        completion.add(2);
        completion.done();
        assert_eq!(completion.outstanding(), 2);
        completion.done();
        completion.done();
        completion.wait().await;
    }
}
