//! Deferred transitions.
//!
//! A continuation is a short-lived task that waits, checks the running
//! flag, and reports back to the consumer over a channel. It never touches
//! controller state itself.

use critter_core::{ClassifiedIntent, IntentClassifier, Running};
use critter_expression::AfterPerformance;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// WAKEUP → IDLE
    Awake,
    /// SNORING → SLEEPING
    Asleep,
    /// LISTENING → BUSY, with whatever the classifier heard
    Heard(Option<ClassifiedIntent>),
    /// BUSY → IDLE, or off to sleep
    Performed(AfterPerformance),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
    pub epoch: u64,
    pub continuation: Continuation,
}

#[derive(Clone)]
pub(crate) struct Scheduler {
    tx: mpsc::Sender<Deferred>,
    running: Running,
}

impl Scheduler {
    pub(crate) fn new(tx: mpsc::Sender<Deferred>, running: Running) -> Self {
        Self { tx, running }
    }

    /// Report `continuation` after `delay`, unless shutdown comes first.
    pub(crate) fn after(&self, delay: Duration, epoch: u64, continuation: Continuation) {
        let tx = self.tx.clone();
        let mut running = self.running.clone();
        tokio::spawn(async move {
            if running.sleep(delay).await {
                let _ = tx.send(Deferred { epoch, continuation }).await;
            }
        });
    }

    /// Wait out the listening window, then ask the classifier what was said.
    pub(crate) fn listen(
        &self,
        delay: Duration,
        epoch: u64,
        classifier: Arc<dyn IntentClassifier>,
    ) {
        let tx = self.tx.clone();
        let mut running = self.running.clone();
        tokio::spawn(async move {
            if !running.sleep(delay).await {
                return;
            }
            let heard = match classifier.classify().await {
                Ok(intent) => Some(intent),
                Err(e) => {
                    tracing::warn!("Intent classification failed: {:#}", e);
                    None
                }
            };
            if running.is_running() {
                let _ = tx
                    .send(Deferred {
                        epoch,
                        continuation: Continuation::Heard(heard),
                    })
                    .await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::mock::FixedClassifier;
    use critter_core::running_flag;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_after_reports_once_delay_elapses() {
        let (tx, mut rx) = mpsc::channel(4);
        let (_switch, running) = running_flag();
        let scheduler = Scheduler::new(tx, running);

        let start = Instant::now();
        scheduler.after(Duration::from_secs(5), 7, Continuation::Awake);
        let deferred = rx.recv().await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(5));
        assert_eq!(deferred.epoch, 7);
        assert_eq!(deferred.continuation, Continuation::Awake);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_suppresses_report() {
        let (tx, mut rx) = mpsc::channel(4);
        let (switch, running) = running_flag();
        let scheduler = Scheduler::new(tx, running);

        scheduler.after(Duration::from_secs(5), 1, Continuation::Asleep);
        switch.stop();
        drop(scheduler);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_listen_carries_classified_intent() {
        let (tx, mut rx) = mpsc::channel(4);
        let (_switch, running) = running_flag();
        let scheduler = Scheduler::new(tx, running);

        scheduler.listen(Duration::from_secs(5), 3, Arc::new(FixedClassifier::stand_in()));
        let deferred = rx.recv().await.unwrap();
        match deferred.continuation {
            Continuation::Heard(Some(intent)) => {
                assert_eq!(intent.name, "SINGASONG");
                assert_eq!(intent.slot("song"), Some("golden"));
            }
            other => panic!("unexpected continuation {:?}", other),
        }
    }
}
