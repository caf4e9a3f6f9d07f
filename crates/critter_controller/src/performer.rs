//! Runs performances against the body, one at a time, off the consumer.

use critter_core::{Body, Running};
use critter_expression::Performance;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct Performer {
    tx: mpsc::UnboundedSender<Performance>,
}

impl Performer {
    /// Spawn the performer task. It stops on shutdown or once every
    /// `Performer` handle is dropped.
    pub fn spawn(body: Arc<dyn Body>, mut running: Running) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Performance>();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(performance) => performance.run(body.as_ref()).await,
                        None => break,
                    },
                    _ = running.stopped() => break,
                }
            }
            tracing::debug!("performer stopped");
        });
        (Self { tx }, handle)
    }

    /// Queue a performance behind whatever is already playing.
    pub fn perform(&self, performance: Performance) {
        if performance.is_empty() {
            return;
        }
        if self.tx.send(performance).is_err() {
            tracing::warn!("Performer is gone, dropping performance");
        }
    }
}
