//! The process-wide `running` flag.
//!
//! Every loop (consumer, watchers, continuations) holds a [`Running`] and
//! checks it at each iteration boundary. Flipping the [`ShutdownSwitch`] is
//! the only way anything gets cancelled.

use std::time::Duration;
use tokio::sync::watch;

pub struct ShutdownSwitch {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct Running {
    rx: watch::Receiver<bool>,
}

/// A fresh flag in the running position.
pub fn running_flag() -> (ShutdownSwitch, Running) {
    let (tx, rx) = watch::channel(true);
    (ShutdownSwitch { tx }, Running { rx })
}

impl ShutdownSwitch {
    pub fn stop(&self) {
        if self.tx.send_replace(false) {
            tracing::info!("Shutdown requested");
        }
    }

    pub fn subscribe(&self) -> Running {
        Running {
            rx: self.tx.subscribe(),
        }
    }

    pub fn is_running(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Running {
    pub fn is_running(&self) -> bool {
        *self.rx.borrow()
    }

    /// Sleep for `duration`, returning early on shutdown.
    ///
    /// Returns whether the process is still running afterwards. A dropped
    /// switch counts as shutdown.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        let stopped = tokio::select! {
            _ = tokio::time::sleep(duration) => false,
            _ = self.rx.wait_for(|running| !*running) => true,
        };
        !stopped && self.is_running()
    }

    /// Resolve once shutdown has been requested.
    pub async fn stopped(&mut self) {
        let _ = self.rx.wait_for(|running| !*running).await;
    }
}
