//! Background sweep of idle carts.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::{MissedTickBehavior, interval},
};

use crate::domain::carts::CartsService;

/// Periodically deletes idle carts; a sweep can also be requested through a [`JanitorHandle`].
pub struct CartJanitor {
    carts: Arc<dyn CartsService>,
    period: Duration,
    triggers: mpsc::Receiver<()>,
}

/// Requests an immediate sweep from a running [`CartJanitor`].
#[derive(Debug, Clone)]
pub struct JanitorHandle {
    sender: mpsc::Sender<()>,
}

impl JanitorHandle {
    /// Ask for a sweep. Returns `false` once the janitor has stopped.
    ///
    /// A sweep already pending absorbs the request.
    pub fn trigger(&self) -> bool {
        match self.sender.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        }
    }
}

impl CartJanitor {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, period: Duration) -> (Self, JanitorHandle) {
        let (sender, triggers) = mpsc::channel(1);

        let janitor = Self {
            carts,
            period,
            triggers,
        };

        (janitor, JanitorHandle { sender })
    }

    /// Sweep on every tick and every trigger until all handles are dropped.
    pub async fn run(mut self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                trigger = self.triggers.recv() => {
                    if trigger.is_none() {
                        break;
                    }

                    ticker.reset();
                }
            }

            self.sweep().await;
        }

        tracing::debug!("cart janitor stopped");
    }

    async fn sweep(&self) {
        if let Err(error) = self.carts.clean_old_carts().await {
            tracing::error!(error = %error, "failed to clean old carts");
        }
    }
}

impl std::fmt::Debug for CartJanitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartJanitor")
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}
