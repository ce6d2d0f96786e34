//! The actor loop.
//!
//! Fires on a fixed cadence; each tick runs the deposit and transfer
//! operations concurrently against fresh intents and settles only when
//! both have reported. An overrunning tick delays the next one, it is
//! never skipped or overlapped.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::{run_deposit, run_transfer};
use crate::domain::DepositIntent;
use crate::ports::TransferClient;

/// The slice of configuration owned by the actor loop.
#[derive(Debug, Clone, Copy)]
pub struct ActorConfig {
    /// Amount moved per operation, in wei.
    pub amount: U256,
    /// Derived-network account receiving plain transfers.
    pub recipient: Address,
    pub loop_interval: Duration,
}

/// The scheduling loop driving both operations against one client.
pub struct Actor<C> {
    client: Arc<C>,
    config: ActorConfig,
}

impl<C> Actor<C>
where
    C: TransferClient,
{
    pub fn new(client: Arc<C>, config: ActorConfig) -> Self {
        Self { client, config }
    }

    /// Run until the process is stopped externally.
    pub async fn run(&self) {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run_with_shutdown(shutdown_rx).await;
    }

    /// Run until `shutdown` flips to `true`.
    ///
    /// The first tick fires immediately. A tick in flight finishes before
    /// shutdown is observed.
    pub async fn run_with_shutdown(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.config.loop_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick = 0u64;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick(tick).await;
                    tick += 1;
                }
                result = shutdown.changed() => {
                    match result {
                        Ok(()) if !*shutdown.borrow() => continue,
                        _ => {
                            info!("actor loop stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Run one tick: both operations concurrently, settle both, report.
    ///
    /// Operations share no mutable state; their submissions on the two
    /// networks may interleave arbitrarily.
    async fn tick(&self, tick: u64) {
        info!(tick, "tick starting");

        let deposit_intent = DepositIntent {
            amount: self.config.amount,
        };

        let (deposit, transfer) = tokio::join!(
            run_deposit(self.client.as_ref(), deposit_intent),
            run_transfer(
                self.client.as_ref(),
                self.config.amount,
                self.config.recipient
            ),
        );

        deposit.log("deposit");
        transfer.log("transfer");
        info!(
            tick,
            deposit_ok = deposit.is_success(),
            transfer_ok = transfer.is_success(),
            "tick settled"
        );
    }
}
