//! Scripted [`TransferClient`] implementation.
//!
//! Each behavior knob maps to one failure or timing mode the actor has to
//! tolerate: low balances, missing base fees, rejected submissions, slow
//! relays, and relays that never complete.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;

use crate::error::ClientError;
use crate::ports::{BlockInfo, DepositHandle, Network, TransferClient};

/// 1 ETH in wei.
const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Whole ether as wei, for readable test amounts.
#[must_use]
pub fn eth(n: u64) -> U256 {
    U256::from(n) * U256::from(WEI_PER_ETH)
}

/// Shared call counters and recorded submissions for assertions.
#[derive(Debug, Default)]
pub struct StubCounters {
    pub deposits: AtomicU32,
    pub sends: AtomicU32,
    pub relay_polls: AtomicU32,
    pub confirmations: AtomicU32,
    pub last_gas_price: Mutex<Option<u128>>,
    /// When each deposit submission started, for overlap assertions.
    pub deposit_starts: Mutex<Vec<tokio::time::Instant>>,
}

/// A scripted transfer client.
pub struct StubClient {
    base_balance: U256,
    derived_balance: U256,
    base_fee: Option<u128>,
    relay_polls_until_relayed: u32,
    hang_relay: bool,
    fail_send: bool,
    fail_deposit: bool,
    /// Artificial duration of the deposit submission, to overrun ticks.
    deposit_delay: Duration,
    counters: Arc<StubCounters>,
}

impl StubClient {
    pub fn new() -> Self {
        Self {
            base_balance: eth(20),
            derived_balance: eth(1),
            base_fee: Some(1000),
            relay_polls_until_relayed: 0,
            hang_relay: false,
            fail_send: false,
            fail_deposit: false,
            deposit_delay: Duration::ZERO,
            counters: Arc::new(StubCounters::default()),
        }
    }

    pub fn with_base_balance(mut self, balance: U256) -> Self {
        self.base_balance = balance;
        self
    }

    pub fn with_derived_balance(mut self, balance: U256) -> Self {
        self.derived_balance = balance;
        self
    }

    pub fn with_base_fee(mut self, base_fee: Option<u128>) -> Self {
        self.base_fee = base_fee;
        self
    }

    /// Relay reaches its terminal state after this many status polls.
    pub fn with_relay_polls(mut self, polls: u32) -> Self {
        self.relay_polls_until_relayed = polls;
        self
    }

    /// Relay wait never resolves.
    pub fn with_hanging_relay(mut self) -> Self {
        self.hang_relay = true;
        self
    }

    pub fn with_failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn with_failing_deposit(mut self) -> Self {
        self.fail_deposit = true;
        self
    }

    pub fn with_deposit_delay(mut self, delay: Duration) -> Self {
        self.deposit_delay = delay;
        self
    }

    /// Shared counters for asserting call counts after a run.
    pub fn counters(&self) -> Arc<StubCounters> {
        Arc::clone(&self.counters)
    }
}

impl Default for StubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransferClient for StubClient {
    async fn get_balance(&self, network: Network) -> Result<U256, ClientError> {
        Ok(match network {
            Network::Base => self.base_balance,
            Network::Derived => self.derived_balance,
        })
    }

    async fn deposit_eth(&self, _amount: U256) -> Result<DepositHandle, ClientError> {
        self.counters
            .deposit_starts
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        self.counters.deposits.fetch_add(1, Ordering::SeqCst);

        if self.fail_deposit {
            return Err(ClientError::Submission {
                network: Network::Base,
                message: "scripted deposit failure".into(),
            });
        }
        if !self.deposit_delay.is_zero() {
            tokio::time::sleep(self.deposit_delay).await;
        }

        Ok(DepositHandle {
            tx_hash: B256::repeat_byte(0xaa),
        })
    }

    async fn wait_for_confirmation(
        &self,
        _network: Network,
        _tx_hash: TxHash,
    ) -> Result<(), ClientError> {
        self.counters.confirmations.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(())
    }

    async fn wait_for_relayed(&self, _deposit: &DepositHandle) -> Result<(), ClientError> {
        if self.hang_relay {
            std::future::pending::<()>().await;
        }
        for _ in 0..self.relay_polls_until_relayed {
            self.counters.relay_polls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        Ok(())
    }

    async fn latest_block(&self, _network: Network) -> Result<BlockInfo, ClientError> {
        Ok(BlockInfo {
            number: 7,
            base_fee_per_gas: self.base_fee,
        })
    }

    async fn send_transaction(
        &self,
        _to: Address,
        _value: U256,
        gas_price: u128,
    ) -> Result<TxHash, ClientError> {
        self.counters.sends.fetch_add(1, Ordering::SeqCst);
        *self.counters.last_gas_price.lock().unwrap() = Some(gas_price);

        if self.fail_send {
            return Err(ClientError::Submission {
                network: Network::Derived,
                message: "scripted send failure".into(),
            });
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(B256::repeat_byte(0xbb))
    }
}
