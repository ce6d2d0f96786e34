//! Transfer client port.
//!
//! The actor core never talks to a chain directly; it drives this trait.
//! The production implementation is [`BridgeClient`](crate::bridge::BridgeClient);
//! tests script one through the testkit stub.

use std::fmt;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::ClientError;

/// Which of the two linked networks a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// The network where deposits originate.
    Base,
    /// The network receiving deposits and plain transfers.
    Derived,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Base => f.write_str("base"),
            Network::Derived => f.write_str("derived"),
        }
    }
}

/// The slice of a block header the actor cares about.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockInfo {
    pub number: u64,
    /// Absent on networks without a dynamic fee market.
    pub base_fee_per_gas: Option<u128>,
}

/// Handle for a submitted deposit.
///
/// Carries only the base-network submission hash; whatever state a
/// client needs to recognize the terminal relayed state stays inside
/// that client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositHandle {
    pub tx_hash: TxHash,
}

/// Client surface for moving value on and between the two networks.
///
/// Implementations must be thread-safe; the deposit and transfer
/// operations of one tick hold the same client concurrently.
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Current balance of the funding wallet on `network`.
    async fn get_balance(&self, network: Network) -> Result<U256, ClientError>;

    /// Submit a bridge deposit of `amount` on the base network.
    ///
    /// Returns as soon as the transaction has been broadcast; confirmation
    /// and relay completion are separate waits.
    async fn deposit_eth(&self, amount: U256) -> Result<DepositHandle, ClientError>;

    /// Block until `tx_hash` is included on `network`.
    async fn wait_for_confirmation(
        &self,
        network: Network,
        tx_hash: TxHash,
    ) -> Result<(), ClientError>;

    /// Block until the deposit has reached its terminal relayed state on
    /// the derived network.
    ///
    /// Carries no timeout of its own; a stuck relay pins the caller until
    /// the underlying transport gives up.
    async fn wait_for_relayed(&self, deposit: &DepositHandle) -> Result<(), ClientError>;

    /// Latest block header fields on `network`.
    async fn latest_block(&self, network: Network) -> Result<BlockInfo, ClientError>;

    /// Submit a plain value transfer on the derived network.
    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        gas_price: u128,
    ) -> Result<TxHash, ClientError>;
}
