//! Per-tick operation intents.
//!
//! Both intents are value types built fresh each tick; they carry no
//! identity beyond the tick that created them.

use alloy_primitives::{Address, U256};

/// A single bridge deposit to attempt this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositIntent {
    pub amount: U256,
}

/// A single plain transfer to attempt this tick.
///
/// `fee_bid` is computed from the live latest block, never configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferIntent {
    pub amount: U256,
    pub recipient: Address,
    pub fee_bid: u128,
}
