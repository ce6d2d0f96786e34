//! Trait definitions for the external surfaces the actor drives.

pub mod client;

pub use client::{BlockInfo, DepositHandle, Network, TransferClient};
