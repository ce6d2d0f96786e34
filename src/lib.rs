//! Chaos actor - continuous load against an L1/L2 bridge.
//!
//! A long-running process that, on a fixed cadence, issues a real bridge
//! deposit on the base network and a plain transfer on the derived
//! network, then observes both to completion (including the asynchronous
//! relay acknowledgment). Operators point it at a deployment to watch
//! relay latency, failures, and backpressure under sustained traffic.
//!
//! # Architecture
//!
//! The core is a scheduling loop over two isolated operations:
//!
//! - **`actor::scheduler`** - fires every `loop_interval`, runs both
//!   operations concurrently, and reschedules regardless of outcome
//! - **`actor::deposit`** - guard check, bridge deposit, confirmation,
//!   relay wait
//! - **`actor::transfer`** - fee bid off the latest block, plain transfer,
//!   confirmation
//!
//! A failure in either operation is caught at that operation's boundary
//! and reported as an [`OperationOutcome`](domain::OperationOutcome);
//! the loop itself has no error path and runs until the process stops.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration, validated once at startup
//! - [`domain`] - Pure decision logic: deposit guard, fee bidding, intents
//! - [`error`] - Error types for the crate
//! - [`ports`] - The [`TransferClient`](ports::TransferClient) trait the
//!   core drives
//! - [`actor`] - The operations and the scheduling loop
//! - [`bridge`] - Alloy-backed client implementation

pub mod actor;
pub mod bridge;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
