//! Alloy-backed implementation of the transfer client port.

pub mod client;

pub use client::BridgeClient;
