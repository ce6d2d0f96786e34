use thiserror::Error;

use crate::ports::Network;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("failed to read bridge address file: {0}")]
    ReadAddressFile(#[source] std::io::Error),

    #[error("failed to parse bridge address file: {0}")]
    ParseAddressFile(#[source] serde_json::Error),
}

/// Errors surfaced by the transfer client during an operation.
///
/// Every variant is caught at the operation boundary and folded into an
/// [`OperationOutcome::Failed`](crate::domain::OperationOutcome::Failed);
/// none of these ever reach the actor loop.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("rpc request failed on {network} network: {message}")]
    Rpc { network: Network, message: String },

    #[error("submission failed on {network} network: {message}")]
    Submission { network: Network, message: String },

    #[error("confirmation wait failed on {network} network: {message}")]
    Confirmation { network: Network, message: String },

    #[error("relay status wait failed: {0}")]
    RelayWait(String),

    #[error("latest {network} block reports no base fee")]
    MissingBaseFee { network: Network },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, Error>;
