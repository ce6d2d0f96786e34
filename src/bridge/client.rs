//! Wallet-backed JSON-RPC client for both networks.
//!
//! Deposits send value to the base-network standard bridge; relay
//! completion is observed as the relay crediting the deposited value to
//! the wallet on the derived network. Bridge protocol internals stay
//! behind the contracts.

use std::collections::HashMap;
use std::time::Duration;

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::{BlockNumberOrTag, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::error::{ClientError, ConfigError, Error};
use crate::ports::{BlockInfo, DepositHandle, Network, TransferClient};

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RELAY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Transfer client over one signing key and two RPC endpoints.
pub struct BridgeClient {
    base: DynProvider,
    derived: DynProvider,
    /// Address of the funding wallet on both networks.
    wallet_address: Address,
    l1_standard_bridge: Address,
    /// Relay observation state per in-flight deposit, keyed by the
    /// base-network submission hash.
    pending_relays: Mutex<HashMap<TxHash, CreditWatch>>,
}

/// Walks the derived network block by block, looking for the block in
/// which the relay credits the wallet with the deposited amount.
///
/// The wallet spends from the derived network concurrently (the same
/// tick's transfer operation), so an absolute balance target is
/// unreachable once that transfer confirms first. A per-block net credit
/// of at least the deposit amount stays observable no matter what the
/// wallet's own outflows do in other blocks.
#[derive(Debug, Clone)]
struct CreditWatch {
    amount: U256,
    last_balance: U256,
    next_block: u64,
}

impl CreditWatch {
    /// Start watching from the balance observed at `observed_block`,
    /// taken before the deposit was broadcast.
    fn new(amount: U256, balance: U256, observed_block: u64) -> Self {
        Self {
            amount,
            last_balance: balance,
            next_block: observed_block + 1,
        }
    }

    /// Feed the wallet balance at the next unscanned block.
    ///
    /// Returns true once that block shows a net credit of at least the
    /// deposit amount. A relay credit masked by an own debit landing in
    /// the very same block goes undetected; block granularity is as fine
    /// as balance observation gets without decoding bridge internals.
    fn observe(&mut self, balance: U256) -> bool {
        let credited = balance.saturating_sub(self.last_balance) >= self.amount;
        self.last_balance = balance;
        self.next_block += 1;
        credited
    }
}

impl BridgeClient {
    /// Build providers for both networks from the loaded configuration.
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        let signer: PrivateKeySigner =
            config
                .private_key
                .parse()
                .map_err(|e: alloy_signer_local::LocalSignerError| ConfigError::InvalidValue {
                    name: "PRIVATE_KEY",
                    reason: e.to_string(),
                })?;
        let wallet_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let base = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect(&config.base_rpc_url)
            .await
            .map_err(|e| rpc_error(Network::Base, &e))?
            .erased();
        let derived = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&config.derived_rpc_url)
            .await
            .map_err(|e| rpc_error(Network::Derived, &e))?
            .erased();

        Ok(Self {
            base,
            derived,
            wallet_address,
            l1_standard_bridge: config.bridge.l1_standard_bridge,
            pending_relays: Mutex::new(HashMap::new()),
        })
    }

    fn provider(&self, network: Network) -> &DynProvider {
        match network {
            Network::Base => &self.base,
            Network::Derived => &self.derived,
        }
    }

    async fn balance(&self, network: Network) -> Result<U256, ClientError> {
        self.provider(network)
            .get_balance(self.wallet_address)
            .await
            .map_err(|e| rpc_error(network, &e))
    }

    async fn balance_at(&self, block: u64) -> Result<U256, ClientError> {
        self.derived
            .get_balance(self.wallet_address)
            .block_id(block.into())
            .await
            .map_err(|e| ClientError::RelayWait(e.to_string()))
    }
}

#[async_trait]
impl TransferClient for BridgeClient {
    async fn get_balance(&self, network: Network) -> Result<U256, ClientError> {
        self.balance(network).await
    }

    async fn deposit_eth(&self, amount: U256) -> Result<DepositHandle, ClientError> {
        // Baseline before broadcast: the relay credit can only land in a
        // later derived-network block.
        let observed_block = self
            .derived
            .get_block_number()
            .await
            .map_err(|e| rpc_error(Network::Derived, &e))?;
        let balance = self.balance_at(observed_block).await?;

        let tx = TransactionRequest::default()
            .with_to(self.l1_standard_bridge)
            .with_value(amount);
        let pending =
            self.base
                .send_transaction(tx)
                .await
                .map_err(|e| ClientError::Submission {
                    network: Network::Base,
                    message: e.to_string(),
                })?;
        let tx_hash = *pending.tx_hash();

        self.pending_relays
            .lock()
            .await
            .insert(tx_hash, CreditWatch::new(amount, balance, observed_block));

        Ok(DepositHandle { tx_hash })
    }

    async fn wait_for_confirmation(
        &self,
        network: Network,
        tx_hash: TxHash,
    ) -> Result<(), ClientError> {
        loop {
            let receipt = self
                .provider(network)
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ClientError::Confirmation {
                    network,
                    message: e.to_string(),
                })?;
            if let Some(receipt) = receipt {
                debug!(
                    %tx_hash,
                    network = %network,
                    block = receipt.block_number,
                    "transaction confirmed"
                );
                return Ok(());
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }

    async fn wait_for_relayed(&self, deposit: &DepositHandle) -> Result<(), ClientError> {
        let mut watch = self
            .pending_relays
            .lock()
            .await
            .remove(&deposit.tx_hash)
            .ok_or_else(|| {
                ClientError::RelayWait(format!("no pending relay for {}", deposit.tx_hash))
            })?;

        // No timeout on this wait; a stuck relay blocks until the RPC
        // layer itself gives up.
        loop {
            let latest = self
                .derived
                .get_block_number()
                .await
                .map_err(|e| ClientError::RelayWait(e.to_string()))?;

            while watch.next_block <= latest {
                let block = watch.next_block;
                let balance = self.balance_at(block).await?;
                if watch.observe(balance) {
                    debug!(tx_hash = %deposit.tx_hash, block, "deposit relayed");
                    return Ok(());
                }
            }

            debug!(
                tx_hash = %deposit.tx_hash,
                scanned_through = latest,
                "deposit not yet relayed"
            );
            tokio::time::sleep(RELAY_POLL_INTERVAL).await;
        }
    }

    async fn latest_block(&self, network: Network) -> Result<BlockInfo, ClientError> {
        let block = self
            .provider(network)
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| rpc_error(network, &e))?
            .ok_or_else(|| ClientError::Rpc {
                network,
                message: "latest block not available".into(),
            })?;

        Ok(BlockInfo {
            number: block.header.number,
            base_fee_per_gas: block.header.base_fee_per_gas.map(u128::from),
        })
    }

    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        gas_price: u128,
    ) -> Result<TxHash, ClientError> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_value(value)
            .with_gas_price(gas_price);
        let pending =
            self.derived
                .send_transaction(tx)
                .await
                .map_err(|e| ClientError::Submission {
                    network: Network::Derived,
                    message: e.to_string(),
                })?;
        Ok(*pending.tx_hash())
    }
}

fn rpc_error(network: Network, error: &dyn std::fmt::Display) -> ClientError {
    ClientError::Rpc {
        network,
        message: error.to_string(),
    }
}
