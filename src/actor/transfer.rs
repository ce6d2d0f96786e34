//! The plain transfer operation on the derived network.

use std::time::Instant;

use alloy_primitives::{Address, U256};
use tracing::info;

use crate::domain::{compute_fee_bid, OperationOutcome, TransferIntent, FEE_TIP};
use crate::error::ClientError;
use crate::ports::{Network, TransferClient};

/// Run one plain transfer end to end.
///
/// Prices the transfer off the current latest block, submits it, and waits
/// for confirmation. Same isolation contract as the deposit operation:
/// every failure becomes [`OperationOutcome::Failed`] here.
pub async fn run_transfer<C>(client: &C, amount: U256, recipient: Address) -> OperationOutcome
where
    C: TransferClient + ?Sized,
{
    info!(amount_wei = %amount, recipient = %recipient, "transfer tick starting");
    match transfer_inner(client, amount, recipient).await {
        Ok(outcome) => outcome,
        Err(error) => OperationOutcome::Failed { error },
    }
}

async fn transfer_inner<C>(
    client: &C,
    amount: U256,
    recipient: Address,
) -> Result<OperationOutcome, ClientError>
where
    C: TransferClient + ?Sized,
{
    let start = Instant::now();

    let block = client.latest_block(Network::Derived).await?;
    let base_fee = block
        .base_fee_per_gas
        .ok_or(ClientError::MissingBaseFee {
            network: Network::Derived,
        })?;

    let intent = TransferIntent {
        amount,
        recipient,
        fee_bid: compute_fee_bid(base_fee, FEE_TIP),
    };

    let tx_hash = client
        .send_transaction(intent.recipient, intent.amount, intent.fee_bid)
        .await?;
    info!(
        tx_hash = %tx_hash,
        gas_price = intent.fee_bid,
        block = block.number,
        "transfer submitted on derived network"
    );

    client
        .wait_for_confirmation(Network::Derived, tx_hash)
        .await?;

    let elapsed = start.elapsed();
    info!(
        tx_hash = %tx_hash,
        elapsed_secs = elapsed.as_secs_f64(),
        "transfer confirmed"
    );
    Ok(OperationOutcome::Succeeded { elapsed })
}
