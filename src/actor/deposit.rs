//! The bridge deposit operation.

use std::time::Instant;

use tracing::{info, warn};

use crate::domain::{min_base_reserve, should_deposit, DepositIntent, OperationOutcome};
use crate::error::ClientError;
use crate::ports::{Network, TransferClient};

/// Run one deposit attempt end to end.
///
/// Guard check, submission, base-network confirmation, then the relay wait.
/// Every client error is folded into [`OperationOutcome::Failed`] here;
/// nothing propagates to the caller.
pub async fn run_deposit<C>(client: &C, intent: DepositIntent) -> OperationOutcome
where
    C: TransferClient + ?Sized,
{
    info!(amount_wei = %intent.amount, "deposit tick starting");
    match deposit_inner(client, intent).await {
        Ok(outcome) => outcome,
        Err(error) => OperationOutcome::Failed { error },
    }
}

async fn deposit_inner<C>(
    client: &C,
    intent: DepositIntent,
) -> Result<OperationOutcome, ClientError>
where
    C: TransferClient + ?Sized,
{
    let balance = client.get_balance(Network::Base).await?;
    if !should_deposit(balance, min_base_reserve()) {
        warn!(balance_wei = %balance, "base wallet below reserve");
        return Ok(OperationOutcome::Skipped {
            reason: "low balance",
        });
    }

    let start = Instant::now();
    let handle = client.deposit_eth(intent.amount).await?;
    info!(tx_hash = %handle.tx_hash, "deposit submitted on base network");

    client
        .wait_for_confirmation(Network::Base, handle.tx_hash)
        .await?;
    info!(
        tx_hash = %handle.tx_hash,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "deposit confirmed, waiting for relay"
    );

    // No timeout: a stuck relay pins this tick's deposit report
    // indefinitely. Known limitation, see DESIGN.md.
    client.wait_for_relayed(&handle).await?;

    let elapsed = start.elapsed();
    info!(
        tx_hash = %handle.tx_hash,
        elapsed_secs = elapsed.as_secs_f64(),
        "deposit relayed"
    );
    Ok(OperationOutcome::Succeeded { elapsed })
}
