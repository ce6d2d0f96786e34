//! End-to-end tests of the actor operations and scheduling loop against
//! a scripted transfer client.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use tokio::sync::watch;

use chaos_actor::actor::{run_deposit, run_transfer, Actor, ActorConfig};
use chaos_actor::domain::{DepositIntent, OperationOutcome};
use chaos_actor::error::ClientError;
use chaos_actor::testkit::{eth, StubClient};

fn recipient() -> Address {
    Address::repeat_byte(0x42)
}

fn small_amount() -> U256 {
    // 0.001 ETH
    U256::from(1_000_000_000_000_000u128)
}

#[tokio::test]
async fn low_balance_skips_deposit_without_submitting() {
    let client = StubClient::new().with_base_balance(eth(5));
    let counters = client.counters();

    let outcome = run_deposit(&client, DepositIntent { amount: small_amount() }).await;

    assert!(matches!(
        outcome,
        OperationOutcome::Skipped { reason: "low balance" }
    ));
    assert_eq!(counters.deposits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn balance_at_reserve_boundary_still_deposits() {
    let client = StubClient::new().with_base_balance(eth(10));
    let counters = client.counters();

    let outcome = run_deposit(&client, DepositIntent { amount: small_amount() }).await;

    assert!(outcome.is_success());
    assert_eq!(counters.deposits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn deposit_succeeds_after_relay_polls() {
    let client = StubClient::new()
        .with_base_balance(eth(20))
        .with_relay_polls(3);
    let counters = client.counters();

    let outcome = run_deposit(&client, DepositIntent { amount: small_amount() }).await;

    match outcome {
        OperationOutcome::Succeeded { elapsed } => assert!(elapsed > Duration::ZERO),
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(counters.deposits.load(Ordering::SeqCst), 1);
    assert_eq!(counters.relay_polls.load(Ordering::SeqCst), 3);
    assert_eq!(counters.confirmations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transfer_bids_base_fee_plus_tip() {
    let client = StubClient::new().with_base_fee(Some(1000));
    let counters = client.counters();

    let outcome = run_transfer(&client, small_amount(), recipient()).await;

    assert!(outcome.is_success());
    assert_eq!(*counters.last_gas_price.lock().unwrap(), Some(1010));
}

#[tokio::test]
async fn transfer_fails_when_base_fee_is_missing() {
    let client = StubClient::new().with_base_fee(None);
    let counters = client.counters();

    let outcome = run_transfer(&client, small_amount(), recipient()).await;

    assert!(matches!(
        outcome,
        OperationOutcome::Failed {
            error: ClientError::MissingBaseFee { .. }
        }
    ));
    assert_eq!(counters.sends.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_deposit_submission_is_reported_not_propagated() {
    let client = StubClient::new().with_failing_deposit();

    let outcome = run_deposit(&client, DepositIntent { amount: small_amount() }).await;

    assert!(matches!(
        outcome,
        OperationOutcome::Failed {
            error: ClientError::Submission { .. }
        }
    ));
}

#[tokio::test]
async fn hung_relay_does_not_block_the_transfer_operation() {
    let client = Arc::new(StubClient::new().with_hanging_relay());

    let deposit_client = Arc::clone(&client);
    let deposit = tokio::spawn(async move {
        run_deposit(
            deposit_client.as_ref(),
            DepositIntent { amount: small_amount() },
        )
        .await
    });

    let transfer = run_transfer(client.as_ref(), small_amount(), recipient()).await;
    assert!(transfer.is_success());

    // Give the deposit task room to finish if it (wrongly) could.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!deposit.is_finished());
    deposit.abort();
}

#[tokio::test(start_paused = true)]
async fn send_failures_do_not_stop_the_loop() {
    let client = Arc::new(StubClient::new().with_failing_send());
    let counters = client.counters();

    let actor = Arc::new(Actor::new(
        client,
        ActorConfig {
            amount: small_amount(),
            recipient: recipient(),
            loop_interval: Duration::from_millis(100),
        },
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = {
        let actor = Arc::clone(&actor);
        tokio::spawn(async move { actor.run_with_shutdown(shutdown_rx).await })
    };

    tokio::time::sleep(Duration::from_millis(350)).await;
    shutdown_tx.send(true).unwrap();
    runner.await.unwrap();

    // Ticks at 0ms, 100ms, 200ms, 300ms despite every send failing.
    assert!(counters.sends.load(Ordering::SeqCst) >= 3);
    assert!(counters.deposits.load(Ordering::SeqCst) >= 3);
}

#[tokio::test(start_paused = true)]
async fn overrunning_ticks_delay_instead_of_overlapping() {
    let interval = Duration::from_millis(100);
    let tick_duration = Duration::from_millis(250);

    let client = Arc::new(StubClient::new().with_deposit_delay(tick_duration));
    let counters = client.counters();

    let actor = Arc::new(Actor::new(
        client,
        ActorConfig {
            amount: small_amount(),
            recipient: recipient(),
            loop_interval: interval,
        },
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = {
        let actor = Arc::clone(&actor);
        tokio::spawn(async move { actor.run_with_shutdown(shutdown_rx).await })
    };

    tokio::time::sleep(Duration::from_millis(800)).await;
    shutdown_tx.send(true).unwrap();
    runner.await.unwrap();

    let starts = counters.deposit_starts.lock().unwrap().clone();
    assert!(starts.len() >= 2, "expected at least two ticks");
    for pair in starts.windows(2) {
        // The next tick must not start until the previous one settled.
        assert!(pair[1] - pair[0] >= tick_duration);
    }
}
