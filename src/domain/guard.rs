//! Pre-flight balance guard for deposits.

use alloy_primitives::U256;

/// Minimum operating reserve on the base network: 10 ETH in wei.
pub const MIN_BASE_RESERVE_WEI: u128 = 10_000_000_000_000_000_000;

/// The reserve as a [`U256`] for balance comparisons.
#[must_use]
pub fn min_base_reserve() -> U256 {
    U256::from(MIN_BASE_RESERVE_WEI)
}

/// Decide whether a deposit attempt should proceed.
///
/// Skipping keeps the actor from draining its own funding wallet and then
/// failing every subsequent submission with an insufficient-funds error.
/// A skip is a normal outcome, not a failure.
#[must_use]
pub fn should_deposit(balance: U256, threshold: U256) -> bool {
    balance >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth(n: u64) -> U256 {
        U256::from(n) * U256::from(1_000_000_000_000_000_000u128)
    }

    #[test]
    fn below_threshold_skips() {
        assert!(!should_deposit(eth(5), min_base_reserve()));
        assert!(!should_deposit(U256::ZERO, min_base_reserve()));
        assert!(!should_deposit(
            min_base_reserve() - U256::from(1),
            min_base_reserve()
        ));
    }

    #[test]
    fn at_threshold_deposits() {
        assert!(should_deposit(min_base_reserve(), min_base_reserve()));
    }

    #[test]
    fn above_threshold_deposits() {
        assert!(should_deposit(eth(20), min_base_reserve()));
    }

    #[test]
    fn reserve_is_ten_ether() {
        assert_eq!(min_base_reserve(), eth(10));
    }
}
