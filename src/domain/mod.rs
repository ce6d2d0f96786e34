//! Chain-agnostic types and pure decision logic.

pub mod gas;
pub mod guard;
pub mod intent;
pub mod outcome;

pub use gas::{compute_fee_bid, FEE_TIP};
pub use guard::{min_base_reserve, should_deposit};
pub use intent::{DepositIntent, TransferIntent};
pub use outcome::OperationOutcome;
