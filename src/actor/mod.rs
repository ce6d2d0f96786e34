//! The actor core: two per-tick operations and the loop that schedules them.

pub mod deposit;
pub mod scheduler;
pub mod transfer;

pub use deposit::run_deposit;
pub use scheduler::{Actor, ActorConfig};
pub use transfer::run_transfer;
