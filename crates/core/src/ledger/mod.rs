//! Allocation ledger and exercise periods.
//!
//! - `period` - Annual exercise periods and their validation
//! - `allocation` - Per-employee entitlements and HR edits
//! - `balance` - Consumption and remaining-day arithmetic

pub mod allocation;
pub mod balance;
pub mod period;

#[cfg(test)]
mod balance_props;

pub use allocation::{Allocation, AllocationDays, AllocationUpdate};
pub use balance::{Balance, BalanceCheck, compute_balance, consumed_days, has_sufficient_balance};
pub use period::{ExercisePeriod, validate_period};
