//! Employee hierarchy rules.

pub mod hierarchy;

pub use hierarchy::{ManagerChain, check_manager_assignment};
