//! Manager hierarchy checks.
//!
//! The manager relation is a plain nullable self-reference. Assignments are
//! checked at write time so that following `manager` links from any
//! employee always terminates.

use std::collections::{HashMap, HashSet};

use leavedesk_shared::types::EmployeeId;

use crate::leave::error::LeaveError;

/// Snapshot of every employee's manager link.
#[derive(Debug, Clone, Default)]
pub struct ManagerChain {
    links: HashMap<EmployeeId, EmployeeId>,
}

impl ManagerChain {
    /// Builds the chain from `(employee, manager)` pairs.
    pub fn new(links: impl IntoIterator<Item = (EmployeeId, Option<EmployeeId>)>) -> Self {
        Self {
            links: links
                .into_iter()
                .filter_map(|(employee, manager)| manager.map(|m| (employee, m)))
                .collect(),
        }
    }

    /// Direct manager of `employee`.
    #[must_use]
    pub fn manager_of(&self, employee: EmployeeId) -> Option<EmployeeId> {
        self.links.get(&employee).copied()
    }

    /// Managers above `employee`, nearest first. Stops on an existing loop.
    #[must_use]
    pub fn ancestors(&self, employee: EmployeeId) -> Vec<EmployeeId> {
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut current = employee;
        while let Some(manager) = self.manager_of(current) {
            if !seen.insert(manager) {
                break;
            }
            chain.push(manager);
            current = manager;
        }
        chain
    }
}

/// Fails with `ManagerCycle` if `employee` reporting to `manager` would
/// close a loop, including self-management.
pub fn check_manager_assignment(
    chain: &ManagerChain,
    employee: EmployeeId,
    manager: EmployeeId,
) -> Result<(), LeaveError> {
    if employee == manager || chain.ancestors(manager).contains(&employee) {
        return Err(LeaveError::ManagerCycle { employee, manager });
    }
    Ok(())
}
