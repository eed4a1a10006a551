//! Property-based tests for LifecycleService.

use proptest::prelude::*;
use uuid::Uuid;

use leavedesk_shared::types::EmployeeId;

use crate::leave::error::LeaveError;
use crate::leave::types::{LeaveStatus, LeaveType};
use crate::ledger::balance::BalanceCheck;
use crate::workflow::role::{Actor, RequestParty, Role};
use crate::workflow::service::LifecycleService;

/// Strategy for generating random LeaveStatus values.
fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::PendingManager),
        Just(LeaveStatus::PendingHr),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
    ]
}

fn arb_terminal_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Hr), Just(Role::Manager), Just(Role::Employee)]
}

fn arb_type() -> impl Strategy<Value = LeaveType> {
    prop::sample::select(LeaveType::ALL.to_vec())
}

fn arb_employee_id() -> impl Strategy<Value = EmployeeId> {
    any::<u128>().prop_map(|n| EmployeeId::from_uuid(Uuid::from_u128(n)))
}

fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No action moves a terminal request.
    #[test]
    fn prop_terminal_states_are_final(
        status in arb_terminal_status(),
        role in arb_role(),
        owner in arb_employee_id(),
        leave_type in arb_type(),
    ) {
        let actor = Actor { id: owner, role, is_active: true };
        let party = RequestParty { owner, manager: Some(owner) };
        let plenty = BalanceCheck { remaining: 100, requested: 1 };

        prop_assert!(LifecycleService::manager_approve(status, &actor, &party).is_err());
        prop_assert!(LifecycleService::manager_reject(status, &actor, &party, "reason").is_err());
        prop_assert!(LifecycleService::hr_approve(status, &actor, leave_type, plenty).is_err());
        prop_assert!(LifecycleService::hr_reject(status, &actor, "reason").is_err());
        prop_assert!(LifecycleService::cancel(status, &actor, &party).is_err());
    }

    /// PendingManager never reaches Approved in one step.
    #[test]
    fn prop_pending_manager_never_directly_approved(
        role in arb_role(),
        id in arb_employee_id(),
        leave_type in arb_type(),
    ) {
        let actor = Actor { id, role, is_active: true };
        let plenty = BalanceCheck { remaining: 100, requested: 1 };
        prop_assert!(!LifecycleService::is_valid_transition(
            LeaveStatus::PendingManager,
            LeaveStatus::Approved
        ));
        let is_invalid_transition = matches!(
            LifecycleService::hr_approve(LeaveStatus::PendingManager, &actor, leave_type, plenty),
            Err(LeaveError::InvalidTransition { .. })
        );
        prop_assert!(is_invalid_transition);
    }

    /// Every successful transition lands on a status the table allows.
    #[test]
    fn prop_successful_transitions_are_valid(
        status in arb_status(),
        role in arb_role(),
        owner in arb_employee_id(),
        manager in arb_employee_id(),
        leave_type in arb_type(),
        remaining in -5i32..30,
        requested in 1i32..10,
    ) {
        let party = RequestParty { owner, manager: Some(manager) };
        let balance = BalanceCheck { remaining, requested };
        let as_manager = Actor { id: manager, role, is_active: true };
        let as_owner = Actor { id: owner, role, is_active: true };

        let outcomes = [
            LifecycleService::manager_approve(status, &as_manager, &party),
            LifecycleService::manager_reject(status, &as_manager, &party, "no"),
            LifecycleService::hr_approve(status, &as_manager, leave_type, balance),
            LifecycleService::hr_reject(status, &as_manager, "no"),
            LifecycleService::cancel(status, &as_owner, &party),
        ];
        for transition in outcomes.into_iter().flatten() {
            prop_assert!(LifecycleService::is_valid_transition(status, transition.new_status()));
        }
    }

    /// Blank reasons fail before anything else is looked at.
    #[test]
    fn prop_blank_reason_always_rejected(
        status in arb_status(),
        role in arb_role(),
        id in arb_employee_id(),
        spaces in " {0,5}",
    ) {
        let actor = Actor { id, role, is_active: true };
        let party = RequestParty { owner: id, manager: Some(id) };
        let is_reason_required = matches!(
            LifecycleService::hr_reject(status, &actor, &spaces),
            Err(LeaveError::ReasonRequired)
        );
        prop_assert!(is_reason_required);
        let is_reason_required = matches!(
            LifecycleService::manager_reject(status, &actor, &party, &spaces),
            Err(LeaveError::ReasonRequired)
        );
        prop_assert!(is_reason_required);
    }

    /// Rejection reasons are stored trimmed.
    #[test]
    fn prop_reason_is_trimmed(id in arb_employee_id(), reason in arb_reason()) {
        prop_assume!(!reason.trim().is_empty());
        let hr = Actor { id, role: Role::Hr, is_active: true };
        let transition = LifecycleService::hr_reject(LeaveStatus::PendingHr, &hr, &format!("  {reason} ")).unwrap();
        match transition {
            crate::workflow::types::LeaveTransition::HrRejected { rejection_reason, .. } => {
                prop_assert_eq!(rejection_reason, reason.trim().to_string());
            }
            _ => prop_assert!(false, "Expected HrRejected transition"),
        }
    }
}
