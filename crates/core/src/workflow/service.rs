//! Lifecycle service for leave request transitions.
//!
//! Guards are evaluated in a fixed order: mandatory reason, then current
//! status, then actor, then balance. The service is pure; persistence and
//! locking happen in the repository layer.

use chrono::Utc;

use crate::leave::error::LeaveError;
use crate::leave::types::{DateRange, LeaveDraft, LeaveStatus, LeaveType};
use crate::leave::validation::{require_reason, require_selectable};
use crate::ledger::balance::BalanceCheck;
use crate::workflow::role::{Actor, RequestParty, Role};
use crate::workflow::types::{LeaveAction, LeaveTransition};

/// Stateless service for leave request transitions.
pub struct LifecycleService;

impl LifecycleService {
    /// Status a new request starts in.
    #[must_use]
    pub const fn initial_status(party: &RequestParty) -> LeaveStatus {
        if party.manager.is_some() {
            LeaveStatus::PendingManager
        } else {
            LeaveStatus::PendingHr
        }
    }

    /// Admits an employee's own submission.
    ///
    /// Checks the actor, then the dates, then that the type is
    /// self-selectable. Working days, overlap and balance are checked by the
    /// caller against stored data, in that order.
    ///
    /// # Errors
    ///
    /// - `ActorNotPermitted` if the actor is not the active owner or is HR
    /// - `EndBeforeStart` for reversed dates
    /// - `LeaveTypeNotSelectable` for Sick and Seniority
    pub fn submit(
        actor: &Actor,
        party: &RequestParty,
        draft: &LeaveDraft,
    ) -> Result<(DateRange, LeaveTransition), LeaveError> {
        if !party.is_owner(actor) || actor.role == Role::Hr {
            return Err(LeaveError::ActorNotPermitted {
                actor: actor.id,
                action: LeaveAction::Submit,
            });
        }

        let range = draft.range()?;
        require_selectable(draft.leave_type)?;

        Ok((
            range,
            LeaveTransition::Submitted {
                new_status: Self::initial_status(party),
            },
        ))
    }

    /// Admits a request recorded by HR on an employee's behalf.
    ///
    /// # Errors
    ///
    /// - `ActorNotPermitted` if the actor is not an active HR user
    /// - `EndBeforeStart` for reversed dates
    pub fn record_by_hr(
        actor: &Actor,
        draft: &LeaveDraft,
    ) -> Result<(DateRange, LeaveTransition), LeaveError> {
        Self::require_hr(actor, LeaveAction::Record)?;
        let range = draft.range()?;

        Ok((
            range,
            LeaveTransition::Recorded {
                new_status: LeaveStatus::Approved,
                approved_by: actor.id,
                approved_at: Utc::now(),
            },
        ))
    }

    /// Manager forwards a request to HR.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is PendingManager
    /// - `ActorNotPermitted` unless the actor is the owner's manager
    pub fn manager_approve(
        current_status: LeaveStatus,
        actor: &Actor,
        party: &RequestParty,
    ) -> Result<LeaveTransition, LeaveError> {
        Self::require_status(current_status, LeaveStatus::PendingManager, LeaveAction::ManagerApprove)?;
        Self::require_manager(actor, party, LeaveAction::ManagerApprove)?;

        Ok(LeaveTransition::ManagerApproved {
            new_status: LeaveStatus::PendingHr,
            manager_id: actor.id,
            approved_at: Utc::now(),
        })
    }

    /// Manager rejects a request.
    ///
    /// # Errors
    ///
    /// - `ReasonRequired` if the reason is blank
    /// - `InvalidTransition` unless the request is PendingManager
    /// - `ActorNotPermitted` unless the actor is the owner's manager
    pub fn manager_reject(
        current_status: LeaveStatus,
        actor: &Actor,
        party: &RequestParty,
        reason: &str,
    ) -> Result<LeaveTransition, LeaveError> {
        let rejection_reason = require_reason(reason)?;
        Self::require_status(current_status, LeaveStatus::PendingManager, LeaveAction::ManagerReject)?;
        Self::require_manager(actor, party, LeaveAction::ManagerReject)?;

        Ok(LeaveTransition::ManagerRejected {
            new_status: LeaveStatus::Rejected,
            manager_id: actor.id,
            rejected_at: Utc::now(),
            rejection_reason,
        })
    }

    /// HR grants a request.
    ///
    /// `balance` is only consulted for balance-consuming types. Its
    /// `remaining` must already include this request's own days if it was
    /// counted as consumed.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is PendingHr
    /// - `ActorNotPermitted` unless the actor is an active HR user
    /// - `InsufficientBalance` when a consuming type does not fit
    pub fn hr_approve(
        current_status: LeaveStatus,
        actor: &Actor,
        leave_type: LeaveType,
        balance: BalanceCheck,
    ) -> Result<LeaveTransition, LeaveError> {
        Self::require_status(current_status, LeaveStatus::PendingHr, LeaveAction::HrApprove)?;
        Self::require_hr(actor, LeaveAction::HrApprove)?;
        if leave_type.consumes_balance() {
            balance.ensure()?;
        }

        Ok(LeaveTransition::HrApproved {
            new_status: LeaveStatus::Approved,
            approved_by: actor.id,
            approved_at: Utc::now(),
        })
    }

    /// HR rejects a request.
    ///
    /// # Errors
    ///
    /// - `ReasonRequired` if the reason is blank
    /// - `InvalidTransition` unless the request is PendingHr
    /// - `ActorNotPermitted` unless the actor is an active HR user
    pub fn hr_reject(
        current_status: LeaveStatus,
        actor: &Actor,
        reason: &str,
    ) -> Result<LeaveTransition, LeaveError> {
        let rejection_reason = require_reason(reason)?;
        Self::require_status(current_status, LeaveStatus::PendingHr, LeaveAction::HrReject)?;
        Self::require_hr(actor, LeaveAction::HrReject)?;

        Ok(LeaveTransition::HrRejected {
            new_status: LeaveStatus::Rejected,
            rejected_by: actor.id,
            rejected_at: Utc::now(),
            rejection_reason,
        })
    }

    /// Owner withdraws a pending request.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is pending
    /// - `ActorNotPermitted` unless the actor is the owner
    pub fn cancel(
        current_status: LeaveStatus,
        actor: &Actor,
        party: &RequestParty,
    ) -> Result<LeaveTransition, LeaveError> {
        if !current_status.is_pending() {
            return Err(LeaveError::InvalidTransition {
                from: current_status,
                action: LeaveAction::Cancel,
            });
        }
        if !party.is_owner(actor) {
            return Err(LeaveError::ActorNotPermitted {
                actor: actor.id,
                action: LeaveAction::Cancel,
            });
        }

        Ok(LeaveTransition::Cancelled {
            new_status: LeaveStatus::Cancelled,
        })
    }

    /// Fails unless `actor` is an active HR user.
    pub fn require_hr(actor: &Actor, action: LeaveAction) -> Result<(), LeaveError> {
        if actor.is_hr() {
            Ok(())
        } else {
            Err(LeaveError::ActorNotPermitted {
                actor: actor.id,
                action,
            })
        }
    }

    fn require_manager(
        actor: &Actor,
        party: &RequestParty,
        action: LeaveAction,
    ) -> Result<(), LeaveError> {
        if party.is_manager(actor) {
            Ok(())
        } else {
            Err(LeaveError::ActorNotPermitted {
                actor: actor.id,
                action,
            })
        }
    }

    fn require_status(
        current: LeaveStatus,
        expected: LeaveStatus,
        action: LeaveAction,
    ) -> Result<(), LeaveError> {
        if current == expected {
            Ok(())
        } else {
            Err(LeaveError::InvalidTransition {
                from: current,
                action,
            })
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - PendingManager → PendingHr | Rejected | Cancelled
    /// - PendingHr → Approved | Rejected | Cancelled
    #[must_use]
    pub fn is_valid_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
        matches!(
            (from, to),
            (
                LeaveStatus::PendingManager,
                LeaveStatus::PendingHr | LeaveStatus::Rejected | LeaveStatus::Cancelled
            ) | (
                LeaveStatus::PendingHr,
                LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled
            )
        )
    }

    /// Checks a computed transition against the stored status it is
    /// applied to.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if `from` cannot move to the transition's status
    pub fn ensure_applicable(
        from: LeaveStatus,
        transition: &LeaveTransition,
    ) -> Result<(), LeaveError> {
        if Self::is_valid_transition(from, transition.new_status()) {
            Ok(())
        } else {
            Err(LeaveError::InvalidTransition {
                from,
                action: transition.action(),
            })
        }
    }
}
