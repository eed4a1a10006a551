//! Workflow repository for leave request state transitions.
//!
//! Each operation runs in one transaction: the request row is locked first,
//! then the owner's employee row, then the acting employee is loaded. Checks
//! against stored data (working days, overlap, balance) happen under those
//! locks. Notices are sent after commit and a failed delivery is only
//! logged.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set,
    TransactionTrait,
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::leave::{
    DateRange, LeaveDraft, LeaveStatus, LeaveType, require_working_days, validate_range,
};
use leavedesk_core::notify::{Notice, Notifier};
use leavedesk_core::workflow::{
    Actor, ApprovalStamps, LeaveAction, LeaveTransition, LifecycleService, RequestParty,
};
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use crate::entities::{employees, leave_requests};

use super::conversions::{db_err, stamps_of, summary_of, to_actor, to_party};
use super::employee::{find_employee_in, hr_recipients_in, lock_employee_in};
use super::holiday::count_working_days_in;
use super::leave::{find_overlap_in, lock_request_in};
use super::ledger::balance_check_in;

/// HR correction of an existing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveEdit {
    /// New first day.
    pub start_date: NaiveDate,
    /// New last day.
    pub end_date: NaiveDate,
    /// New leave type.
    pub leave_type: LeaveType,
    /// New comment.
    pub comment: Option<String>,
}

/// A locked request with its owner and the acting employee.
struct LockedRequest {
    request: leave_requests::Model,
    owner: employees::Model,
    actor: Actor,
}

impl LockedRequest {
    fn status(&self) -> LeaveStatus {
        self.request.status.into()
    }

    fn party(&self) -> RequestParty {
        to_party(&self.owner)
    }
}

/// Workflow repository for leave request state transitions.
#[derive(Clone)]
pub struct LeaveWorkflowRepository {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl LeaveWorkflowRepository {
    /// Creates a new workflow repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Submits an employee's own leave request.
    ///
    /// # Errors
    ///
    /// In evaluation order:
    /// - `ActorNotPermitted` unless the actor is the active, non-HR owner
    /// - `EndBeforeStart` for reversed dates
    /// - `LeaveTypeNotSelectable` for Sick and Seniority
    /// - `NoWorkingDays` if the range holds only weekends and holidays
    /// - `Overlap` if another request of the owner intersects the range
    /// - `InsufficientBalance` for a consuming type that does not fit
    pub async fn submit(
        &self,
        actor_id: EmployeeId,
        draft: LeaveDraft,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let owner = lock_employee_in(&txn, draft.employee_id).await?;
        let actor = load_actor_in(&txn, actor_id, &owner).await?;
        let (range, transition) = LifecycleService::submit(&actor, &to_party(&owner), &draft)?;
        let request = admit_in(&txn, &draft, range, &transition).await?;

        txn.commit().await.map_err(db_err)?;

        log_transition(&request, &transition, actor_id);
        self.dispatch(&transition, &request, &owner).await;
        Ok(request)
    }

    /// Records leave on an employee's behalf, directly approved.
    ///
    /// # Errors
    ///
    /// - `ActorNotPermitted` unless the actor is an active HR user
    /// - `EndBeforeStart`, `NoWorkingDays`, `Overlap`, `InsufficientBalance`
    ///   as for [`Self::submit`]
    pub async fn record_by_hr(
        &self,
        actor_id: EmployeeId,
        draft: LeaveDraft,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let owner = lock_employee_in(&txn, draft.employee_id).await?;
        let actor = load_actor_in(&txn, actor_id, &owner).await?;
        let (range, transition) = LifecycleService::record_by_hr(&actor, &draft)?;
        let request = admit_in(&txn, &draft, range, &transition).await?;

        txn.commit().await.map_err(db_err)?;

        log_transition(&request, &transition, actor_id);
        self.dispatch(&transition, &request, &owner).await;
        Ok(request)
    }

    /// Manager forwards a request to HR.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` / `EmployeeNotFound`
    /// - `InvalidTransition` unless PendingManager
    /// - `ActorNotPermitted` unless the actor is the owner's manager
    pub async fn manager_approve(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;

        let transition =
            LifecycleService::manager_approve(locked.status(), &locked.actor, &locked.party())?;

        self.finish(txn, locked, transition, actor_id).await
    }

    /// Manager rejects a request.
    ///
    /// # Errors
    ///
    /// - `ReasonRequired` for a blank reason
    /// - `InvalidTransition` unless PendingManager
    /// - `ActorNotPermitted` unless the actor is the owner's manager
    pub async fn manager_reject(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
        reason: &str,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;

        let transition = LifecycleService::manager_reject(
            locked.status(),
            &locked.actor,
            &locked.party(),
            reason,
        )?;

        self.finish(txn, locked, transition, actor_id).await
    }

    /// HR grants a request.
    ///
    /// The balance is re-read under the owner lock, so two approvals for the
    /// same employee cannot both spend the last days.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless PendingHr
    /// - `ActorNotPermitted` unless the actor is an active HR user
    /// - `InsufficientBalance` for a consuming type that does not fit
    pub async fn hr_approve(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;

        let balance = balance_check_in(
            &txn,
            EmployeeId::from_uuid(locked.owner.id),
            locked.request.working_days_count,
            Some(request_id),
        )
        .await?;
        let transition = LifecycleService::hr_approve(
            locked.status(),
            &locked.actor,
            locked.request.leave_type.into(),
            balance,
        )?;

        self.finish(txn, locked, transition, actor_id).await
    }

    /// HR rejects a request.
    ///
    /// # Errors
    ///
    /// - `ReasonRequired` for a blank reason
    /// - `InvalidTransition` unless PendingHr
    /// - `ActorNotPermitted` unless the actor is an active HR user
    pub async fn hr_reject(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
        reason: &str,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;

        let transition = LifecycleService::hr_reject(locked.status(), &locked.actor, reason)?;

        self.finish(txn, locked, transition, actor_id).await
    }

    /// Owner withdraws a pending request.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless pending
    /// - `ActorNotPermitted` unless the actor is the owner
    pub async fn cancel(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;

        let transition = LifecycleService::cancel(locked.status(), &locked.actor, &locked.party())?;

        self.finish(txn, locked, transition, actor_id).await
    }

    /// HR corrects dates, type or comment. The status is kept and the
    /// working-day count is recomputed.
    ///
    /// # Errors
    ///
    /// - `ActorNotPermitted` unless the actor is an active HR user
    /// - `EndBeforeStart`, `NoWorkingDays`
    /// - `Overlap` with another request of the owner
    /// - `InsufficientBalance` for a consuming type that does not fit
    pub async fn edit_by_hr(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
        edit: LeaveEdit,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;
        LifecycleService::require_hr(&locked.actor, LeaveAction::Edit)?;

        let owner_id = EmployeeId::from_uuid(locked.owner.id);
        let range = validate_range(edit.start_date, edit.end_date)?;
        let working_days = check_availability_in(
            &txn,
            owner_id,
            &range,
            edit.leave_type,
            Some(request_id),
        )
        .await?;

        let mut active: leave_requests::ActiveModel = locked.request.into();
        active.start_date = Set(range.start());
        active.end_date = Set(range.end());
        active.working_days_count = Set(working_days);
        active.leave_type = Set(edit.leave_type.into());
        active.comment = Set(edit.comment);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            request_id = %request_id,
            actor_id = %actor_id,
            start = %updated.start_date,
            end = %updated.end_date,
            working_days,
            "Leave request edited by HR"
        );
        Ok(updated)
    }

    /// HR deletes a request whatever its status.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` if absent
    /// - `ActorNotPermitted` unless the actor is an active HR user
    pub async fn delete_by_hr(
        &self,
        actor_id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> Result<(), LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let locked = lock_in(&txn, actor_id, request_id).await?;
        LifecycleService::require_hr(&locked.actor, LeaveAction::Delete)?;

        leave_requests::Entity::delete_by_id(locked.request.id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            request_id = %request_id,
            actor_id = %actor_id,
            status = %LeaveStatus::from(locked.request.status),
            "Leave request deleted by HR"
        );
        Ok(())
    }

    /// Writes the transition, commits, then notifies.
    async fn finish(
        &self,
        txn: DatabaseTransaction,
        locked: LockedRequest,
        transition: LeaveTransition,
        actor_id: EmployeeId,
    ) -> Result<leave_requests::Model, LeaveError> {
        let updated = apply_transition_in(&txn, locked.request, &transition).await?;
        txn.commit().await.map_err(db_err)?;

        log_transition(&updated, &transition, actor_id);
        self.dispatch(&transition, &updated, &locked.owner).await;
        Ok(updated)
    }

    /// Sends the notices a transition calls for. Failures are logged only.
    async fn dispatch(
        &self,
        transition: &LeaveTransition,
        request: &leave_requests::Model,
        owner: &employees::Model,
    ) {
        for notice in self.notices_for(transition, request, owner).await {
            if let Err(e) = self.notifier.notify(&notice).await {
                tracing::warn!(
                    error = %e,
                    recipient = %notice.recipient,
                    category = %notice.category,
                    request_id = %request.id,
                    "Failed to deliver leave notice"
                );
            }
        }
    }

    async fn notices_for(
        &self,
        transition: &LeaveTransition,
        request: &leave_requests::Model,
        owner: &employees::Model,
    ) -> Vec<Notice> {
        let summary = summary_of(request, owner);
        let owner_id = EmployeeId::from_uuid(owner.id);

        match transition {
            LeaveTransition::Submitted { .. } => match owner.manager_id {
                Some(manager) => vec![summary.submitted_to_manager(EmployeeId::from_uuid(manager))],
                None => summary.submitted_to_hr(&self.hr_ids().await),
            },
            LeaveTransition::Recorded { .. } => vec![summary.recorded(owner_id)],
            LeaveTransition::ManagerApproved { .. } => summary.forwarded_to_hr(&self.hr_ids().await),
            LeaveTransition::ManagerRejected {
                rejection_reason, ..
            }
            | LeaveTransition::HrRejected {
                rejection_reason, ..
            } => vec![summary.rejected(owner_id, rejection_reason)],
            LeaveTransition::HrApproved { .. } => vec![summary.approved(owner_id)],
            LeaveTransition::Cancelled { .. } => Vec::new(),
        }
    }

    async fn hr_ids(&self) -> Vec<EmployeeId> {
        match hr_recipients_in(&self.db).await {
            Ok(users) => users.iter().map(|u| EmployeeId::from_uuid(u.id)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load HR recipients");
                Vec::new()
            }
        }
    }
}

fn log_transition(
    request: &leave_requests::Model,
    transition: &LeaveTransition,
    actor_id: EmployeeId,
) {
    tracing::info!(
        request_id = %request.id,
        employee_id = %request.employee_id,
        actor_id = %actor_id,
        action = %transition.action(),
        status = %transition.new_status(),
        working_days = request.working_days_count,
        "Leave request transition"
    );
}

/// Locks the request, then its owner, then loads the actor.
async fn lock_in<C: ConnectionTrait>(
    conn: &C,
    actor_id: EmployeeId,
    request_id: LeaveRequestId,
) -> Result<LockedRequest, LeaveError> {
    let request = lock_request_in(conn, request_id).await?;
    let owner = lock_employee_in(conn, EmployeeId::from_uuid(request.employee_id)).await?;
    let actor = load_actor_in(conn, actor_id, &owner).await?;
    Ok(LockedRequest {
        request,
        owner,
        actor,
    })
}

async fn load_actor_in<C: ConnectionTrait>(
    conn: &C,
    actor_id: EmployeeId,
    owner: &employees::Model,
) -> Result<Actor, LeaveError> {
    if actor_id.into_inner() == owner.id {
        return Ok(to_actor(owner));
    }
    Ok(to_actor(&find_employee_in(conn, actor_id).await?))
}

/// Working days, overlap and balance checks, in that order. Returns the
/// working-day count to freeze on the request.
async fn check_availability_in<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    range: &DateRange,
    leave_type: LeaveType,
    exclude: Option<LeaveRequestId>,
) -> Result<i32, LeaveError> {
    let working_days = count_working_days_in(conn, range.start(), range.end()).await?;
    require_working_days(range, working_days)?;

    if let Some(conflict) =
        find_overlap_in(conn, employee_id, range.start(), range.end(), exclude).await?
    {
        return Err(LeaveError::Overlap {
            conflicting_id: LeaveRequestId::from_uuid(conflict.id),
            start: conflict.start_date,
            end: conflict.end_date,
        });
    }

    if leave_type.consumes_balance() {
        balance_check_in(conn, employee_id, working_days, exclude)
            .await?
            .ensure()?;
    }

    Ok(working_days)
}

/// Inserts an admitted draft in the transition's status.
async fn admit_in<C: ConnectionTrait>(
    conn: &C,
    draft: &LeaveDraft,
    range: DateRange,
    transition: &LeaveTransition,
) -> Result<leave_requests::Model, LeaveError> {
    let working_days =
        check_availability_in(conn, draft.employee_id, &range, draft.leave_type, None).await?;

    let mut stamps = ApprovalStamps::default();
    transition.apply_to(&mut stamps);
    let ApprovalStamps {
        approved_by_manager_id,
        approved_by_manager_at,
        approved_by_id,
        approved_at,
        rejection_reason,
    } = stamps;

    let now = Utc::now();
    leave_requests::ActiveModel {
        id: Set(Uuid::now_v7()),
        employee_id: Set(draft.employee_id.into_inner()),
        start_date: Set(range.start()),
        end_date: Set(range.end()),
        working_days_count: Set(working_days),
        leave_type: Set(draft.leave_type.into()),
        comment: Set(draft.comment.clone()),
        status: Set(transition.new_status().into()),
        approved_by_manager_id: Set(approved_by_manager_id.map(EmployeeId::into_inner)),
        approved_by_manager_at: Set(approved_by_manager_at),
        approved_by_id: Set(approved_by_id.map(EmployeeId::into_inner)),
        approved_at: Set(approved_at),
        rejection_reason: Set(rejection_reason),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(db_err)
}

/// Writes a transition's status and stamps onto a locked request.
async fn apply_transition_in<C: ConnectionTrait>(
    conn: &C,
    request: leave_requests::Model,
    transition: &LeaveTransition,
) -> Result<leave_requests::Model, LeaveError> {
    LifecycleService::ensure_applicable(request.status.into(), transition)?;

    let mut stamps = stamps_of(&request);
    transition.apply_to(&mut stamps);

    let mut active: leave_requests::ActiveModel = request.into();
    active.status = Set(transition.new_status().into());
    active.approved_by_manager_id = Set(stamps.approved_by_manager_id.map(EmployeeId::into_inner));
    active.approved_by_manager_at = Set(stamps.approved_by_manager_at);
    active.approved_by_id = Set(stamps.approved_by_id.map(EmployeeId::into_inner));
    active.approved_at = Set(stamps.approved_at);
    active.rejection_reason = Set(stamps.rejection_reason);
    active.updated_at = Set(Utc::now());
    active.update(conn).await.map_err(db_err)
}
