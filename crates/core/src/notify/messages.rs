//! Notice builders for lifecycle events.
//!
//! Dates are rendered as `dd/mm/yyyy`.

use chrono::NaiveDate;

use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use crate::leave::types::LeaveType;
use crate::notify::types::{Notice, NoticeCategory};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// The facts about a request that notices mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSummary {
    /// Request identifier.
    pub request_id: LeaveRequestId,
    /// Owner's display name ("First Last").
    pub employee_name: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Frozen working-day count.
    pub working_days: i32,
    /// Leave type.
    pub leave_type: LeaveType,
}

impl LeaveSummary {
    fn period(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }

    fn notice(&self, recipient: EmployeeId, category: NoticeCategory, title: &str, body: String) -> Notice {
        Notice {
            recipient,
            category,
            title: title.to_string(),
            body,
            leave_request_id: Some(self.request_id),
        }
    }

    /// New request for the owner's manager.
    #[must_use]
    pub fn submitted_to_manager(&self, manager: EmployeeId) -> Notice {
        let body = format!(
            "{} submitted a {} request: {} ({} day(s)). Approve it to forward it to HR.",
            self.employee_name,
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        self.notice(manager, NoticeCategory::RequestForManager, "Leave request to review", body)
    }

    /// New request for every HR user, when the owner has no manager.
    #[must_use]
    pub fn submitted_to_hr(&self, hr_users: &[EmployeeId]) -> Vec<Notice> {
        let body = format!(
            "{} submitted a {} request: {} ({} day(s)).",
            self.employee_name,
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        hr_users
            .iter()
            .map(|hr| self.notice(*hr, NoticeCategory::RequestForHr, "New leave request", body.clone()))
            .collect()
    }

    /// Manager-approved request for every HR user.
    #[must_use]
    pub fn forwarded_to_hr(&self, hr_users: &[EmployeeId]) -> Vec<Notice> {
        let body = format!(
            "{}: {} request ({}, {} day(s)) approved by the manager. Awaiting HR approval.",
            self.employee_name,
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        hr_users
            .iter()
            .map(|hr| {
                self.notice(
                    *hr,
                    NoticeCategory::ForwardedToHr,
                    "Leave request forwarded by manager",
                    body.clone(),
                )
            })
            .collect()
    }

    /// Final approval, for the owner.
    #[must_use]
    pub fn approved(&self, owner: EmployeeId) -> Notice {
        let body = format!(
            "Your {} request for {} ({} day(s)) has been approved.",
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        self.notice(owner, NoticeCategory::Approved, "Leave request approved", body)
    }

    /// Rejection at either level, for the owner.
    #[must_use]
    pub fn rejected(&self, owner: EmployeeId, reason: &str) -> Notice {
        let mut body = format!(
            "Your {} request for {} ({} day(s)) has been rejected.",
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        if !reason.is_empty() {
            body.push_str(" Reason: ");
            body.push_str(reason);
        }
        self.notice(owner, NoticeCategory::Rejected, "Leave request rejected", body)
    }

    /// Leave recorded by HR, for the owner.
    #[must_use]
    pub fn recorded(&self, owner: EmployeeId) -> Notice {
        let body = format!(
            "HR recorded {} for you: {} ({} day(s)).",
            self.leave_type.label(),
            self.period(),
            self.working_days
        );
        self.notice(owner, NoticeCategory::Recorded, "Leave recorded by HR", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> LeaveSummary {
        LeaveSummary {
            request_id: LeaveRequestId::new(),
            employee_name: "Jeanne Martin".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 18).unwrap(),
            working_days: 4,
            leave_type: LeaveType::PaidLeave,
        }
    }

    #[test]
    fn test_manager_notice_mentions_employee_and_dates() {
        let manager = EmployeeId::new();
        let notice = summary().submitted_to_manager(manager);
        assert_eq!(notice.recipient, manager);
        assert_eq!(notice.category, NoticeCategory::RequestForManager);
        assert!(notice.body.contains("Jeanne Martin"));
        assert!(notice.body.contains("14/07/2025 - 18/07/2025"));
        assert!(notice.body.contains("4 day(s)"));
    }

    #[test]
    fn test_forwarded_fans_out_to_every_hr_user() {
        let hr = [EmployeeId::new(), EmployeeId::new()];
        let notices = summary().forwarded_to_hr(&hr);
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].recipient, hr[0]);
        assert_eq!(notices[1].recipient, hr[1]);
        assert!(notices.iter().all(|n| n.category == NoticeCategory::ForwardedToHr));
    }

    #[test]
    fn test_rejected_includes_reason() {
        let s = summary();
        let notice = s.rejected(EmployeeId::new(), "Team short-staffed");
        assert!(notice.body.ends_with("Reason: Team short-staffed"));
        assert_eq!(notice.leave_request_id, Some(s.request_id));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(NoticeCategory::Approved.as_str(), "approved");
        assert_eq!(NoticeCategory::ForwardedToHr.to_string(), "forwarded_to_hr");
    }
}
