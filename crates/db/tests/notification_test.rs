//! Integration tests for the in-app notifier and inbox.

mod common;

use leavedesk_core::leave::LeaveType;
use leavedesk_core::notify::{LeaveSummary, Notifier};
use leavedesk_core::workflow::Role;
use leavedesk_db::entities::sea_orm_active_enums::NoticeCategory;
use leavedesk_db::{InAppNotifier, NotificationRepository};
use leavedesk_shared::types::{LeaveRequestId, NotificationId};
use leavedesk_shared::{EmailConfig, EmailService};

use common::{date, hire, id_of, setup_db};

fn summary() -> LeaveSummary {
    LeaveSummary {
        request_id: LeaveRequestId::new(),
        employee_name: "Jane Doe".to_string(),
        start_date: date(2025, 7, 14),
        end_date: date(2025, 7, 18),
        working_days: 4,
        leave_type: LeaveType::PaidLeave,
    }
}

#[tokio::test]
async fn test_notices_are_stored_unread() {
    let db = setup_db().await;
    let owner = hire(&db, "jane", Role::Employee, None).await;
    let notifier = InAppNotifier::new(db.clone());
    let inbox = NotificationRepository::new(db);

    let mut notice = summary().approved(id_of(&owner));
    notice.leave_request_id = None;
    notifier.notify(&notice).await.unwrap();

    let stored = inbox.list_for(id_of(&owner)).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category, NoticeCategory::Approved);
    assert_eq!(stored[0].title, notice.title);
    assert!(!stored[0].is_read);
    assert_eq!(inbox.unread_count(id_of(&owner)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_read() {
    let db = setup_db().await;
    let owner = hire(&db, "jane", Role::Employee, None).await;
    let other = hire(&db, "john", Role::Employee, None).await;
    let notifier = InAppNotifier::new(db.clone());
    let inbox = NotificationRepository::new(db);

    for reason in ["one", "two", "three"] {
        let mut notice = summary().rejected(id_of(&owner), reason);
        notice.leave_request_id = None;
        notifier.notify(&notice).await.unwrap();
    }

    let first = NotificationId::from_uuid(inbox.list_for(id_of(&owner)).await.unwrap()[0].id);
    assert!(!inbox.mark_read(id_of(&other), first).await.unwrap());
    assert!(inbox.mark_read(id_of(&owner), first).await.unwrap());
    assert_eq!(inbox.unread_count(id_of(&owner)).await.unwrap(), 2);

    assert_eq!(inbox.mark_all_read(id_of(&owner)).await.unwrap(), 2);
    assert_eq!(inbox.unread_count(id_of(&owner)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_suppressed_email_forwarding_still_stores() {
    let db = setup_db().await;
    let owner = hire(&db, "jane", Role::Employee, None).await;
    let email = EmailService::new(EmailConfig {
        enabled: true,
        suppress_send: true,
        ..EmailConfig::default()
    });
    let notifier = InAppNotifier::new(db.clone()).with_email(email);

    let mut notice = summary().recorded(id_of(&owner));
    notice.leave_request_id = None;
    notifier.notify(&notice).await.unwrap();

    let inbox = NotificationRepository::new(db);
    assert_eq!(inbox.unread_count(id_of(&owner)).await.unwrap(), 1);
}
