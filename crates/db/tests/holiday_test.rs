//! Integration tests for holiday loading and working-day counts.

mod common;

use leavedesk_core::{LeaveError, LeaveErrorKind};
use leavedesk_db::{ExerciseRepository, HolidayRepository, PeriodInput};
use leavedesk_shared::types::HolidayId;

use common::{date, exercise_period_id, setup_db};

#[tokio::test]
async fn test_loading_twice_keeps_the_same_set() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);

    let first = repo.load_holidays_for_years(&[2025]).await.unwrap();
    assert_eq!(first.inserted, 11);
    assert_eq!(first.skipped, 0);

    let second = repo.load_holidays_for_years(&[2025]).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 11);

    let stored = repo.holidays_for_years(&[2025]).await.unwrap();
    assert_eq!(stored.len(), 11);
    assert!(stored.iter().all(|h| h.auto_generated));
    assert!(stored.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_coinciding_feasts_are_stored_once() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);

    // Ascension Day 2008 fell on May 1
    let summary = repo.load_holidays_for_years(&[2008]).await.unwrap();
    assert_eq!(summary.inserted, 10);
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_manual_holiday_is_kept_by_later_loads() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);

    let manual = repo
        .add_manual_holiday(date(2025, 7, 14), "  ")
        .await
        .unwrap();
    assert_eq!(manual.label, "Custom holiday");
    assert!(!manual.auto_generated);

    let summary = repo.load_holidays_for_years(&[2025]).await.unwrap();
    assert_eq!(summary.inserted, 10);

    let err = repo
        .add_manual_holiday(date(2025, 12, 25), "Christmas again")
        .await
        .unwrap_err();
    assert!(matches!(err, LeaveError::HolidayExists(_)));
    assert_eq!(err.kind(), LeaveErrorKind::Conflict);
}

#[tokio::test]
async fn test_remove_holiday() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);

    let holiday = repo
        .add_manual_holiday(date(2025, 6, 2), "Company day")
        .await
        .unwrap();
    let id = HolidayId::from_uuid(holiday.id);

    repo.remove_holiday(id).await.unwrap();
    let err = repo.remove_holiday(id).await.unwrap_err();
    assert!(matches!(err, LeaveError::HolidayNotFound(_)));
}

#[tokio::test]
async fn test_working_days_across_year_boundary() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);
    repo.load_holidays_for_years(&[2025, 2026]).await.unwrap();

    // Mon 29 Dec 2025 to Fri 2 Jan 2026, New Year's Day excluded
    let days = repo
        .count_working_days(date(2025, 12, 29), date(2026, 1, 2))
        .await
        .unwrap();
    assert_eq!(days, 4);

    assert_eq!(
        repo.count_working_days(date(2025, 7, 14), date(2025, 7, 18))
            .await
            .unwrap(),
        4
    );
    assert_eq!(
        repo.count_working_days(date(2025, 7, 18), date(2025, 7, 14))
            .await
            .unwrap(),
        0
    );

    let dates = repo
        .holiday_dates_between(date(2025, 12, 1), date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(
        dates.into_iter().collect::<Vec<_>>(),
        vec![date(2025, 12, 25), date(2026, 1, 1)]
    );
}

#[tokio::test]
async fn test_load_for_active_period() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db.clone());

    let err = repo.load_holidays_for_active_period().await.unwrap_err();
    assert!(matches!(err, LeaveError::NoActivePeriod));

    let exercises = ExerciseRepository::new(db);
    let period = exercises
        .create_period(PeriodInput {
            start_date: date(2025, 6, 1),
            end_date: date(2026, 5, 31),
            default_allocated_days: None,
        })
        .await
        .unwrap();
    exercises
        .activate_period(exercise_period_id(&period))
        .await
        .unwrap();

    let summary = repo.load_holidays_for_active_period().await.unwrap();
    assert_eq!(summary.inserted, 22);
}

#[tokio::test]
async fn test_unsupported_year_is_rejected() {
    let db = setup_db().await;
    let repo = HolidayRepository::new(db);

    let err = repo.load_holidays_for_years(&[1200]).await.unwrap_err();
    assert!(matches!(err, LeaveError::Calendar(_)));
    assert!(repo.holidays_for_years(&[1200]).await.unwrap().is_empty());
}
