use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use slotbook_core::{
    availability::DayAvailability,
    models::availability::{CalendarResponse, SlotsResponse},
};

use crate::test_utils::{
    TestContext, booked, closed_every_day, days_from_today, hours_every_day, today,
};

fn render(response: &SlotsResponse) -> Vec<String> {
    response.slots.iter().map(ToString::to_string).collect()
}

#[test_log::test(tokio::test)]
async fn test_slots_exclude_booked_hour() {
    let mut ctx = TestContext::new();
    let date = days_from_today(1);
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx.expect_booked(vec![booked(date, "11:00", 60)]);
    let path = ctx.service_path("slots");

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("date", date.to_string())
        .await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert_eq!(body.date, date);
    assert_eq!(body.duration, 60);
    assert_eq!(
        render(&body),
        vec!["09:00", "10:00", "12:00", "13:00", "14:00", "15:00", "16:00"]
    );
}

#[test_log::test(tokio::test)]
async fn test_slots_on_closed_day_are_empty() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    ctx.expect_hours(closed_every_day(ctx.provider.id));
    // A closed date is never bookable, so appointments are not loaded.
    ctx.store.expect_booked_intervals().never();
    let path = ctx.service_path("slots");

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("date", days_from_today(2).to_string())
        .await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert!(body.slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_slots_for_past_and_far_dates_are_empty() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx.store.expect_booked_intervals().never();
    let path = ctx.service_path("slots");

    let server = ctx.server();
    for date in [today().pred_opt().unwrap(), days_from_today(61)] {
        let response = server
            .get(&path)
            .add_query_param("date", date.to_string())
            .await;

        response.assert_status_ok();
        let body: SlotsResponse = response.json();
        assert!(body.slots.is_empty(), "expected no slots on {date}");
    }
}

#[test_log::test(tokio::test)]
async fn test_slots_unknown_service_not_found() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    let path = format!(
        "/api/providers/harbor-physio/services/{}/slots",
        uuid::Uuid::new_v4()
    );

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("date", days_from_today(1).to_string())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_slots_inactive_service_not_found() {
    let mut ctx = TestContext::new();
    ctx.service.is_active = false;
    ctx.expect_service();
    let path = ctx.service_path("slots");

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("date", days_from_today(1).to_string())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_slots_invalid_duration_is_bad_request() {
    let mut ctx = TestContext::new();
    ctx.service.duration = 0;
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx.expect_booked(Vec::new());
    let path = ctx.service_path("slots");

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("date", days_from_today(1).to_string())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_calendar_defaults_to_two_weeks_from_today() {
    let mut ctx = TestContext::new();
    let tomorrow = days_from_today(1);
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    // Tomorrow is fully booked, the day after loses three of eight hours.
    ctx.expect_booked(vec![
        booked(tomorrow, "09:00", 480),
        booked(days_from_today(2), "09:00", 180),
    ]);
    let path = ctx.service_path("calendar");

    let server = ctx.server();
    let response = server.get(&path).await;

    response.assert_status_ok();
    let body: CalendarResponse = response.json();
    assert_eq!(body.today, today());
    assert_eq!(body.days.len(), 14);
    assert_eq!(body.days[0].date, today());
    assert_eq!(body.days[1].availability, DayAvailability::FullyBooked);
    assert_eq!(body.days[2].availability, DayAvailability::PartiallyBooked);
    assert_eq!(body.days[3].availability, DayAvailability::MostlyAvailable);
    assert!(body.days.iter().all(|day| day.bookable));
}

#[test_log::test(tokio::test)]
async fn test_calendar_is_capped_at_the_horizon() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx.expect_booked(Vec::new());
    let path = ctx.service_path("calendar");

    let server = ctx.server();
    let response = server.get(&path).add_query_param("days", 365).await;

    response.assert_status_ok();
    let body: CalendarResponse = response.json();
    assert_eq!(body.days.len(), 61);
    assert_eq!(body.days.last().map(|day| day.date), Some(days_from_today(60)));
}

#[test_log::test(tokio::test)]
async fn test_calendar_marks_past_days() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx.expect_booked(Vec::new());
    let path = ctx.service_path("calendar");
    let start = today().pred_opt().unwrap();

    let server = ctx.server();
    let response = server
        .get(&path)
        .add_query_param("start", start.to_string())
        .add_query_param("days", 2)
        .await;

    response.assert_status_ok();
    let body: CalendarResponse = response.json();
    assert_eq!(body.days.len(), 2);
    assert_eq!(body.days[0].availability, DayAvailability::Past);
    assert!(!body.days[0].bookable);
    assert_eq!(body.days[1].date, today());
    assert!(body.days[1].bookable);
}
