use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Days, NaiveDate, Utc};
use slotbook_api::{ApiState, build_router};
use slotbook_db::{
    mock::MockStore,
    models::{DbBookedInterval, DbBusinessHours, DbFormField, DbProvider, DbService},
};
use uuid::Uuid;

pub const CUSTOM_URL: &str = "harbor-physio";

pub struct TestContext {
    pub store: MockStore,
    pub provider: DbProvider,
    pub service: DbService,
}

impl TestContext {
    /// A provider open 09:00-17:00 every day with one active 60 minute service.
    pub fn new() -> Self {
        let provider = provider();
        let service = service(provider.id, 60);
        let mut ctx = Self {
            store: MockStore::new(),
            provider,
            service,
        };
        ctx.expect_provider();
        ctx
    }

    fn expect_provider(&mut self) {
        let provider = self.provider.clone();
        self.store
            .expect_find_provider_by_url()
            .returning(move |custom_url| {
                if custom_url == provider.custom_url {
                    Ok(Some(provider.clone()))
                } else {
                    Ok(None)
                }
            });
    }

    pub fn expect_service(&mut self) {
        let service = self.service.clone();
        self.store
            .expect_find_service()
            .returning(move |provider_id, service_id| {
                if provider_id == service.provider_id && service_id == service.id {
                    Ok(Some(service.clone()))
                } else {
                    Ok(None)
                }
            });
    }

    pub fn expect_hours(&mut self, hours: Vec<DbBusinessHours>) {
        self.store
            .expect_list_business_hours()
            .returning(move |_| Ok(hours.clone()));
    }

    pub fn expect_booked(&mut self, booked: Vec<DbBookedInterval>) {
        self.store
            .expect_booked_intervals()
            .returning(move |_, from, to| {
                Ok(booked
                    .iter()
                    .filter(|row| row.date >= from && row.date <= to)
                    .cloned()
                    .collect())
            });
    }

    pub fn expect_fields(&mut self, fields: Vec<DbFormField>) {
        self.store
            .expect_list_form_fields()
            .returning(move |_| Ok(fields.clone()));
    }

    pub fn service_path(&self, suffix: &str) -> String {
        format!("/api/providers/{}/services/{}/{}", CUSTOM_URL, self.service.id, suffix)
    }

    pub fn server(self) -> TestServer {
        let state = Arc::new(ApiState::new(Arc::new(self.store)));
        TestServer::new(build_router(state)).unwrap()
    }
}

pub fn provider() -> DbProvider {
    DbProvider {
        id: Uuid::new_v4(),
        user_id: "user_123".to_string(),
        name: "Dana Reyes".to_string(),
        business_name: "Harbor Physio".to_string(),
        bio: Some("Sports and rehab physiotherapy".to_string()),
        contact_email: "hello@harborphysio.example".to_string(),
        timezone: "UTC".to_string(),
        custom_url: CUSTOM_URL.to_string(),
        profile_image: None,
        created_at: Utc::now(),
    }
}

pub fn service(provider_id: Uuid, duration: i32) -> DbService {
    DbService {
        id: Uuid::new_v4(),
        provider_id,
        name: "Initial assessment".to_string(),
        description: "First visit".to_string(),
        duration,
        price: 8500,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn hours_every_day(provider_id: Uuid, start: &str, end: &str) -> Vec<DbBusinessHours> {
    (0..7)
        .map(|day| DbBusinessHours {
            id: Uuid::new_v4(),
            provider_id,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_available: true,
        })
        .collect()
}

pub fn closed_every_day(provider_id: Uuid) -> Vec<DbBusinessHours> {
    hours_every_day(provider_id, "09:00", "17:00")
        .into_iter()
        .map(|row| DbBusinessHours {
            is_available: false,
            ..row
        })
        .collect()
}

pub fn booked(date: NaiveDate, time: &str, duration: i32) -> DbBookedInterval {
    DbBookedInterval {
        date,
        time: time.to_string(),
        duration,
    }
}

pub fn form_field(service_id: Option<Uuid>, label: &str, field_type: &str, order: i32) -> DbFormField {
    DbFormField {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        service_id,
        label: label.to_string(),
        field_type: field_type.to_string(),
        required: false,
        placeholder: None,
        options: None,
        default_value: None,
        display_order: order,
        is_active: true,
    }
}

/// Today for a provider in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: u64) -> NaiveDate {
    today().checked_add_days(Days::new(days)).unwrap()
}
