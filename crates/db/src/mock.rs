use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use crate::{
    models::{DbBookedInterval, DbBusinessHours, DbFormField, DbProvider, DbService},
    repositories::appointment::NewAppointment,
    store::{BookingOutcome, BookingStore},
};

// Mock store for handler tests
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn find_provider_by_url(&self, custom_url: &str) -> eyre::Result<Option<DbProvider>>;

        async fn list_services(&self, provider_id: Uuid) -> eyre::Result<Vec<DbService>>;

        async fn find_service(
            &self,
            provider_id: Uuid,
            service_id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        async fn list_business_hours(&self, provider_id: Uuid) -> eyre::Result<Vec<DbBusinessHours>>;

        async fn list_form_fields(&self, provider_id: Uuid) -> eyre::Result<Vec<DbFormField>>;

        async fn booked_intervals(
            &self,
            provider_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<DbBookedInterval>>;

        async fn create_appointment(&self, appointment: NewAppointment) -> eyre::Result<BookingOutcome>;
    }
}
