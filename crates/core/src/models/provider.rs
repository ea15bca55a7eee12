use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    /// Price in cents.
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProviderResponse {
    pub id: Uuid,
    pub name: String,
    pub business_name: String,
    pub bio: Option<String>,
    pub contact_email: String,
    pub timezone: String,
    pub custom_url: String,
    pub profile_image: Option<String>,
    pub services: Vec<ServiceSummary>,
}
