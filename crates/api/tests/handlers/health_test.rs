use pretty_assertions::assert_eq;
use slotbook_api::routes::health::{HealthResponse, VersionResponse};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health: HealthResponse = server.get("/health").await.json();
    assert_eq!(health.status, "ok");

    let version: VersionResponse = server.get("/version").await.json();
    assert_eq!(version.name, "slotbook-api");
    assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
}
