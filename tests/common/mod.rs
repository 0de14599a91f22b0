use activity_hub::config::EnvConfig;
use activity_hub::db::database_service::DatabaseService;
use std::sync::Arc;

pub mod client;

pub struct TestContext {
    pub db: Arc<DatabaseService>,
    pub config: EnvConfig,
}

impl TestContext {
    /// Fresh in-memory SQLite database per test. One connection so every query sees the same database.
    pub async fn new() -> TestContext {
        let config = get_test_config();
        let db = Arc::new(
            DatabaseService::new(&config.database_url, config.db_max_connections)
                .await
                .expect("Failed to initialize DatabaseService"),
        );

        TestContext { db, config }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DB_MAX_CONNECTIONS" => Some("1".to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        _ => None,
    })
    .expect("test config is valid")
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
