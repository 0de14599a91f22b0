use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Owns the connection pool. Each entity's queries live in their own `impl` block in this module.
#[derive(Clone)]
pub struct DatabaseService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DatabaseService {
    /// Connects and brings the schema up to date.
    pub async fn new(uri: &str, max_connections: u32) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let mut options = ConnectOptions::new(uri.to_owned());
        options
            .max_connections(max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        let database_connection = Database::connect(options).await?;

        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Migrations finished.");

        Ok(Self { database_connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
