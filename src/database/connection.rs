use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);

    // Every pooled connection to `sqlite::memory:` opens its own database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 8 };
    options
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    Database::connect(options).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => "sqlite::memory:".to_string(),
        // mode=rwc creates the file on first start
        Some(path) => format!("sqlite:{}?mode=rwc", path),
        None => "sqlite:agrirecords.db?mode=rwc".to_string(),
    }
}
