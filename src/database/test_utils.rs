use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::database::connection::establish_connection;
use crate::database::migrations::Migrator;

/// In-memory SQLite database with every migration applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = establish_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
