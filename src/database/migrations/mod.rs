pub use sea_orm_migration::prelude::*;

mod envelope;
mod m20240101_000001_create_identity_tables;
mod m20240101_000002_create_activity_logs;
mod m20240102_000001_create_profile_tables;
mod m20240102_000002_create_production_tables;
mod m20240103_000001_create_commodity_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_identity_tables::Migration),
            Box::new(m20240101_000002_create_activity_logs::Migration),
            Box::new(m20240102_000001_create_profile_tables::Migration),
            Box::new(m20240102_000002_create_production_tables::Migration),
            Box::new(m20240103_000001_create_commodity_tables::Migration),
        ]
    }
}
