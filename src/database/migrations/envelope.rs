use sea_orm_migration::prelude::*;

/// Columns shared by every managed record table.
#[derive(DeriveIden)]
pub enum Envelope {
    Id,
    Uuid,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    CreatedBy,
    UpdatedBy,
    DeletedBy,
}

/// `CREATE TABLE` with the envelope wrapped around `columns`.
pub fn record_table<T>(table: T, columns: Vec<ColumnDef>) -> TableCreateStatement
where
    T: IntoIden + 'static,
{
    let mut statement = Table::create();
    statement
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Envelope::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Envelope::Uuid)
                .string()
                .not_null()
                .unique_key(),
        );

    for mut column in columns {
        statement.col(&mut column);
    }

    statement
        .col(
            ColumnDef::new(Envelope::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Envelope::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Envelope::DeletedAt)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(Envelope::CreatedBy).json().not_null())
        .col(ColumnDef::new(Envelope::UpdatedBy).json().not_null())
        .col(ColumnDef::new(Envelope::DeletedBy).json())
        .to_owned()
}

/// Index backing the `deleted_at = ''` filter on list and count queries.
pub fn live_index<T>(table: T, name: &str) -> IndexCreateStatement
where
    T: IntoIden + 'static,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(Envelope::DeletedAt)
        .to_owned()
}

pub fn text(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .string()
        .not_null()
        .default("")
        .to_owned()
}

pub fn float(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .double()
        .not_null()
        .default(0.0)
        .to_owned()
}

pub fn integer(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .big_integer()
        .not_null()
        .default(0)
        .to_owned()
}

pub fn date(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column).date().null().to_owned()
}
