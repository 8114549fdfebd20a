use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create content_records table
        // =====================================================
        // One row per resource record; the typed entity lives in `body`.
        manager
            .create_table(
                Table::create()
                    .table(ContentRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentRecords::Resource)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentRecords::Position)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ContentRecords::Body).json_binary().not_null())
                    .col(
                        ColumnDef::new(ContentRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContentRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Listing scans one resource in insertion order
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_content_records_resource_position
                ON content_records (resource, position);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_content_records_resource_position;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ContentRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContentRecords {
    Table,
    Id,
    Resource,
    Position,
    Body,
    CreatedAt,
    UpdatedAt,
}
