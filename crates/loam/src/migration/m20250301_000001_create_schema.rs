//! Initial migration to create the loam database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_sources(manager).await?;
        self.create_sync_logs(manager).await?;
        self.create_files(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SyncLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sources::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_sources(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sources::Table)
                    .if_not_exists()
                    // Internal
                    .col(ColumnDef::new(Sources::Id).uuid().not_null().primary_key())
                    // Identity
                    .col(ColumnDef::new(Sources::Name).string().not_null())
                    .col(
                        ColumnDef::new(Sources::Mode)
                            .string()
                            .not_null()
                            .default("remote"),
                    )
                    .col(ColumnDef::new(Sources::Origin).string().not_null())
                    .col(ColumnDef::new(Sources::Branch).string().null())
                    // Content
                    .col(ColumnDef::new(Sources::Description).text().null())
                    .col(ColumnDef::new(Sources::OwnerLogin).string().not_null())
                    // Tracking
                    .col(
                        ColumnDef::new(Sources::SyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Sources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (origin, mode)
        manager
            .create_index(
                Index::create()
                    .name("idx_sources_origin_mode")
                    .table(Sources::Table)
                    .col(Sources::Origin)
                    .col(Sources::Mode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on owner_login
        manager
            .create_index(
                Index::create()
                    .name("idx_sources_owner_login")
                    .table(Sources::Table)
                    .col(Sources::OwnerLogin)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_sync_logs(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SyncLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SyncLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SyncLogs::SourceId).uuid().not_null())
                    .col(
                        ColumnDef::new(SyncLogs::Status)
                            .string()
                            .not_null()
                            .default("syncing"),
                    )
                    .col(
                        ColumnDef::new(SyncLogs::FilesAdded)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SyncLogs::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SyncLogs::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sync_logs_source")
                            .from(SyncLogs::Table, SyncLogs::SourceId)
                            .to(Sources::Table, Sources::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on (source_id, status) for the in-flight guard lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_sync_logs_source_status")
                    .table(SyncLogs::Table)
                    .col(SyncLogs::SourceId)
                    .col(SyncLogs::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_files(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Files::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Files::SourceId).uuid().not_null())
                    .col(ColumnDef::new(Files::Path).string().not_null())
                    .col(ColumnDef::new(Files::Name).string().not_null())
                    .col(ColumnDef::new(Files::Content).text().null())
                    .col(
                        ColumnDef::new(Files::Size)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Files::ContentHash).string().not_null())
                    .col(ColumnDef::new(Files::MimeType).string().not_null())
                    .col(
                        ColumnDef::new(Files::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Files::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_files_source")
                            .from(Files::Table, Files::SourceId)
                            .to(Sources::Table, Sources::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (source_id, path)
        manager
            .create_index(
                Index::create()
                    .name("idx_files_source_path")
                    .table(Files::Table)
                    .col(Files::SourceId)
                    .col(Files::Path)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "sources")]
enum Sources {
    Table,
    Id,
    Name,
    Mode,
    Origin,
    Branch,
    Description,
    OwnerLogin,
    SyncedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "sync_logs")]
enum SyncLogs {
    Table,
    Id,
    SourceId,
    Status,
    FilesAdded,
    StartedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "files")]
enum Files {
    Table,
    Id,
    SourceId,
    Path,
    Name,
    Content,
    Size,
    ContentHash,
    MimeType,
    CreatedAt,
    UpdatedAt,
}
