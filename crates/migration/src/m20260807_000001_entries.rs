//! Initial schema migration.
//!
//! One shared `entries` table holds both amounts and expenses, discriminated
//! by `kind` and linked by the self-referential `parent_id`:
//!
//! - amounts: `kind = 'amount'`, `parent_id IS NULL`
//! - expenses: `kind = 'expense'`, `parent_id` → owning amount

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    Description,
    ValueMinor,
    Kind,
    DateSecs,
    ParentId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::Description).string().not_null())
                    .col(
                        ColumnDef::new(Entries::ValueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::Kind).string().not_null())
                    .col(ColumnDef::new(Entries::DateSecs).big_integer().not_null())
                    .col(ColumnDef::new(Entries::ParentId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-parent_id")
                            .from(Entries::Table, Entries::ParentId)
                            .to(Entries::Table, Entries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-parent_id")
                    .table(Entries::Table)
                    .col(Entries::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-kind")
                    .table(Entries::Table)
                    .col(Entries::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        Ok(())
    }
}
