use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250705_110200_add_zone_mailbox"
    }
}

#[derive(Iden)]
enum Zone {
    Table,
    Mailbox,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.alter_table(
            sea_query::Table::alter()
                .table(Zone::Table)
                .add_column(
                    ColumnDef::new(Zone::Mailbox)
                        .string()
                        .not_null()
                        .default("")
                )
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.alter_table(
            sea_query::Table::alter()
                .table(Zone::Table)
                .drop_column(Zone::Mailbox)
                .to_owned()
        ).await?;

        Ok(())
    }
}
