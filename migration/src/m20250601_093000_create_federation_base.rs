use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250601_093000_create_federation_base"
    }
}

#[derive(Iden)]
enum Zone {
    Table,
    Uuid,
    Name,
    Code,
}

#[derive(Iden)]
enum Club {
    Table,
    Uuid,
    Name,
    ZoneId,
}

#[derive(Iden)]
enum User {
    Table,
    Uuid,
    Name,
    Email,
    PasswordHash,
    UserType,
    ZoneId,
    Level,
    IsActive,
}

#[derive(Iden)]
enum UserAccessKey {
    Table,
    KeyHash,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            sea_query::Table::create()
                .table(Zone::Table)
                .if_not_exists()
                .col(ColumnDef::new(Zone::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Zone::Name).string().not_null())
                .col(ColumnDef::new(Zone::Code).string_len(16).not_null().unique_key())
                .to_owned()
        ).await?;

        manager.create_table(
            sea_query::Table::create()
                .table(Club::Table)
                .if_not_exists()
                .col(ColumnDef::new(Club::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Club::Name).string().not_null())
                .col(ColumnDef::new(Club::ZoneId).uuid().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-club-zone")
                        .from_tbl(Club::Table)
                        .from_col(Club::ZoneId)
                        .to_tbl(Zone::Table)
                        .to_col(Zone::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_table(
            sea_query::Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(ColumnDef::new(User::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(User::Name).string().not_null())
                .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                .col(ColumnDef::new(User::PasswordHash).string().not_null())
                .col(ColumnDef::new(User::UserType).string_len(32).not_null())
                .col(ColumnDef::new(User::ZoneId).uuid())
                .col(ColumnDef::new(User::Level).string_len(32))
                .col(ColumnDef::new(User::IsActive).boolean().not_null().default(true))
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-user-zone")
                        .from_tbl(User::Table)
                        .from_col(User::ZoneId)
                        .to_tbl(Zone::Table)
                        .to_col(Zone::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_table(
            sea_query::Table::create()
                .table(UserAccessKey::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserAccessKey::KeyHash).string().not_null().primary_key())
                .col(ColumnDef::new(UserAccessKey::UserId).uuid().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-user_access_key-user")
                        .from_tbl(UserAccessKey::Table)
                        .from_col(UserAccessKey::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(sea_query::Table::drop().table(UserAccessKey::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(User::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Club::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Zone::Table).to_owned()).await?;
        Ok(())
    }
}
