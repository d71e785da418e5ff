use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250612_101500_add_tournaments"
    }
}

#[derive(Iden)]
enum TournamentType {
    Table,
    Uuid,
    Name,
    IsNational,
    RequiredLevel,
    MinReferees,
    MaxReferees,
}

#[derive(Iden)]
enum Tournament {
    Table,
    Uuid,
    Name,
    ClubId,
    ZoneId,
    TournamentTypeId,
    Status,
    StartDate,
    EndDate,
    AvailabilityDeadline,
}

#[derive(Iden)]
enum Club {
    Table,
    Uuid,
}

#[derive(Iden)]
enum Zone {
    Table,
    Uuid,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            sea_query::Table::create()
                .table(TournamentType::Table)
                .if_not_exists()
                .col(ColumnDef::new(TournamentType::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(TournamentType::Name).string().not_null())
                .col(ColumnDef::new(TournamentType::IsNational).boolean().not_null().default(false))
                .col(ColumnDef::new(TournamentType::RequiredLevel).string_len(32).not_null())
                .col(ColumnDef::new(TournamentType::MinReferees).integer().not_null())
                .col(ColumnDef::new(TournamentType::MaxReferees).integer().not_null())
                .to_owned()
        ).await?;

        manager.create_table(
            sea_query::Table::create()
                .table(Tournament::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tournament::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Tournament::Name).string().not_null())
                .col(ColumnDef::new(Tournament::ClubId).uuid().not_null())
                // Null only for national tournament types. Enforced at
                // creation, sqlite has no cross-table check.
                .col(ColumnDef::new(Tournament::ZoneId).uuid())
                .col(ColumnDef::new(Tournament::TournamentTypeId).uuid().not_null())
                .col(ColumnDef::new(Tournament::Status).string_len(32).not_null())
                .col(ColumnDef::new(Tournament::StartDate).date().not_null())
                .col(ColumnDef::new(Tournament::EndDate).date().not_null())
                .col(ColumnDef::new(Tournament::AvailabilityDeadline).timestamp())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-tournament-club")
                        .from_tbl(Tournament::Table)
                        .from_col(Tournament::ClubId)
                        .to_tbl(Club::Table)
                        .to_col(Club::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-tournament-zone")
                        .from_tbl(Tournament::Table)
                        .from_col(Tournament::ZoneId)
                        .to_tbl(Zone::Table)
                        .to_col(Zone::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-tournament-type")
                        .from_tbl(Tournament::Table)
                        .from_col(Tournament::TournamentTypeId)
                        .to_tbl(TournamentType::Table)
                        .to_col(TournamentType::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
                .name("idx-tournament-zone")
                .table(Tournament::Table)
                .col(Tournament::ZoneId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(sea_query::Table::drop().table(Tournament::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(TournamentType::Table).to_owned()).await?;
        Ok(())
    }
}
