use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250619_154500_add_availability_assignment"
    }
}

#[derive(Iden)]
enum Availability {
    Table,
    Uuid,
    UserId,
    TournamentId,
    SubmittedAt,
}

#[derive(Iden)]
enum Assignment {
    Table,
    Uuid,
    UserId,
    TournamentId,
    Role,
    AssignedBy,
    AssignedAt,
    Status,
    IsConfirmed,
}

#[derive(Iden)]
enum User {
    Table,
    Uuid,
}

#[derive(Iden)]
enum Tournament {
    Table,
    Uuid,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            sea_query::Table::create()
                .table(Availability::Table)
                .if_not_exists()
                .col(ColumnDef::new(Availability::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Availability::UserId).uuid().not_null())
                .col(ColumnDef::new(Availability::TournamentId).uuid().not_null())
                .col(ColumnDef::new(Availability::SubmittedAt).timestamp().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-availability-user")
                        .from_tbl(Availability::Table)
                        .from_col(Availability::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-availability-tournament")
                        .from_tbl(Availability::Table)
                        .from_col(Availability::TournamentId)
                        .to_tbl(Tournament::Table)
                        .to_col(Tournament::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        // The unique pairs are the authority for duplicate submissions and
        // duplicate assignments, the policy checks are only a fast path.
        manager.create_index(
            IndexCreateStatement::new()
                .name("idx-availability-user-tournament")
                .table(Availability::Table)
                .col(Availability::UserId)
                .col(Availability::TournamentId)
                .unique()
                .to_owned()
        ).await?;

        manager.create_table(
            sea_query::Table::create()
                .table(Assignment::Table)
                .if_not_exists()
                .col(ColumnDef::new(Assignment::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Assignment::UserId).uuid().not_null())
                .col(ColumnDef::new(Assignment::TournamentId).uuid().not_null())
                .col(ColumnDef::new(Assignment::Role).string_len(32).not_null())
                .col(ColumnDef::new(Assignment::AssignedBy).uuid().not_null())
                .col(ColumnDef::new(Assignment::AssignedAt).timestamp().not_null())
                .col(ColumnDef::new(Assignment::Status).string_len(32).not_null())
                .col(ColumnDef::new(Assignment::IsConfirmed).boolean().not_null().default(false))
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-assignment-user")
                        .from_tbl(Assignment::Table)
                        .from_col(Assignment::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-assignment-assigned_by")
                        .from_tbl(Assignment::Table)
                        .from_col(Assignment::AssignedBy)
                        .to_tbl(User::Table)
                        .to_col(User::Uuid)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-assignment-tournament")
                        .from_tbl(Assignment::Table)
                        .from_col(Assignment::TournamentId)
                        .to_tbl(Tournament::Table)
                        .to_col(Tournament::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
                .name("idx-assignment-user-tournament")
                .table(Assignment::Table)
                .col(Assignment::UserId)
                .col(Assignment::TournamentId)
                .unique()
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
                .name("idx-assignment-tournament")
                .table(Assignment::Table)
                .col(Assignment::TournamentId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(sea_query::Table::drop().table(Assignment::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Availability::Table).to_owned()).await?;
        Ok(())
    }
}
