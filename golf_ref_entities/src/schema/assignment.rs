use sea_orm::entity::prelude::*;
use serde::{Serialize, Deserialize};

// (user_id, tournament_id) carries a unique index. The index, not the
// policy pre-check, is the authority for duplicate assignments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub user_id: Uuid,
    pub tournament_id: Uuid,
    pub role: AssignmentRole,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime,
    pub status: AssignmentStatus,
    pub is_confirmed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Uuid"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedBy",
        to = "super::user::Column::Uuid"
    )]
    AssignedBy,
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::Uuid"
    )]
    Tournament,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AssignmentRole {
    #[sea_orm(string_value = "Arbitro")]
    Arbitro,
    #[sea_orm(string_value = "Direttore di Torneo")]
    DirettoreDiTorneo,
    #[sea_orm(string_value = "Osservatore")]
    Osservatore,
}

impl std::str::FromStr for AssignmentRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "Arbitro" => Ok(AssignmentRole::Arbitro),
            "Direttore di Torneo" => Ok(AssignmentRole::DirettoreDiTorneo),
            "Osservatore" => Ok(AssignmentRole::Osservatore),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "notified")]
    Notified,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "declined")]
    Declined,
}
