use sea_orm::entity::prelude::*;
use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub name: String,
    pub club_id: Uuid,
    // Null only for tournaments whose type is national. Sqlite can not
    // express the cross-table check, so creation validates it.
    pub zone_id: Option<Uuid>,
    pub tournament_type_id: Uuid,
    pub status: TournamentStatus,
    pub start_date: Date,
    pub end_date: Date,
    pub availability_deadline: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::club::Entity",
        from = "Column::ClubId",
        to = "super::club::Column::Uuid"
    )]
    Club,
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Uuid"
    )]
    Zone,
    #[sea_orm(
        belongs_to = "super::tournament_type::Entity",
        from = "Column::TournamentTypeId",
        to = "super::tournament_type::Column::Uuid"
    )]
    TournamentType,
    #[sea_orm(has_many = "super::availability::Entity")]
    Availability,
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignment,
}

impl Related<super::club::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Club.def()
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::tournament_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentType.def()
    }
}

impl Related<super::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Linear lifecycle. Only the allowed values are enforced, there is no
/// transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum TournamentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl TournamentStatus {
    pub fn accepts_assignments(&self) -> bool {
        matches!(self, TournamentStatus::Open | TournamentStatus::Closed)
    }

    pub fn accepts_availability(&self) -> bool {
        matches!(self, TournamentStatus::Open)
    }
}
