use sea_orm::entity::prelude::*;
use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub zone_id: Option<Uuid>,
    pub level: Option<RefereeLevel>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Uuid"
    )]
    Zone,
    #[sea_orm(has_many = "super::availability::Entity")]
    Availability,
    #[sea_orm(has_many = "super::user_access_key::Entity")]
    UserAccessKey,
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl Related<super::user_access_key::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccessKey.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        super::assignment::Relation::User.def().rev()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UserType {
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    #[sea_orm(string_value = "national_admin")]
    NationalAdmin,
    #[sea_orm(string_value = "admin")]
    ZoneAdmin,
    #[sea_orm(string_value = "referee")]
    Referee,
}

impl UserType {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::SuperAdmin | UserType::NationalAdmin | UserType::ZoneAdmin)
    }
}

/// Referee competence ranks. Ordering goes through `ordinal`, not the
/// declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RefereeLevel {
    #[sea_orm(string_value = "aspirante")]
    Aspirante,
    #[sea_orm(string_value = "1_livello")]
    PrimoLivello,
    #[sea_orm(string_value = "regionale")]
    Regionale,
    #[sea_orm(string_value = "nazionale")]
    Nazionale,
    #[sea_orm(string_value = "internazionale")]
    Internazionale,
}

impl RefereeLevel {
    pub fn ordinal(&self) -> u8 {
        match self {
            RefereeLevel::Aspirante => 0,
            RefereeLevel::PrimoLivello => 1,
            RefereeLevel::Regionale => 2,
            RefereeLevel::Nazionale => 3,
            RefereeLevel::Internazionale => 4,
        }
    }

    /// Nazionale and Internazionale referees see national tournaments
    /// outside their own zone.
    pub fn is_national_rank(&self) -> bool {
        self.ordinal() >= RefereeLevel::Nazionale.ordinal()
    }
}

impl PartialOrd for RefereeLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RefereeLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

#[test]
fn test_level_ordering_follows_ordinals() {
    assert!(RefereeLevel::Aspirante < RefereeLevel::PrimoLivello);
    assert!(RefereeLevel::Regionale < RefereeLevel::Nazionale);
    assert!(RefereeLevel::Internazionale > RefereeLevel::Nazionale);
    assert_eq!(RefereeLevel::Nazionale.ordinal(), 3);
}

#[test]
fn test_national_rank() {
    assert!(!RefereeLevel::Regionale.is_national_rank());
    assert!(RefereeLevel::Nazionale.is_national_rank());
    assert!(RefereeLevel::Internazionale.is_national_rank());
}
