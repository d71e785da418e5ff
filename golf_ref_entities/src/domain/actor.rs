use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};

use crate::schema;
use crate::schema::user::{RefereeLevel, UserType};

/// The policy-facing view of a user row. Every policy function takes the
/// acting user (and, for assignments, the candidate referee) explicitly as
/// an `Actor`, so the rules can be evaluated without any request context.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Actor {
    pub uuid: Uuid,
    pub name: String,
    pub user_type: UserType,
    pub zone_id: Option<Uuid>,
    pub level: Option<RefereeLevel>,
    pub is_active: bool,
}

impl Actor {
    pub fn from_model(model: schema::user::Model) -> Self {
        Actor {
            uuid: model.uuid,
            name: model.name,
            user_type: model.user_type,
            zone_id: model.zone_id,
            level: model.level,
            is_active: model.is_active,
        }
    }

    pub async fn get<C>(db: &C, uuid: Uuid) -> Result<Option<Actor>, DbErr> where C: ConnectionTrait {
        let user = schema::user::Entity::find_by_id(uuid).one(db).await?;
        Ok(user.map(Self::from_model))
    }

    pub fn is_admin(&self) -> bool {
        self.user_type.is_admin()
    }

    pub fn is_referee(&self) -> bool {
        self.user_type == UserType::Referee
    }
}
