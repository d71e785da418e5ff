use thiserror::Error;
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};

use crate::schema;
use crate::schema::tournament::TournamentStatus;
use crate::schema::user::RefereeLevel;

/// A tournament row flattened with its type. This is the shape both policy
/// rule-sets work on, so the national flag and the capacity bounds are
/// available without further loading.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Tournament {
    pub uuid: Uuid,
    pub name: String,
    pub club_id: Uuid,
    pub zone_id: Option<Uuid>,
    pub tournament_type_id: Uuid,
    pub status: TournamentStatus,
    pub is_national: bool,
    pub required_level: RefereeLevel,
    pub min_referees: i32,
    pub max_referees: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub availability_deadline: Option<DateTime>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentLoadError {
    #[error(transparent)]
    DbErr(#[from] DbErr),
    #[error("tournament references a missing tournament type")]
    MissingTournamentType,
}

impl Tournament {
    pub fn from_rows(
        tournament: schema::tournament::Model,
        tournament_type: schema::tournament_type::Model,
    ) -> Self {
        Tournament {
            uuid: tournament.uuid,
            name: tournament.name,
            club_id: tournament.club_id,
            zone_id: tournament.zone_id,
            tournament_type_id: tournament.tournament_type_id,
            status: tournament.status,
            is_national: tournament_type.is_national,
            required_level: tournament_type.required_level,
            min_referees: tournament_type.min_referees,
            max_referees: tournament_type.max_referees,
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            availability_deadline: tournament.availability_deadline,
        }
    }

    pub async fn get<C>(db: &C, uuid: Uuid) -> Result<Option<Tournament>, TournamentLoadError> where C: ConnectionTrait {
        let row = schema::tournament::Entity::find_by_id(uuid)
            .find_also_related(schema::tournament_type::Entity)
            .one(db).await?;

        match row {
            None => Ok(None),
            Some((tournament, Some(tournament_type))) => Ok(Some(Self::from_rows(tournament, tournament_type))),
            Some((_, None)) => Err(TournamentLoadError::MissingTournamentType),
        }
    }
}

#[test]
fn test_from_rows_flattens_type() {
    let tournament = Tournament::from_rows(
        schema::tournament::Model {
            uuid: Uuid::from_u128(300),
            name: "Coppa del Presidente".into(),
            club_id: Uuid::from_u128(100),
            zone_id: Some(Uuid::from_u128(10)),
            tournament_type_id: Uuid::from_u128(200),
            status: TournamentStatus::Open,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
            availability_deadline: None,
        },
        schema::tournament_type::Model {
            uuid: Uuid::from_u128(200),
            name: "Gara zonale 36 buche".into(),
            is_national: false,
            required_level: RefereeLevel::Regionale,
            min_referees: 1,
            max_referees: 2,
        },
    );

    assert_eq!(tournament.zone_id, Some(Uuid::from_u128(10)));
    assert!(!tournament.is_national);
    assert_eq!(tournament.required_level, RefereeLevel::Regionale);
    assert_eq!(tournament.max_referees, 2);
}
