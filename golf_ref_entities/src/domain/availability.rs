use itertools::izip;
use thiserror::Error;
use sea_orm::prelude::*;
use sea_orm::LoaderTrait;
use serde::{Serialize, Deserialize};

use crate::schema;
use super::tournament::Tournament;

/// One availability declaration together with the tournament it was
/// submitted for. The referee confirmation summary is built from these.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct RefereeAvailability {
    pub uuid: Uuid,
    pub submitted_at: DateTime,
    pub tournament: Tournament,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AvailabilityLoadError {
    #[error(transparent)]
    DbErr(#[from] DbErr),
    #[error("availability references a missing tournament")]
    MissingTournament,
    #[error("tournament references a missing tournament type")]
    MissingTournamentType,
}

impl RefereeAvailability {
    pub async fn get_all_for_referee<C>(db: &C, user_id: Uuid) -> Result<Vec<RefereeAvailability>, AvailabilityLoadError> where C: ConnectionTrait {
        let rows = schema::availability::Entity::find()
            .filter(schema::availability::Column::UserId.eq(user_id))
            .find_also_related(schema::tournament::Entity)
            .all(db).await?;

        let tournaments = rows.iter().map(|(_, tournament)| tournament.clone().ok_or(AvailabilityLoadError::MissingTournament)).collect::<Result<Vec<_>, _>>()?;
        let types = tournaments.load_one(schema::tournament_type::Entity, db).await?;

        izip!(rows.into_iter(), tournaments.into_iter(), types.into_iter()).map(
            |((availability, _), tournament, tournament_type)| {
                let tournament_type = tournament_type.ok_or(AvailabilityLoadError::MissingTournamentType)?;
                Ok(RefereeAvailability {
                    uuid: availability.uuid,
                    submitted_at: availability.submitted_at,
                    tournament: Tournament::from_rows(tournament, tournament_type),
                })
            }
        ).collect()
    }
}
