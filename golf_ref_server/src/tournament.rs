use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use golf_ref_entities::domain::actor::Actor;
use golf_ref_entities::domain::tournament::Tournament;
use golf_ref_entities::policy::visibility::TournamentScope;
use golf_ref_entities::queries;
use golf_ref_entities::schema::{self, tournament::TournamentStatus};
use golf_ref_entities::schema::user::{RefereeLevel, UserType};
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, SqlErr};
use serde::{Serialize, Deserialize};

use crate::auth::ExtractActor;
use crate::response::{APIError, handle_error};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTournamentRequest {
    pub uuid: Uuid,
    pub name: String,
    pub club_id: Uuid,
    pub tournament_type_id: Uuid,
    #[serde(default = "default_initial_status")]
    pub status: TournamentStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub availability_deadline: Option<NaiveDateTime>,
}

fn default_initial_status() -> TournamentStatus {
    TournamentStatus::Draft
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTournamentResponse {
    pub uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentInfo {
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
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub availability_deadline: Option<NaiveDateTime>,
}

impl From<Tournament> for TournamentInfo {
    fn from(tournament: Tournament) -> Self {
        TournamentInfo {
            uuid: tournament.uuid,
            name: tournament.name,
            club_id: tournament.club_id,
            zone_id: tournament.zone_id,
            tournament_type_id: tournament.tournament_type_id,
            status: tournament.status,
            is_national: tournament.is_national,
            required_level: tournament.required_level,
            min_referees: tournament.min_referees,
            max_referees: tournament.max_referees,
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            availability_deadline: tournament.availability_deadline,
        }
    }
}

pub async fn create_tournament_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Json(request): Json<CreateTournamentRequest>
) -> Result<Json<CreateTournamentResponse>, APIError> {
    if !actor.is_admin() {
        return Err((StatusCode::FORBIDDEN, "Only administrators can create tournaments").into());
    }

    if !matches!(request.status, TournamentStatus::Draft | TournamentStatus::Open) {
        return Err((StatusCode::BAD_REQUEST, "New tournaments must start as draft or open").into());
    }

    let club = schema::club::Entity::find_by_id(request.club_id)
        .one(&db).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::BAD_REQUEST, "Unknown club")))?;

    let tournament_type = schema::tournament_type::Entity::find_by_id(request.tournament_type_id)
        .one(&db).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::BAD_REQUEST, "Unknown tournament type")))?;

    let zone_id = if tournament_type.is_national {
        if !matches!(actor.user_type, UserType::NationalAdmin | UserType::SuperAdmin) {
            return Err((StatusCode::FORBIDDEN, "National tournaments are managed by the national administration").into());
        }
        None
    } else {
        match actor.user_type {
            UserType::SuperAdmin => {}
            UserType::ZoneAdmin => {
                if actor.zone_id != Some(club.zone_id) {
                    return Err((StatusCode::FORBIDDEN, "Zonal tournaments can only be created in the admin's own zone").into());
                }
            }
            _ => {
                return Err((StatusCode::FORBIDDEN, "Zonal tournaments are managed by their zone administration").into());
            }
        }
        Some(club.zone_id)
    };

    let tournament = schema::tournament::ActiveModel {
        uuid: ActiveValue::Set(request.uuid),
        name: ActiveValue::Set(request.name),
        club_id: ActiveValue::Set(request.club_id),
        zone_id: ActiveValue::Set(zone_id),
        tournament_type_id: ActiveValue::Set(request.tournament_type_id),
        status: ActiveValue::Set(request.status),
        start_date: ActiveValue::Set(request.start_date),
        end_date: ActiveValue::Set(request.end_date),
        availability_deadline: ActiveValue::Set(request.availability_deadline),
    };

    match tournament.insert(&db).await {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err((StatusCode::CONFLICT, "A tournament with this id already exists").into());
        }
        Err(e) => return Err(handle_error(e)),
    }

    return Ok(
        Json(
            CreateTournamentResponse {
                uuid: request.uuid,
            }
        )
    )
}

pub async fn list_tournaments_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
) -> Result<Json<Vec<TournamentInfo>>, APIError> {
    let scope = TournamentScope::for_actor(&actor);
    let tournaments = queries::query_visible_tournaments(&db, &scope).await.map_err(handle_error)?;

    Ok(Json(tournaments.into_iter().map(TournamentInfo::from).collect_vec()))
}

/// Loads a tournament and applies the single-record visibility check.
/// Filtered and absent tournaments are indistinguishable by design.
pub(crate) async fn get_visible_tournament<C>(db: &C, actor: &Actor, tournament_id: Uuid) -> Result<Tournament, APIError> where C: sea_orm::ConnectionTrait {
    let tournament = Tournament::get(db, tournament_id).await.map_err(handle_error)?;
    let tournament = tournament.ok_or(APIError::from((StatusCode::NOT_FOUND, "Tournament not found")))?;

    let scope = TournamentScope::for_actor(actor);
    if !scope.allows(&tournament) {
        return Err((StatusCode::NOT_FOUND, "Tournament not found").into());
    }

    Ok(tournament)
}

/// Write authority over a tournament. Distinct from visibility: a national
/// rank referee sees national tournaments but never administers them.
pub(crate) fn check_admin_authority(actor: &Actor, tournament: &Tournament) -> Result<(), APIError> {
    match actor.user_type {
        UserType::SuperAdmin => Ok(()),
        UserType::NationalAdmin if tournament.is_national => Ok(()),
        UserType::ZoneAdmin if actor.zone_id == tournament.zone_id && tournament.zone_id.is_some() => Ok(()),
        _ => Err((StatusCode::FORBIDDEN, "You are not authorized to manage this tournament").into()),
    }
}

pub async fn get_tournament_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<TournamentInfo>, APIError> {
    let tournament = get_visible_tournament(&db, &actor, tournament_id).await?;
    Ok(Json(tournament.into()))
}

pub async fn delete_tournament_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<()>, APIError> {
    let tournament = get_visible_tournament(&db, &actor, tournament_id).await?;
    check_admin_authority(&actor, &tournament)?;

    schema::tournament::Entity::delete_by_id(tournament.uuid).exec(&db).await.map_err(handle_error)?;

    Ok(Json(()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/tournaments", post(create_tournament_handler).get(list_tournaments_handler))
        .route("/tournaments/:tournament_id", get(get_tournament_handler).delete(delete_tournament_handler))
}
