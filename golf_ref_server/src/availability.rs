use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};

use golf_ref_entities::policy::visibility::TournamentScope;
use golf_ref_entities::queries;
use golf_ref_entities::schema;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, SqlErr};
use serde::{Serialize, Deserialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::ExtractActor;
use crate::notify::{MailboxEvent, MailboxNotificationManager};
use crate::response::{APIError, handle_error};
use crate::state::AppState;
use crate::tournament::get_visible_tournament;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeclareAvailabilityResponse {
    pub uuid: Uuid,
}

pub async fn declare_availability_handler(
    State(db): State<DatabaseConnection>,
    State(notifications): State<Arc<RwLock<MailboxNotificationManager>>>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<DeclareAvailabilityResponse>, APIError> {
    if !actor.is_referee() {
        return Err((StatusCode::FORBIDDEN, "Only referees declare availability").into());
    }

    let tournament = get_visible_tournament(&db, &actor, tournament_id).await?;

    if !tournament.status.accepts_availability() {
        return Err((StatusCode::BAD_REQUEST, "Tournament is not open for availability declarations").into());
    }

    let now = chrono::Utc::now().naive_utc();
    if let Some(deadline) = tournament.availability_deadline {
        if now > deadline {
            return Err((StatusCode::BAD_REQUEST, "The availability deadline has passed").into());
        }
    }

    let availability_uuid = Uuid::new_v4();
    let availability = schema::availability::ActiveModel {
        uuid: ActiveValue::Set(availability_uuid),
        user_id: ActiveValue::Set(actor.uuid),
        tournament_id: ActiveValue::Set(tournament_id),
        submitted_at: ActiveValue::Set(now),
    };

    match availability.insert(&db).await {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err((StatusCode::CONFLICT, "Availability was already declared for this tournament").into());
        }
        Err(e) => return Err(handle_error(e)),
    }

    let notifications = notifications.read().await;
    notifications.notify_mailbox(&db, &tournament, MailboxEvent::AvailabilityDeclared {
        tournament_id: tournament.uuid,
        tournament_name: tournament.name.clone(),
        referee_id: actor.uuid,
        referee_name: actor.name.clone(),
        submitted_at: now,
    }).await?;
    notifications.send_referee_confirmation(&db, actor.uuid).await?;

    return Ok(
        Json(
            DeclareAvailabilityResponse {
                uuid: availability_uuid,
            }
        )
    )
}

pub async fn withdraw_availability_handler(
    State(db): State<DatabaseConnection>,
    State(notifications): State<Arc<RwLock<MailboxNotificationManager>>>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<()>, APIError> {
    if !actor.is_referee() {
        return Err((StatusCode::FORBIDDEN, "Only referees declare availability").into());
    }

    let tournament = get_visible_tournament(&db, &actor, tournament_id).await?;

    let availability = schema::availability::Entity::find()
        .filter(
            schema::availability::Column::UserId.eq(actor.uuid)
                .and(schema::availability::Column::TournamentId.eq(tournament_id))
        )
        .one(&db).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::NOT_FOUND, "No availability declared for this tournament")))?;

    schema::availability::Entity::delete_by_id(availability.uuid).exec(&db).await.map_err(handle_error)?;

    let notifications = notifications.read().await;
    notifications.notify_mailbox(&db, &tournament, MailboxEvent::AvailabilityWithdrawn {
        tournament_id: tournament.uuid,
        tournament_name: tournament.name.clone(),
        referee_id: actor.uuid,
        referee_name: actor.name.clone(),
    }).await?;
    notifications.send_referee_confirmation(&db, actor.uuid).await?;

    Ok(Json(()))
}

pub async fn list_availabilities_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Vec<schema::availability::Model>>, APIError> {
    if !actor.is_admin() {
        return Err((StatusCode::FORBIDDEN, "Only administrators can list availabilities").into());
    }

    get_visible_tournament(&db, &actor, tournament_id).await?;

    let scope = TournamentScope::for_actor(&actor);
    let availabilities = queries::select_availabilities_via_tournament(&scope)
        .filter(schema::availability::Column::TournamentId.eq(tournament_id))
        .all(&db).await.map_err(handle_error)?;

    Ok(Json(availabilities))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tournaments/:tournament_id/availability",
            post(declare_availability_handler).delete(withdraw_availability_handler)
        )
        .route("/tournaments/:tournament_id/availabilities", get(list_availabilities_handler))
}
