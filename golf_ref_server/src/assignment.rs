use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::delete, routing::post};

use golf_ref_entities::domain::actor::Actor;
use golf_ref_entities::domain::tournament::Tournament;
use golf_ref_entities::policy::eligibility::{check_assignment, AssignmentRefusal};
use golf_ref_entities::policy::visibility::TournamentScope;
use golf_ref_entities::queries;
use golf_ref_entities::schema::{self, assignment::{AssignmentRole, AssignmentStatus}};
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, IsolationLevel, SqlErr, TransactionTrait};
use serde::{Serialize, Deserialize};

use crate::auth::ExtractActor;
use crate::response::{APIError, handle_error};
use crate::state::AppState;
use crate::tournament::{check_admin_authority, get_visible_tournament};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub referee_id: Uuid,
    /// Role name as written on the convocation, e.g. "Direttore di Torneo".
    pub role: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateAssignmentResponse {
    pub uuid: Uuid,
}

pub async fn create_assignment_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<CreateAssignmentRequest>
) -> Result<Json<CreateAssignmentResponse>, APIError> {
    let role = request.role.parse::<AssignmentRole>()
        .map_err(|_| APIError::refusal(AssignmentRefusal::InvalidRole))?;

    // The eligibility check is an optimistic fast path. The capacity count
    // and the duplicate probe run inside the transaction and the unique
    // index on (user_id, tournament_id) decides lost races.
    let transaction = db.begin_with_config(Some(IsolationLevel::Serializable), None).await.map_err(handle_error)?;

    // Actor authority over the tournament is the policy's first check and
    // reports Forbidden, so the visibility filter is not applied here.
    let tournament = Tournament::get(&transaction, tournament_id).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::NOT_FOUND, "Tournament not found")))?;

    let candidate = Actor::get(&transaction, request.referee_id).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::NOT_FOUND, "Referee not found")))?;

    let ctx = queries::load_assignment_context(&transaction, tournament, candidate.uuid).await.map_err(handle_error)?;

    check_assignment(&actor, &ctx, &candidate).map_err(APIError::refusal)?;

    let assignment_uuid = Uuid::new_v4();
    let assignment = schema::assignment::ActiveModel {
        uuid: ActiveValue::Set(assignment_uuid),
        user_id: ActiveValue::Set(candidate.uuid),
        tournament_id: ActiveValue::Set(tournament_id),
        role: ActiveValue::Set(role),
        assigned_by: ActiveValue::Set(actor.uuid),
        assigned_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        status: ActiveValue::Set(AssignmentStatus::Pending),
        is_confirmed: ActiveValue::Set(false),
    };

    match assignment.insert(&transaction).await {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err((StatusCode::CONFLICT, "Referee was assigned concurrently").into());
        }
        Err(e) => return Err(handle_error(e)),
    }

    transaction.commit().await.map_err(handle_error)?;

    return Ok(
        Json(
            CreateAssignmentResponse {
                uuid: assignment_uuid,
            }
        )
    )
}

pub async fn list_assignments_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Vec<schema::assignment::Model>>, APIError> {
    // 404s before listing when the tournament is invisible to the actor.
    get_visible_tournament(&db, &actor, tournament_id).await?;

    let scope = TournamentScope::for_actor(&actor);
    let assignments = queries::select_assignments_via_tournament(&scope)
        .filter(schema::assignment::Column::TournamentId.eq(tournament_id))
        .all(&db).await.map_err(handle_error)?;

    Ok(Json(assignments))
}

pub async fn delete_assignment_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<()>, APIError> {
    let assignment = schema::assignment::Entity::find_by_id(assignment_id)
        .one(&db).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::NOT_FOUND, "Assignment not found")))?;

    let tournament = get_visible_tournament(&db, &actor, assignment.tournament_id).await
        .map_err(|_| APIError::from((StatusCode::NOT_FOUND, "Assignment not found")))?;
    check_admin_authority(&actor, &tournament)?;

    schema::assignment::Entity::delete_by_id(assignment.uuid).exec(&db).await.map_err(handle_error)?;

    Ok(Json(()))
}

pub async fn confirm_assignment_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<schema::assignment::Model>, APIError> {
    let assignment = schema::assignment::Entity::find_by_id(assignment_id)
        .one(&db).await.map_err(handle_error)?
        .ok_or(APIError::from((StatusCode::NOT_FOUND, "Assignment not found")))?;

    if assignment.user_id != actor.uuid {
        return Err((StatusCode::FORBIDDEN, "Only the assigned referee can confirm an assignment").into());
    }

    let mut active: schema::assignment::ActiveModel = assignment.into();
    active.is_confirmed = ActiveValue::Set(true);
    active.status = ActiveValue::Set(AssignmentStatus::Confirmed);
    let updated = active.update(&db).await.map_err(handle_error)?;

    Ok(Json(updated))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/tournaments/:tournament_id/assignments", post(create_assignment_handler).get(list_assignments_handler))
        .route("/assignments/:assignment_id", delete(delete_assignment_handler))
        .route("/assignments/:assignment_id/confirm", post(confirm_assignment_handler))
}
