use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use itertools::Itertools;
use golf_ref_entities::policy::visibility::UserScope;
use golf_ref_entities::queries;
use golf_ref_entities::schema;
use golf_ref_entities::schema::user::RefereeLevel;
use sea_orm::{prelude::*, DatabaseConnection};
use serde::{Serialize, Deserialize};

use crate::auth::ExtractActor;
use crate::response::{APIError, handle_error};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RefereeInfo {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub zone_id: Option<Uuid>,
    pub level: Option<RefereeLevel>,
    pub is_active: bool,
}

impl From<schema::user::Model> for RefereeInfo {
    fn from(model: schema::user::Model) -> Self {
        RefereeInfo {
            uuid: model.uuid,
            name: model.name,
            email: model.email,
            zone_id: model.zone_id,
            level: model.level,
            is_active: model.is_active,
        }
    }
}

pub async fn list_referees_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
) -> Result<Json<Vec<RefereeInfo>>, APIError> {
    let scope = UserScope::for_actor(&actor);

    let referees = queries::query_visible_referees(&db, &scope).await.map_err(handle_error)?;
    let referees = referees.ok_or(APIError::from((StatusCode::FORBIDDEN, "You are not authorized to list referees")))?;

    Ok(Json(referees.into_iter().map(RefereeInfo::from).collect_vec()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/referees", get(list_referees_handler))
}
