use argon2::Argon2;
use axum::{
    routing::post,
    Router, extract::State, Json,
};
use base64::Engine;
use golf_ref_entities::domain::actor::Actor;
use golf_ref_entities::schema::user::{RefereeLevel, UserType};
use golf_ref_entities::schema::{self, user_access_key};
use rand::{thread_rng, Rng};
use sea_orm::{prelude::*, DatabaseConnection, IntoActiveModel, SqlErr};
use serde::{Serialize, Deserialize};
use axum::TypedHeader;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::headers::Authorization;
use axum::headers::authorization::{Basic, Bearer};
use axum::http::StatusCode;
use axum::http::request::Parts;

use crate::{response::{APIError, handle_error, handle_error_dyn}, state::AppState};

use password_hash::{PasswordHash, PasswordVerifier, PasswordHasher, SaltString};

/// Extracts the acting user as a policy `Actor`. Handlers pass the actor
/// into the policy functions explicitly, nothing reads authentication
/// state behind their back.
pub struct ExtractActor(pub Actor);

fn load_actor(user: schema::user::Model) -> Result<Actor, APIError> {
    if !user.is_active {
        return Err((StatusCode::UNAUTHORIZED, "Account is deactivated").into());
    }
    Ok(Actor::from_model(user))
}

#[async_trait]
impl FromRequestParts<AppState> for ExtractActor
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let basic_header = TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
            .await;

        if let Ok(basic_header) = basic_header {
            let decoded = basic_header.0;
            let email = decoded.username();
            let password = decoded.password();

            let user = schema::user::Entity::find()
                .filter(schema::user::Column::Email.eq(email))
                .one(&state.db).await.map_err(handle_error)?;

            let user = user.ok_or((StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            let password_hash = PasswordHash::new(&user.password_hash)
                .map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;
            let algs: &[&dyn PasswordVerifier] = &[&Argon2::default()];

            password_hash.verify_password(algs, password).map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            return Ok(ExtractActor(load_actor(user)?))
        }
        else {
            let TypedHeader(bearer_header) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await.map_err(|_| {
                (StatusCode::UNAUTHORIZED, "No valid authorization header found")
            })?;
            let key = base64::engine::general_purpose::STANDARD_NO_PAD.decode(bearer_header.0.token()).map_err(
                |_| {
                    (StatusCode::UNAUTHORIZED, "No valid authorization header found")
                }
            )?;
            let hashed_key = hash_access_key(&key).map_err(
                |_| {
                    (StatusCode::UNAUTHORIZED, "No valid authorization header found")
                }
            )?;

            let key = schema::user_access_key::Entity::find_by_id(
                hashed_key
            ).one(&state.db).await.map_err(handle_error)?;

            let key = key.ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            let user = schema::user::Entity::find_by_id(key.user_id)
                .one(&state.db).await.map_err(handle_error)?
                .ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            return Ok(ExtractActor(load_actor(user)?))
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub zone_id: Option<Uuid>,
    pub level: Option<RefereeLevel>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub uuid: Uuid
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetTokenRequest {
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetTokenResponse {
    pub token: String
}

pub fn hash_password(pwd: String) -> Result<String, Box<dyn std::error::Error>> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let pwd = Argon2::default().hash_password(
        pwd.as_bytes(),
        &salt
    );

    Ok(pwd?.to_string())
}

// Access keys are hashed with a fixed salt so the stored hash can be used
// as the lookup key.
fn hash_access_key(key: &[u8]) -> Result<String, password_hash::Error> {
    let salt = SaltString::from_b64("bXlzYWx0bXlzYWx0")?;
    let hashed_key = Argon2::default().hash_password(key, &salt)?;
    Ok(hashed_key.to_string())
}

pub fn create_key(key: &[u8], user_id: Uuid) -> Result<user_access_key::Model, Box<dyn std::error::Error>> {
    let hashed_key = hash_access_key(key)?;
    Ok(user_access_key::Model {
        key_hash: hashed_key,
        user_id,
    })
}

/// Zone and level are validated here, at the write boundary, so the
/// zone-less fallback in the visibility scope never has to trigger for
/// rows created by this server.
fn validate_new_user(request: &CreateUserRequest) -> Result<(), APIError> {
    match request.user_type {
        UserType::Referee => {
            if request.zone_id.is_none() || request.level.is_none() {
                return Err((StatusCode::BAD_REQUEST, "A referee needs a zone and a level").into());
            }
        }
        UserType::ZoneAdmin => {
            if request.zone_id.is_none() {
                return Err((StatusCode::BAD_REQUEST, "A zone admin needs a zone").into());
            }
        }
        UserType::SuperAdmin | UserType::NationalAdmin => {}
    }
    Ok(())
}

pub async fn create_user_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Json(request): Json<CreateUserRequest>
) -> Result<Json<CreateUserResponse>, APIError> {
    if actor.user_type != UserType::SuperAdmin {
        return Err((StatusCode::FORBIDDEN, "Only the federation administration can create accounts").into());
    }

    validate_new_user(&request)?;

    let new_user_uuid = Uuid::new_v4();
    let pwd = hash_password(request.password).map_err(handle_error_dyn)?;

    let model = schema::user::Model {
        uuid: new_user_uuid,
        name: request.name,
        email: request.email,
        password_hash: pwd,
        user_type: request.user_type,
        zone_id: request.zone_id,
        level: request.level,
        is_active: true,
    };

    let result = model.into_active_model().insert(&db).await;
    match result {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err((StatusCode::CONFLICT, "A user with this email already exists").into());
        }
        Err(e) => return Err(handle_error(e)),
    }

    return Ok(CreateUserResponse {
        uuid: new_user_uuid
    }.into());
}

pub async fn create_token_handler(
    State(db): State<DatabaseConnection>,
    ExtractActor(actor): ExtractActor,
    Json(_request): Json<GetTokenRequest>
) -> Result<Json<GetTokenResponse>, APIError> {
    let key: [u8; 32] = thread_rng().gen::<[u8; 32]>();

    let token = create_key(&key, actor.uuid).map_err(handle_error_dyn)?;
    token.into_active_model().insert(&db).await.map_err(handle_error)?;

    return Ok(
        GetTokenResponse {
            token: base64::engine::general_purpose::STANDARD_NO_PAD.encode(key)
        }.into()
    )
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/tokens", post(create_token_handler))
}
