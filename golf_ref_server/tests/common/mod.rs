use std::borrow::BorrowMut;

use axum::{response::Response, http::{Request, request::Builder}, body::Body};
use http_body::{combinators::UnsyncBoxBody, Body as _};
use golf_ref_entities::mock::{self, MockOption};
use golf_ref_server::{auth::create_key, state::AppState};
use sea_orm::{prelude::Uuid, IntoActiveModel, ActiveModelTrait};
use tower::Service;
use base64::{engine::general_purpose, Engine as _};

#[derive(Default)]
pub struct FixtureOptions {
    pub mock_default_environment: bool,
}

pub struct Fixture {
    pub app: axum::Router,
    pub state: AppState,
    pub auth: Auth,
}

pub enum Auth {
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

pub struct APIResponse {
    response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>,
}

impl APIResponse {
    pub fn status(&self) -> axum::http::StatusCode {
        self.response.status()
    }

    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> T {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        serde_json::from_slice(&buf).unwrap()
    }
}

impl From<Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>> for APIResponse {
    fn from(response: Response<UnsyncBoxBody<hyper::body::Bytes, axum::Error>>) -> Self {
        Self {
            response,
        }
    }
}

impl Fixture {
    pub async fn new(options: FixtureOptions) -> Self {
        let state = AppState::new_test_app().await;

        if options.mock_default_environment {
            mock::make_mock_environment(&state.db, MockOption {
                deterministic_uuids: true,
                ..Default::default()
            }).await.unwrap();
        }

        let app = golf_ref_server::app_with_state(state.clone()).await;

        Self {
            app,
            state,
            auth: Auth::None,
        }
    }

    #[allow(dead_code)]
    pub async fn default() -> Self {
        Self::new(FixtureOptions::default()).await
    }

    /// Issues a bearer key for one of the mock users and switches the
    /// fixture to it. The raw key is derived from the user id so keys stay
    /// distinct across logins.
    #[allow(dead_code)]
    pub async fn login_as(&mut self, user_id: u128) {
        let raw_key = user_id.to_be_bytes();
        let key = create_key(&raw_key, Uuid::from_u128(user_id)).unwrap();
        // The same user may log in twice in a test, the key row already
        // exists then.
        let _ = key.into_active_model().insert(&self.state.db).await;

        self.auth = Auth::Bearer {
            token: general_purpose::STANDARD_NO_PAD.encode(raw_key),
        };
    }

    fn get_base_request(&self) -> Builder {
        let builder = Request::builder();

        let builder = match &self.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => {
                builder.header(
                    "Authorization",
                    format!("Basic {}", general_purpose::STANDARD.encode(format!("{}:{}", username, password)))
                )
            },
            Auth::Bearer { token } => {
                builder.header(
                    "Authorization",
                    format!("Bearer {}", token)
                )
            }
        };

        builder
    }

    #[allow(dead_code)]
    pub async fn get(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn delete(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn post_json_no_body(&mut self, path: &str) -> APIResponse
    {
        let request = self.get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn post_json<T>(&mut self, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        let request = self.get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(
                Body::from(
                    serde_json::to_string(&body).unwrap()
                )
            )
            .unwrap();
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }
}
