use std::sync::Arc;
use axum::extract::FromRef;
use migration::MigratorTrait;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{self, DatabaseConfig};
use crate::notify::MailboxNotificationManager;
use sea_orm::{prelude::*, Statement};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifications: Arc<RwLock<MailboxNotificationManager>>,
}

impl AppState {
    pub async fn new() -> AppState {
        Self::new_with_config(&Config::default()).await
    }

    pub async fn new_with_config(config: &Config) -> AppState {
        let db = db::set_up_db(
            DatabaseConfig::new(config.db_url.clone())
        ).await.expect("Failed to set up database");
        Self::new_with_db(db, config.national_mailbox.clone()).await
    }

    pub async fn new_with_db(db: DatabaseConnection, national_mailbox: String) -> AppState {
        match &db {
            DatabaseConnection::SqlxSqlitePoolConnection(_) => {
                db.execute(Statement::from_sql_and_values(
                    db.get_database_backend(),
                    "PRAGMA foreign_keys = ON;",
                    vec![])
                ).await.expect("Failed to enable foreign keys");
            },
            _ => {}
        }
        migration::Migrator::up(&db, None).await.unwrap();
        AppState {
            db,
            notifications: Arc::new(RwLock::new(MailboxNotificationManager::new(national_mailbox))),
        }
    }

    pub async fn new_test_app() -> AppState {
        let db = db::set_up_db(
            DatabaseConfig::new("sqlite::memory:".into())
        ).await.expect("Failed to set up database");
        Self::new_with_db(db, Config::default().national_mailbox).await
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(app_state: &AppState) -> DatabaseConnection {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<RwLock<MailboxNotificationManager>> {
    fn from_ref(app_state: &AppState) -> Arc<RwLock<MailboxNotificationManager>> {
        app_state.notifications.clone()
    }
}
