use migration::MigratorTrait;
use golf_ref_entities::mock;
use sea_orm::{prelude::*, Database, Statement};

pub async fn set_up_db(with_mock_env: bool) -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await.unwrap();
    let _r = db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON;",
        vec![])
    ).await?;

    if with_mock_env {
        mock::make_mock_environment(&db, mock::MockOption { deterministic_uuids: true, ..Default::default() }).await?;
    }
    Ok(db)
}
