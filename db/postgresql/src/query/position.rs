use anyhow::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{db::PostgresDb, model::position::PositionModel, query::worker};

const INSERT: &str = "INSERT INTO \"positions\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"is_admin\") VALUES ($1, $2, $3, $4, $5)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"is_admin\" FROM \"positions\" WHERE \"id\" = $1";
const SELECT_BY_NAME: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"is_admin\" FROM \"positions\" WHERE \"name\" = $1";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"is_admin\" FROM \"positions\" ORDER BY \"name\"";
const SELECT_MANY_NON_ADMIN: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"is_admin\" FROM \"positions\" WHERE NOT \"is_admin\" ORDER BY \"name\"";
const UPDATE: &str = "UPDATE \"positions\" SET \"updated_at\" = $1, \"name\" = $2, \"is_admin\" = $3 WHERE \"id\" = $4";
const DELETE: &str = "DELETE FROM \"positions\" WHERE \"id\" = $1";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    sd_log::info(Some("🔧"), "[PostgreSQL] Setting up positions table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"positions\" (\"id\" uuid, \"created_at\" timestamptz NOT NULL, \"updated_at\" timestamptz NOT NULL, \"name\" text NOT NULL UNIQUE, \"is_admin\" boolean NOT NULL DEFAULT FALSE, PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_BY_NAME),
        pool.prepare(SELECT_MANY),
        pool.prepare(SELECT_MANY_NON_ADMIN),
        pool.prepare(UPDATE),
        pool.prepare(DELETE),
    )?;

    Ok(())
}

impl PostgresDb {
    pub async fn insert_position(&self, value: &PositionModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.is_admin()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_position(&self, id: &Uuid) -> Result<Option<PositionModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_position_by_name(&self, name: &str) -> Result<Option<PositionModel>> {
        Ok(self
            .fetch_optional(sqlx::query_as(SELECT_BY_NAME).bind(name))
            .await?)
    }

    pub async fn select_many_positions(&self, include_admin: &bool) -> Result<Vec<PositionModel>> {
        let query = if *include_admin {
            SELECT_MANY
        } else {
            SELECT_MANY_NON_ADMIN
        };
        Ok(self.fetch_all(sqlx::query_as(query)).await?)
    }

    pub async fn update_position(&self, value: &PositionModel) -> Result<()> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.is_admin())
                .bind(value.id()),
        )
        .await?;
        Ok(())
    }

    /// Workers holding the position keep existing without one.
    pub async fn delete_position(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.begin().await?;
        sqlx::query(worker::CLEAR_POSITION)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
