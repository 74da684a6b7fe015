use anyhow::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{db::PostgresDb, model::project_type::ProjectTypeModel, query::project};

const INSERT: &str = "INSERT INTO \"project_types\" (\"id\", \"created_at\", \"updated_at\", \"name\") VALUES ($1, $2, $3, $4)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\" FROM \"project_types\" WHERE \"id\" = $1";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\" FROM \"project_types\" ORDER BY \"name\"";
const UPDATE: &str = "UPDATE \"project_types\" SET \"updated_at\" = $1, \"name\" = $2 WHERE \"id\" = $3";
const DELETE: &str = "DELETE FROM \"project_types\" WHERE \"id\" = $1";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    sd_log::info(Some("🔧"), "[PostgreSQL] Setting up project_types table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"project_types\" (\"id\" uuid, \"created_at\" timestamptz NOT NULL, \"updated_at\" timestamptz NOT NULL, \"name\" text NOT NULL, PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_MANY),
        pool.prepare(UPDATE),
        pool.prepare(DELETE),
    )?;

    Ok(())
}

impl PostgresDb {
    pub async fn insert_project_type(&self, value: &ProjectTypeModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_project_type(&self, id: &Uuid) -> Result<Option<ProjectTypeModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_project_types(&self) -> Result<Vec<ProjectTypeModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn update_project_type(&self, value: &ProjectTypeModel) -> Result<()> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.id()),
        )
        .await?;
        Ok(())
    }

    /// Projects of the type go with it.
    pub async fn delete_project_type(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.begin().await?;
        sqlx::query(project::DELETE_MANY_BY_PROJECT_TYPE_ID)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
