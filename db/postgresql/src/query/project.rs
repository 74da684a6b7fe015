use anyhow::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{
    db::PostgresDb,
    model::{count::RelationCountModel, project::ProjectModel},
};

const INSERT: &str = "INSERT INTO \"projects\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" WHERE \"id\" = $1";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" ORDER BY \"is_completed\", CASE \"priority\" WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END, \"deadline\"";
const SELECT_MANY_BY_NAME: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" WHERE \"name\" ILIKE $1 ESCAPE '\\' ORDER BY \"is_completed\", CASE \"priority\" WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END, \"deadline\"";
const SELECT_MANY_BY_PROJECT_TYPE_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" WHERE \"project_type_id\" = $1 ORDER BY \"is_completed\", CASE \"priority\" WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END, \"deadline\"";
const SELECT_MANY_BY_TEAM_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" WHERE \"team_id\" = $1 ORDER BY \"is_completed\", CASE \"priority\" WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END, \"deadline\"";
const SELECT_MANY_ELIGIBLE_FOR_TEAM: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"deadline\", \"is_completed\", \"priority\", \"project_type_id\", \"team_id\" FROM \"projects\" WHERE \"team_id\" IS NULL OR \"team_id\" = $1 ORDER BY \"is_completed\", CASE \"priority\" WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END, \"deadline\"";
const UPDATE: &str = "UPDATE \"projects\" SET \"updated_at\" = $1, \"name\" = $2, \"description\" = $3, \"deadline\" = $4, \"is_completed\" = $5, \"priority\" = $6, \"project_type_id\" = $7, \"team_id\" = $8 WHERE \"id\" = $9";
const DELETE: &str = "DELETE FROM \"projects\" WHERE \"id\" = $1";
const COUNT: &str = "SELECT COUNT(*) FROM \"projects\"";
const COUNT_MANY_BY_PROJECT_TYPE: &str = "SELECT \"project_type_id\" AS \"id\", COUNT(*) AS \"count\" FROM \"projects\" GROUP BY \"project_type_id\"";
pub(crate) const DELETE_MANY_BY_PROJECT_TYPE_ID: &str =
    "DELETE FROM \"projects\" WHERE \"project_type_id\" = $1";
pub(crate) const CLEAR_TEAM: &str = "UPDATE \"projects\" SET \"team_id\" = NULL WHERE \"team_id\" = $1";
pub(crate) const SET_TEAM: &str = "UPDATE \"projects\" SET \"team_id\" = $1 WHERE \"id\" = $2";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    sd_log::info(Some("🔧"), "[PostgreSQL] Setting up projects table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"projects\" (\"id\" uuid, \"created_at\" timestamptz NOT NULL, \"updated_at\" timestamptz NOT NULL, \"name\" text NOT NULL, \"description\" text NOT NULL, \"deadline\" date NOT NULL, \"is_completed\" boolean NOT NULL DEFAULT FALSE, \"priority\" text NOT NULL, \"project_type_id\" uuid NOT NULL REFERENCES \"project_types\" (\"id\"), \"team_id\" uuid REFERENCES \"teams\" (\"id\"), PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_MANY),
        pool.prepare(SELECT_MANY_BY_NAME),
        pool.prepare(SELECT_MANY_BY_PROJECT_TYPE_ID),
        pool.prepare(SELECT_MANY_BY_TEAM_ID),
        pool.prepare(SELECT_MANY_ELIGIBLE_FOR_TEAM),
        pool.prepare(UPDATE),
        pool.prepare(DELETE),
        pool.prepare(COUNT),
        pool.prepare(COUNT_MANY_BY_PROJECT_TYPE),
        pool.prepare(DELETE_MANY_BY_PROJECT_TYPE_ID),
        pool.prepare(CLEAR_TEAM),
        pool.prepare(SET_TEAM),
    )?;

    Ok(())
}

impl PostgresDb {
    pub async fn insert_project(&self, value: &ProjectModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.deadline())
                .bind(value.is_completed())
                .bind(value.priority())
                .bind(value.project_type_id())
                .bind(value.team_id()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_project(&self, id: &Uuid) -> Result<Option<ProjectModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_projects(&self) -> Result<Vec<ProjectModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    /// `pattern` is an ILIKE pattern escaped with `\`.
    pub async fn select_many_projects_by_name(&self, pattern: &str) -> Result<Vec<ProjectModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_BY_NAME).bind(pattern))
            .await?)
    }

    pub async fn select_many_projects_by_project_type_id(
        &self,
        project_type_id: &Uuid,
    ) -> Result<Vec<ProjectModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_BY_PROJECT_TYPE_ID).bind(project_type_id))
            .await?)
    }

    pub async fn select_many_projects_by_team_id(
        &self,
        team_id: &Uuid,
    ) -> Result<Vec<ProjectModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_BY_TEAM_ID).bind(team_id))
            .await?)
    }

    /// Unassigned projects, plus those of `team_id` when given.
    pub async fn select_many_projects_eligible_for_team(
        &self,
        team_id: &Option<Uuid>,
    ) -> Result<Vec<ProjectModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_ELIGIBLE_FOR_TEAM).bind(team_id))
            .await?)
    }

    pub async fn count_projects(&self) -> Result<i64> {
        let (count,): (i64,) = self.fetch_one(sqlx::query_as(COUNT)).await?;
        Ok(count)
    }

    pub async fn count_many_projects_by_project_type(&self) -> Result<Vec<RelationCountModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(COUNT_MANY_BY_PROJECT_TYPE))
            .await?)
    }

    pub async fn update_project(&self, value: &ProjectModel) -> Result<()> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.deadline())
                .bind(value.is_completed())
                .bind(value.priority())
                .bind(value.project_type_id())
                .bind(value.team_id())
                .bind(value.id()),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<()> {
        self.execute(sqlx::query(DELETE).bind(id)).await?;
        Ok(())
    }
}
