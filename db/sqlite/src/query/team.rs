use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite, Transaction};
use uuid::Uuid;

use crate::{
    db::SqliteDb,
    model::team::TeamModel,
    query::{project, worker},
};

const INSERT: &str = "INSERT INTO \"teams\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"team_lead_id\") VALUES (?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"team_lead_id\" FROM \"teams\" WHERE \"id\" = ?";
const SELECT_BY_TEAM_LEAD_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"team_lead_id\" FROM \"teams\" WHERE \"team_lead_id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"team_lead_id\" FROM \"teams\" ORDER BY \"name\"";
const UPDATE: &str = "UPDATE \"teams\" SET \"updated_at\" = ?, \"name\" = ?, \"team_lead_id\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"teams\" WHERE \"id\" = ?";
const COUNT: &str = "SELECT COUNT(*) FROM \"teams\"";
pub(crate) const CLEAR_TEAM_LEAD: &str =
    "UPDATE \"teams\" SET \"team_lead_id\" = NULL WHERE \"team_lead_id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    sd_log::info(Some("🔧"), "[SQLite] Setting up teams table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"teams\" (\"id\" blob, \"created_at\" datetime NOT NULL, \"updated_at\" datetime NOT NULL, \"name\" text NOT NULL, \"team_lead_id\" blob UNIQUE, PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_BY_TEAM_LEAD_ID),
        pool.prepare(SELECT_MANY),
        pool.prepare(UPDATE),
        pool.prepare(DELETE),
        pool.prepare(COUNT),
        pool.prepare(CLEAR_TEAM_LEAD),
    )?;

    Ok(())
}

impl SqliteDb {
    /// Inserts the team and links `member_ids` and `project_ids` to it in one transaction.
    pub async fn insert_team(
        &self,
        value: &TeamModel,
        member_ids: &[Uuid],
        project_ids: &[Uuid],
    ) -> Result<()> {
        let mut tx = self.begin().await?;
        sqlx::query(INSERT)
            .bind(value.id())
            .bind(value.created_at())
            .bind(value.updated_at())
            .bind(value.name())
            .bind(value.team_lead_id())
            .execute(&mut *tx)
            .await?;
        Self::replace_team_membership(&mut tx, value.id(), member_ids, project_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn select_team(&self, id: &Uuid) -> Result<Option<TeamModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_team_by_team_lead_id(
        &self,
        team_lead_id: &Uuid,
    ) -> Result<Option<TeamModel>> {
        Ok(self
            .fetch_optional(sqlx::query_as(SELECT_BY_TEAM_LEAD_ID).bind(team_lead_id))
            .await?)
    }

    pub async fn select_many_teams(&self) -> Result<Vec<TeamModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn count_teams(&self) -> Result<i64> {
        let (count,): (i64,) = self.fetch_one(sqlx::query_as(COUNT)).await?;
        Ok(count)
    }

    /// Rewrites the team row and its whole membership; nothing is kept on failure.
    pub async fn update_team(
        &self,
        value: &TeamModel,
        member_ids: &[Uuid],
        project_ids: &[Uuid],
    ) -> Result<()> {
        let mut tx = self.begin().await?;
        Self::replace_team_membership(&mut tx, value.id(), member_ids, project_ids).await?;
        sqlx::query(UPDATE)
            .bind(value.updated_at())
            .bind(value.name())
            .bind(value.team_lead_id())
            .bind(value.id())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_team(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.begin().await?;
        Self::replace_team_membership(&mut tx, id, &[], &[]).await?;
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn replace_team_membership(
        tx: &mut Transaction<'_, Sqlite>,
        team_id: &Uuid,
        member_ids: &[Uuid],
        project_ids: &[Uuid],
    ) -> Result<()> {
        sqlx::query(worker::CLEAR_TEAM)
            .bind(team_id)
            .execute(&mut **tx)
            .await?;
        for member_id in member_ids {
            sqlx::query(worker::SET_TEAM)
                .bind(team_id)
                .bind(member_id)
                .execute(&mut **tx)
                .await?;
        }

        sqlx::query(project::CLEAR_TEAM)
            .bind(team_id)
            .execute(&mut **tx)
            .await?;
        for project_id in project_ids {
            sqlx::query(project::SET_TEAM)
                .bind(team_id)
                .bind(project_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
