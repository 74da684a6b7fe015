use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    db::SqliteDb,
    model::{count::RelationCountModel, worker::WorkerModel},
    query::team,
};

const INSERT: &str = "INSERT INTO \"workers\" (\"id\", \"created_at\", \"updated_at\", \"username\", \"password_hash\", \"first_name\", \"last_name\", \"email\", \"position_id\", \"team_id\", \"first_name_folded\", \"last_name_folded\") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"username\", \"password_hash\", \"first_name\", \"last_name\", \"email\", \"position_id\", \"team_id\" FROM \"workers\" WHERE \"id\" = ?";
const SELECT_BY_USERNAME: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"username\", \"password_hash\", \"first_name\", \"last_name\", \"email\", \"position_id\", \"team_id\" FROM \"workers\" WHERE \"username\" = ?";
const SELECT_MANY_BY_POSITION_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"username\", \"password_hash\", \"first_name\", \"last_name\", \"email\", \"position_id\", \"team_id\" FROM \"workers\" WHERE \"position_id\" = ? ORDER BY \"username\"";
const SELECT_MANY_BY_TEAM_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"username\", \"password_hash\", \"first_name\", \"last_name\", \"email\", \"position_id\", \"team_id\" FROM \"workers\" WHERE \"team_id\" = ? ORDER BY \"username\"";
const SELECT_MANY_NON_ADMIN: &str = "SELECT w.\"id\", w.\"created_at\", w.\"updated_at\", w.\"username\", w.\"password_hash\", w.\"first_name\", w.\"last_name\", w.\"email\", w.\"position_id\", w.\"team_id\" FROM \"workers\" w LEFT JOIN \"positions\" p ON p.\"id\" = w.\"position_id\" WHERE NOT COALESCE(p.\"is_admin\", FALSE) ORDER BY w.\"username\"";
const SELECT_MANY_NON_ADMIN_BY_KEYWORD: &str = "SELECT w.\"id\", w.\"created_at\", w.\"updated_at\", w.\"username\", w.\"password_hash\", w.\"first_name\", w.\"last_name\", w.\"email\", w.\"position_id\", w.\"team_id\" FROM \"workers\" w LEFT JOIN \"positions\" p ON p.\"id\" = w.\"position_id\" WHERE NOT COALESCE(p.\"is_admin\", FALSE) AND (w.\"first_name_folded\" LIKE ?1 ESCAPE '\\' OR w.\"last_name_folded\" LIKE ?1 ESCAPE '\\' OR p.\"name_folded\" LIKE ?1 ESCAPE '\\') ORDER BY w.\"username\"";
const SELECT_MANY_NON_ADMIN_BY_NAME_PAIR: &str = "SELECT w.\"id\", w.\"created_at\", w.\"updated_at\", w.\"username\", w.\"password_hash\", w.\"first_name\", w.\"last_name\", w.\"email\", w.\"position_id\", w.\"team_id\" FROM \"workers\" w LEFT JOIN \"positions\" p ON p.\"id\" = w.\"position_id\" WHERE NOT COALESCE(p.\"is_admin\", FALSE) AND ((w.\"first_name_folded\" LIKE ?1 ESCAPE '\\' AND w.\"last_name_folded\" LIKE ?2 ESCAPE '\\') OR (w.\"first_name_folded\" LIKE ?2 ESCAPE '\\' AND w.\"last_name_folded\" LIKE ?1 ESCAPE '\\')) ORDER BY w.\"username\"";
const SELECT_MANY_NON_ADMIN_BY_NAME_PAIR_AND_POSITION: &str = "SELECT w.\"id\", w.\"created_at\", w.\"updated_at\", w.\"username\", w.\"password_hash\", w.\"first_name\", w.\"last_name\", w.\"email\", w.\"position_id\", w.\"team_id\" FROM \"workers\" w LEFT JOIN \"positions\" p ON p.\"id\" = w.\"position_id\" WHERE NOT COALESCE(p.\"is_admin\", FALSE) AND ((w.\"first_name_folded\" LIKE ?1 ESCAPE '\\' AND w.\"last_name_folded\" LIKE ?2 ESCAPE '\\') OR (w.\"first_name_folded\" LIKE ?2 ESCAPE '\\' AND w.\"last_name_folded\" LIKE ?1 ESCAPE '\\')) AND p.\"name_folded\" LIKE ?3 ESCAPE '\\' ORDER BY w.\"username\"";
const SELECT_MANY_ELIGIBLE_FOR_TEAM: &str = "SELECT w.\"id\", w.\"created_at\", w.\"updated_at\", w.\"username\", w.\"password_hash\", w.\"first_name\", w.\"last_name\", w.\"email\", w.\"position_id\", w.\"team_id\" FROM \"workers\" w LEFT JOIN \"positions\" p ON p.\"id\" = w.\"position_id\" WHERE NOT COALESCE(p.\"is_admin\", FALSE) AND (w.\"team_id\" IS NULL OR w.\"team_id\" = ?1) ORDER BY w.\"username\"";
const UPDATE: &str = "UPDATE \"workers\" SET \"updated_at\" = ?, \"username\" = ?, \"password_hash\" = ?, \"first_name\" = ?, \"last_name\" = ?, \"email\" = ?, \"position_id\" = ?, \"team_id\" = ?, \"first_name_folded\" = ?, \"last_name_folded\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"workers\" WHERE \"id\" = ?";
const COUNT: &str = "SELECT COUNT(*) FROM \"workers\"";
const COUNT_MANY_BY_POSITION: &str = "SELECT \"position_id\" AS \"id\", COUNT(*) AS \"count\" FROM \"workers\" WHERE \"position_id\" IS NOT NULL GROUP BY \"position_id\"";
const COUNT_MANY_BY_TEAM: &str = "SELECT \"team_id\" AS \"id\", COUNT(*) AS \"count\" FROM \"workers\" WHERE \"team_id\" IS NOT NULL GROUP BY \"team_id\"";
pub(crate) const CLEAR_POSITION: &str =
    "UPDATE \"workers\" SET \"position_id\" = NULL WHERE \"position_id\" = ?";
pub(crate) const CLEAR_TEAM: &str = "UPDATE \"workers\" SET \"team_id\" = NULL WHERE \"team_id\" = ?";
pub(crate) const SET_TEAM: &str = "UPDATE \"workers\" SET \"team_id\" = ? WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    sd_log::info(Some("🔧"), "[SQLite] Setting up workers table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"workers\" (\"id\" blob, \"created_at\" datetime NOT NULL, \"updated_at\" datetime NOT NULL, \"username\" text NOT NULL UNIQUE, \"password_hash\" text NOT NULL, \"first_name\" text NOT NULL, \"last_name\" text NOT NULL, \"email\" text, \"position_id\" blob REFERENCES \"positions\" (\"id\"), \"team_id\" blob REFERENCES \"teams\" (\"id\"), \"first_name_folded\" text NOT NULL, \"last_name_folded\" text NOT NULL, PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_BY_USERNAME),
        pool.prepare(SELECT_MANY_BY_POSITION_ID),
        pool.prepare(SELECT_MANY_BY_TEAM_ID),
        pool.prepare(SELECT_MANY_NON_ADMIN),
        pool.prepare(SELECT_MANY_NON_ADMIN_BY_KEYWORD),
        pool.prepare(SELECT_MANY_NON_ADMIN_BY_NAME_PAIR),
        pool.prepare(SELECT_MANY_NON_ADMIN_BY_NAME_PAIR_AND_POSITION),
        pool.prepare(SELECT_MANY_ELIGIBLE_FOR_TEAM),
        pool.prepare(UPDATE),
        pool.prepare(DELETE),
        pool.prepare(COUNT),
        pool.prepare(COUNT_MANY_BY_POSITION),
        pool.prepare(COUNT_MANY_BY_TEAM),
        pool.prepare(CLEAR_POSITION),
        pool.prepare(CLEAR_TEAM),
        pool.prepare(SET_TEAM),
    )?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_worker(&self, value: &WorkerModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.username())
                .bind(value.password_hash())
                .bind(value.first_name())
                .bind(value.last_name())
                .bind(value.email())
                .bind(value.position_id())
                .bind(value.team_id())
                .bind(value.first_name().to_lowercase())
                .bind(value.last_name().to_lowercase()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_worker(&self, id: &Uuid) -> Result<Option<WorkerModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_worker_by_username(&self, username: &str) -> Result<Option<WorkerModel>> {
        Ok(self
            .fetch_optional(sqlx::query_as(SELECT_BY_USERNAME).bind(username))
            .await?)
    }

    pub async fn select_many_workers_by_position_id(
        &self,
        position_id: &Uuid,
    ) -> Result<Vec<WorkerModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_BY_POSITION_ID).bind(position_id))
            .await?)
    }

    pub async fn select_many_workers_by_team_id(&self, team_id: &Uuid) -> Result<Vec<WorkerModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_BY_TEAM_ID).bind(team_id))
            .await?)
    }

    pub async fn select_many_non_admin_workers(&self) -> Result<Vec<WorkerModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY_NON_ADMIN)).await?)
    }

    /// `pattern` is a LIKE pattern escaped with `\`. Names are matched through
    /// their lowercased copies since SQLite's `LIKE` folds ASCII only.
    pub async fn select_many_non_admin_workers_by_keyword(
        &self,
        pattern: &str,
    ) -> Result<Vec<WorkerModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_NON_ADMIN_BY_KEYWORD).bind(pattern.to_lowercase()))
            .await?)
    }

    pub async fn select_many_non_admin_workers_by_name_pair(
        &self,
        first_pattern: &str,
        second_pattern: &str,
        position_pattern: &Option<String>,
    ) -> Result<Vec<WorkerModel>> {
        match position_pattern {
            Some(position_pattern) => Ok(self
                .fetch_all(
                    sqlx::query_as(SELECT_MANY_NON_ADMIN_BY_NAME_PAIR_AND_POSITION)
                        .bind(first_pattern.to_lowercase())
                        .bind(second_pattern.to_lowercase())
                        .bind(position_pattern.to_lowercase()),
                )
                .await?),
            None => Ok(self
                .fetch_all(
                    sqlx::query_as(SELECT_MANY_NON_ADMIN_BY_NAME_PAIR)
                        .bind(first_pattern.to_lowercase())
                        .bind(second_pattern.to_lowercase()),
                )
                .await?),
        }
    }

    /// Non-admin workers with no team, plus the members of `team_id` when given.
    pub async fn select_many_workers_eligible_for_team(
        &self,
        team_id: &Option<Uuid>,
    ) -> Result<Vec<WorkerModel>> {
        Ok(self
            .fetch_all(sqlx::query_as(SELECT_MANY_ELIGIBLE_FOR_TEAM).bind(team_id))
            .await?)
    }

    pub async fn count_workers(&self) -> Result<i64> {
        let (count,): (i64,) = self.fetch_one(sqlx::query_as(COUNT)).await?;
        Ok(count)
    }

    pub async fn count_many_workers_by_position(&self) -> Result<Vec<RelationCountModel>> {
        Ok(self.fetch_all(sqlx::query_as(COUNT_MANY_BY_POSITION)).await?)
    }

    pub async fn count_many_workers_by_team(&self) -> Result<Vec<RelationCountModel>> {
        Ok(self.fetch_all(sqlx::query_as(COUNT_MANY_BY_TEAM)).await?)
    }

    pub async fn update_worker(&self, value: &WorkerModel) -> Result<()> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.username())
                .bind(value.password_hash())
                .bind(value.first_name())
                .bind(value.last_name())
                .bind(value.email())
                .bind(value.position_id())
                .bind(value.team_id())
                .bind(value.first_name().to_lowercase())
                .bind(value.last_name().to_lowercase())
                .bind(value.id()),
        )
        .await?;
        Ok(())
    }

    /// A team led by the worker is left without a lead.
    pub async fn delete_worker(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.begin().await?;
        sqlx::query(team::CLEAR_TEAM_LEAD)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
