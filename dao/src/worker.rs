use ahash::HashMap;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sd_db_postgresql::model::worker::WorkerModel as WorkerPostgresModel;
use sd_db_sqlite::model::worker::WorkerModel as WorkerSqliteModel;
use uuid::Uuid;

use crate::{count, search::WorkerSearch, util::pattern, Db};

pub struct WorkerDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    position_id: Option<Uuid>,
    team_id: Option<Uuid>,
}

impl WorkerDao {
    pub fn new(
        username: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        email: &Option<String>,
        position_id: &Option<Uuid>,
        team_id: &Option<Uuid>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.clone(),
            position_id: *position_id,
            team_id: *team_id,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Option<String> {
        &self.email
    }

    pub fn position_id(&self) -> &Option<Uuid> {
        &self.position_id
    }

    pub fn team_id(&self) -> &Option<Uuid> {
        &self.team_id
    }

    /// `"{first} {last} ({position})"`, or `"{first} {last}"` without a position.
    pub fn display_name(&self, position_name: Option<&str>) -> String {
        match position_name {
            Some(position_name) => {
                format!("{} {} ({position_name})", self.first_name, self.last_name)
            }
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_owned();
    }

    pub fn set_first_name(&mut self, first_name: &str) {
        self.first_name = first_name.to_owned();
    }

    pub fn set_last_name(&mut self, last_name: &str) {
        self.last_name = last_name.to_owned();
    }

    pub fn set_email(&mut self, email: &Option<String>) {
        self.email = email.clone();
    }

    pub fn set_position_id(&mut self, position_id: &Option<Uuid>) {
        self.position_id = *position_id;
    }

    pub fn set_team_id(&mut self, team_id: &Option<Uuid>) {
        self.team_id = *team_id;
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_worker(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_worker(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_worker(id)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_worker(id)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_by_username(db: &Db, username: &str) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_worker_by_username(username)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_worker_by_username(username)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_many_by_position_id(db: &Db, position_id: &Uuid) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_workers_by_position_id(position_id)
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_workers_by_position_id(position_id)
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_select_many_by_team_id(db: &Db, team_id: &Uuid) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_workers_by_team_id(team_id)
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_workers_by_team_id(team_id)
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    /// Non-admin workers matching the free-text `query`, ordered by username.
    pub async fn db_search(db: &Db, query: &str) -> Result<Vec<Self>> {
        match WorkerSearch::parse(query) {
            WorkerSearch::All => match db {
                Db::PostgresqlDb(db) => Ok(db
                    .select_many_non_admin_workers()
                    .await?
                    .iter()
                    .map(Self::from_postgresdb_model)
                    .collect()),
                Db::SqliteDb(db) => Ok(db
                    .select_many_non_admin_workers()
                    .await?
                    .iter()
                    .map(Self::from_sqlitedb_model)
                    .collect()),
            },
            WorkerSearch::Keyword(keyword) => {
                let keyword = pattern::contains(&keyword);
                match db {
                    Db::PostgresqlDb(db) => Ok(db
                        .select_many_non_admin_workers_by_keyword(&keyword)
                        .await?
                        .iter()
                        .map(Self::from_postgresdb_model)
                        .collect()),
                    Db::SqliteDb(db) => Ok(db
                        .select_many_non_admin_workers_by_keyword(&keyword)
                        .await?
                        .iter()
                        .map(Self::from_sqlitedb_model)
                        .collect()),
                }
            }
            WorkerSearch::NamePair {
                first,
                second,
                position,
            } => {
                let first = pattern::contains(&first);
                let second = pattern::contains(&second);
                let position = position.as_deref().map(pattern::contains);
                match db {
                    Db::PostgresqlDb(db) => Ok(db
                        .select_many_non_admin_workers_by_name_pair(&first, &second, &position)
                        .await?
                        .iter()
                        .map(Self::from_postgresdb_model)
                        .collect()),
                    Db::SqliteDb(db) => Ok(db
                        .select_many_non_admin_workers_by_name_pair(&first, &second, &position)
                        .await?
                        .iter()
                        .map(Self::from_sqlitedb_model)
                        .collect()),
                }
            }
            WorkerSearch::Nothing => Ok(Vec::new()),
        }
    }

    /// Non-admin workers without a team, plus the members of `team_id` when given.
    pub async fn db_select_many_eligible_for_team(
        db: &Db,
        team_id: &Option<Uuid>,
    ) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_workers_eligible_for_team(team_id)
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_workers_eligible_for_team(team_id)
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64> {
        match db {
            Db::PostgresqlDb(db) => db.count_workers().await,
            Db::SqliteDb(db) => db.count_workers().await,
        }
    }

    pub async fn db_count_many_by_position(db: &Db) -> Result<HashMap<Uuid, i64>> {
        match db {
            Db::PostgresqlDb(db) => Ok(count::postgresdb_counts(
                &db.count_many_workers_by_position().await?,
            )),
            Db::SqliteDb(db) => Ok(count::sqlitedb_counts(
                &db.count_many_workers_by_position().await?,
            )),
        }
    }

    pub async fn db_count_many_by_team(db: &Db) -> Result<HashMap<Uuid, i64>> {
        match db {
            Db::PostgresqlDb(db) => Ok(count::postgresdb_counts(
                &db.count_many_workers_by_team().await?,
            )),
            Db::SqliteDb(db) => Ok(count::sqlitedb_counts(
                &db.count_many_workers_by_team().await?,
            )),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::PostgresqlDb(db) => db.update_worker(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.update_worker(&self.to_sqlitedb_model()).await,
        }
    }

    /// A team led by the worker is left without a lead.
    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.delete_worker(id).await,
            Db::SqliteDb(db) => db.delete_worker(id).await,
        }
    }

    fn from_postgresdb_model(model: &WorkerPostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            username: model.username().to_owned(),
            password_hash: model.password_hash().to_owned(),
            first_name: model.first_name().to_owned(),
            last_name: model.last_name().to_owned(),
            email: model.email().clone(),
            position_id: *model.position_id(),
            team_id: *model.team_id(),
        }
    }

    fn to_postgresdb_model(&self) -> WorkerPostgresModel {
        WorkerPostgresModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.username,
            &self.password_hash,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.position_id,
            &self.team_id,
        )
    }

    fn from_sqlitedb_model(model: &WorkerSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            username: model.username().to_owned(),
            password_hash: model.password_hash().to_owned(),
            first_name: model.first_name().to_owned(),
            last_name: model.last_name().to_owned(),
            email: model.email().clone(),
            position_id: *model.position_id(),
            team_id: *model.team_id(),
        }
    }

    fn to_sqlitedb_model(&self) -> WorkerSqliteModel {
        WorkerSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.username,
            &self.password_hash,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.position_id,
            &self.team_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{position::PositionDao, testing, Db};

    use super::WorkerDao;

    async fn hire(db: &Db, username: &str, first: &str, last: &str, position: Option<Uuid>) {
        WorkerDao::new(username, "hash", first, last, &None, &position, &None)
            .db_insert(db)
            .await
            .unwrap();
    }

    async fn search(db: &Db, query: &str) -> Vec<String> {
        WorkerDao::db_search(db, query)
            .await
            .unwrap()
            .iter()
            .map(|w| w.username().to_owned())
            .collect()
    }

    async fn staff(db: &Db) {
        let admin = PositionDao::new("admin", &true);
        admin.db_insert(db).await.unwrap();
        let dev = PositionDao::new("Developer", &false);
        dev.db_insert(db).await.unwrap();
        let qa = PositionDao::new("QA", &false);
        qa.db_insert(db).await.unwrap();

        hire(db, "root", "Ann", "Root", Some(*admin.id())).await;
        hire(db, "asmith", "Ann", "Smith", Some(*dev.id())).await;
        hire(db, "bsmith", "Bob", "Smith", Some(*qa.id())).await;
        hire(db, "cjones", "Cara", "Jones", None).await;
        hire(db, "percent", "100%", "Done", None).await;
    }

    #[tokio::test]
    async fn empty_search_lists_non_admins() {
        let (_dir, db) = testing::sqlite_db().await;
        staff(&db).await;
        assert_eq!(
            search(&db, "  ").await,
            vec!["asmith", "bsmith", "cjones", "percent"]
        );
    }

    #[tokio::test]
    async fn keyword_matches_names_and_position() {
        let (_dir, db) = testing::sqlite_db().await;
        staff(&db).await;
        assert_eq!(search(&db, "smith").await, vec!["asmith", "bsmith"]);
        assert_eq!(search(&db, "develop").await, vec!["asmith"]);
        assert_eq!(search(&db, "ann").await, vec!["asmith"]);
    }

    #[tokio::test]
    async fn name_pair_matches_in_either_order() {
        let (_dir, db) = testing::sqlite_db().await;
        staff(&db).await;
        assert_eq!(search(&db, "Ann Smith").await, vec!["asmith"]);
        assert_eq!(search(&db, "Smith Ann").await, vec!["asmith"]);
        assert_eq!(search(&db, "Smith Bob QA").await, vec!["bsmith"]);
        assert!(search(&db, "Smith Bob Developer").await.is_empty());
    }

    #[tokio::test]
    async fn wildcards_match_literally_and_long_queries_match_nothing() {
        let (_dir, db) = testing::sqlite_db().await;
        staff(&db).await;
        assert_eq!(search(&db, "%").await, vec!["percent"]);
        assert!(search(&db, "_").await.is_empty());
        assert!(search(&db, "Ann Smith Developer extra").await.is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let (_dir, db) = testing::sqlite_db().await;
        let dev = PositionDao::new("Розробник", &false);
        dev.db_insert(&db).await.unwrap();
        hire(&db, "oleh", "Олег", "Петренко", Some(*dev.id())).await;
        hire(&db, "asmith", "Ann", "Smith", None).await;

        assert_eq!(search(&db, "олег").await, vec!["oleh"]);
        assert_eq!(search(&db, "петренко олег").await, vec!["oleh"]);
        assert_eq!(search(&db, "ПЕТРЕНКО Олег").await, vec!["oleh"]);
        assert_eq!(search(&db, "розробник").await, vec!["oleh"]);
        assert_eq!(search(&db, "ANN").await, vec!["asmith"]);
    }

    #[test]
    fn display_name_includes_position_when_present() {
        let worker = WorkerDao::new("asmith", "hash", "Ann", "Smith", &None, &None, &None);
        assert_eq!(worker.display_name(Some("Developer")), "Ann Smith (Developer)");
        assert_eq!(worker.display_name(None), "Ann Smith");
    }
}
