use anyhow::Result;
use chrono::{DateTime, Utc};
use sd_db_postgresql::model::team::TeamModel as TeamPostgresModel;
use sd_db_sqlite::model::team::TeamModel as TeamSqliteModel;
use uuid::Uuid;

use crate::Db;

pub struct TeamDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    team_lead_id: Option<Uuid>,
}

impl TeamDao {
    pub fn new(name: &str, team_lead_id: &Option<Uuid>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
            team_lead_id: *team_lead_id,
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_lead_id(&self) -> &Option<Uuid> {
        &self.team_lead_id
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_team_lead_id(&mut self, team_lead_id: &Option<Uuid>) {
        self.team_lead_id = *team_lead_id;
    }

    /// Inserts the team together with its members and projects.
    pub async fn db_insert(&self, db: &Db, member_ids: &[Uuid], project_ids: &[Uuid]) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => {
                db.insert_team(&self.to_postgresdb_model(), member_ids, project_ids)
                    .await
            }
            Db::SqliteDb(db) => {
                db.insert_team(&self.to_sqlitedb_model(), member_ids, project_ids)
                    .await
            }
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_team(id)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_team(id)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_by_team_lead_id(db: &Db, team_lead_id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_team_by_team_lead_id(team_lead_id)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_team_by_team_lead_id(team_lead_id)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_teams()
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_teams()
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64> {
        match db {
            Db::PostgresqlDb(db) => db.count_teams().await,
            Db::SqliteDb(db) => db.count_teams().await,
        }
    }

    /// Rewrites the team and replaces its whole membership in one transaction.
    pub async fn db_update(
        &mut self,
        db: &Db,
        member_ids: &[Uuid],
        project_ids: &[Uuid],
    ) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::PostgresqlDb(db) => {
                db.update_team(&self.to_postgresdb_model(), member_ids, project_ids)
                    .await
            }
            Db::SqliteDb(db) => {
                db.update_team(&self.to_sqlitedb_model(), member_ids, project_ids)
                    .await
            }
        }
    }

    /// Members and projects of the team are left unassigned.
    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.delete_team(id).await,
            Db::SqliteDb(db) => db.delete_team(id).await,
        }
    }

    fn from_postgresdb_model(model: &TeamPostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            team_lead_id: *model.team_lead_id(),
        }
    }

    fn to_postgresdb_model(&self) -> TeamPostgresModel {
        TeamPostgresModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.team_lead_id,
        )
    }

    fn from_sqlitedb_model(model: &TeamSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            team_lead_id: *model.team_lead_id(),
        }
    }

    fn to_sqlitedb_model(&self) -> TeamSqliteModel {
        TeamSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.team_lead_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{testing, worker::WorkerDao, Db};

    use super::TeamDao;

    async fn hire(db: &Db, username: &str) -> Uuid {
        let worker = WorkerDao::new(username, "hash", username, "Doe", &None, &None, &None);
        worker.db_insert(db).await.unwrap();
        *worker.id()
    }

    async fn member_ids(db: &Db, team_id: &Uuid) -> Vec<Uuid> {
        WorkerDao::db_select_many_by_team_id(db, team_id)
            .await
            .unwrap()
            .iter()
            .map(|w| *w.id())
            .collect()
    }

    #[tokio::test]
    async fn update_moves_membership() {
        let (_dir, db) = testing::sqlite_db().await;
        let ann = hire(&db, "ann").await;
        let ben = hire(&db, "ben").await;
        let cal = hire(&db, "cal").await;

        let mut team = TeamDao::new("Core", &Some(ann));
        team.db_insert(&db, &[ann, ben], &[]).await.unwrap();
        assert_eq!(member_ids(&db, team.id()).await, vec![ann, ben]);

        team.set_name("Platform");
        team.db_update(&db, &[ann, cal], &[]).await.unwrap();
        assert_eq!(member_ids(&db, team.id()).await, vec![ann, cal]);

        let ben_row = WorkerDao::db_select(&db, &ben).await.unwrap().unwrap();
        assert_eq!(ben_row.team_id(), &None);
        let stored = TeamDao::db_select(&db, team.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Platform");
    }

    #[tokio::test]
    async fn deleting_lead_leaves_team_without_lead() {
        let (_dir, db) = testing::sqlite_db().await;
        let ann = hire(&db, "ann").await;
        let team = TeamDao::new("Core", &Some(ann));
        team.db_insert(&db, &[], &[]).await.unwrap();

        assert!(TeamDao::db_select_by_team_lead_id(&db, &ann)
            .await
            .unwrap()
            .is_some());
        WorkerDao::db_delete(&db, &ann).await.unwrap();

        let stored = TeamDao::db_select(&db, team.id()).await.unwrap().unwrap();
        assert_eq!(stored.team_lead_id(), &None);
    }
}
