use anyhow::Result;
use sqlx::{
    query::{Query, QueryAs},
    sqlite::{SqliteArguments, SqlitePoolOptions, SqliteQueryResult, SqliteRow},
    Error, Pool, Sqlite, Transaction,
};

use crate::query::{position, project, project_type, team, worker};

pub struct SqliteDb {
    pool: Pool<Sqlite>,
}

impl SqliteDb {
    pub async fn new(path: &str, max_connections: &u32) -> Result<Self> {
        sd_log::info(Some("⚡"), "[SQLite] Initializing component");

        let url = format!("sqlite:{path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(*max_connections)
            .connect(&url)
            .await?;

        Self::init(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn execute<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteQueryResult, Error> {
        query.execute(&self.pool).await
    }

    pub async fn fetch_one<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<T, Error> {
        query.fetch_one(&self.pool).await
    }

    pub async fn fetch_optional<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Option<T>, Error> {
        query.fetch_optional(&self.pool).await
    }

    pub async fn fetch_all<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Vec<T>, Error> {
        query.fetch_all(&self.pool).await
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, Error> {
        self.pool.begin().await
    }

    // Referenced tables first: teams/workers/projects carry foreign keys.
    async fn init(pool: &Pool<Sqlite>) -> Result<()> {
        position::init(pool).await?;
        project_type::init(pool).await?;
        team::init(pool).await?;
        worker::init(pool).await?;
        project::init(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::model::{
        position::PositionModel, project::ProjectModel, project_type::ProjectTypeModel,
        team::TeamModel, worker::WorkerModel,
    };

    use super::SqliteDb;

    async fn open() -> (TempDir, SqliteDb) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staffdesk.db");
        let db = SqliteDb::new(path.to_str().unwrap(), &1).await.unwrap();
        (dir, db)
    }

    async fn position(db: &SqliteDb, name: &str, is_admin: bool) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        db.insert_position(&PositionModel::new(&id, &now, &now, name, &is_admin))
            .await
            .unwrap();
        id
    }

    async fn worker(db: &SqliteDb, username: &str, position_id: Option<Uuid>) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        db.insert_worker(&WorkerModel::new(
            &id,
            &now,
            &now,
            username,
            "hash",
            username,
            "Doe",
            &None,
            &position_id,
            &None,
        ))
        .await
        .unwrap();
        id
    }

    async fn project_type(db: &SqliteDb) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        db.insert_project_type(&ProjectTypeModel::new(&id, &now, &now, "Backend"))
            .await
            .unwrap();
        id
    }

    async fn project(
        db: &SqliteDb,
        name: &str,
        priority: &str,
        deadline: NaiveDate,
        is_completed: bool,
        project_type_id: &Uuid,
    ) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        db.insert_project(&ProjectModel::new(
            &id,
            &now,
            &now,
            name,
            "",
            &deadline,
            &is_completed,
            priority,
            project_type_id,
            &None,
        ))
        .await
        .unwrap();
        id
    }

    fn team(id: &Uuid, name: &str, team_lead_id: Option<Uuid>) -> TeamModel {
        let now = Utc::now();
        TeamModel::new(id, &now, &now, name, &team_lead_id)
    }

    #[tokio::test]
    async fn missing_row_selects_none() {
        let (_dir, db) = open().await;
        assert!(db.select_worker(&Uuid::now_v7()).await.unwrap().is_none());
        assert!(db.select_team(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn eligible_workers_exclude_admins_and_other_teams() {
        let (_dir, db) = open().await;
        let admin = position(&db, "admin", true).await;
        let dev = position(&db, "Developer", false).await;
        let root = worker(&db, "root", Some(admin)).await;
        let alice = worker(&db, "alice", Some(dev)).await;
        let bob = worker(&db, "bob", None).await;
        let carol = worker(&db, "carol", Some(dev)).await;

        let red = Uuid::now_v7();
        db.insert_team(&team(&red, "Red", Some(alice)), &[alice], &[])
            .await
            .unwrap();
        let blue = Uuid::now_v7();
        db.insert_team(&team(&blue, "Blue", Some(bob)), &[bob], &[])
            .await
            .unwrap();

        let for_new: Vec<Uuid> = db
            .select_many_workers_eligible_for_team(&None)
            .await
            .unwrap()
            .iter()
            .map(|w| *w.id())
            .collect();
        assert_eq!(for_new, vec![carol]);

        let for_red: Vec<Uuid> = db
            .select_many_workers_eligible_for_team(&Some(red))
            .await
            .unwrap()
            .iter()
            .map(|w| *w.id())
            .collect();
        assert_eq!(for_red, vec![alice, carol]);
        assert!(!for_red.contains(&root));
        assert!(!for_red.contains(&bob));
    }

    #[tokio::test]
    async fn failed_team_update_keeps_membership() {
        let (_dir, db) = open().await;
        let alice = worker(&db, "alice", None).await;
        let bob = worker(&db, "bob", None).await;
        let carol = worker(&db, "carol", None).await;

        let red = Uuid::now_v7();
        db.insert_team(&team(&red, "Red", Some(alice)), &[alice, carol], &[])
            .await
            .unwrap();
        let blue = Uuid::now_v7();
        db.insert_team(&team(&blue, "Blue", Some(bob)), &[bob], &[])
            .await
            .unwrap();

        // bob already leads Blue
        assert!(db
            .update_team(&team(&red, "Red", Some(bob)), &[alice], &[])
            .await
            .is_err());

        let members: Vec<Uuid> = db
            .select_many_workers_by_team_id(&red)
            .await
            .unwrap()
            .iter()
            .map(|w| *w.id())
            .collect();
        assert_eq!(members, vec![alice, carol]);
    }

    #[tokio::test]
    async fn projects_are_ordered_by_completion_priority_and_deadline() {
        let (_dir, db) = open().await;
        let project_type_id = project_type(&db).await;
        let today = Utc::now().date_naive();
        let later = today.checked_add_days(Days::new(7)).unwrap();

        let done = project(&db, "done", "critical", today, true, &project_type_id).await;
        let low = project(&db, "low", "low", today, false, &project_type_id).await;
        let high_late = project(&db, "high late", "high", later, false, &project_type_id).await;
        let high_soon = project(&db, "high soon", "high", today, false, &project_type_id).await;

        let ids: Vec<Uuid> = db
            .select_many_projects()
            .await
            .unwrap()
            .iter()
            .map(|p| *p.id())
            .collect();
        assert_eq!(ids, vec![high_soon, high_late, low, done]);

        let found = db.select_many_projects_by_name("%HIGH%").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn deletes_cascade_to_related_rows() {
        let (_dir, db) = open().await;
        let dev = position(&db, "Developer", false).await;
        let alice = worker(&db, "alice", Some(dev)).await;
        let project_type_id = project_type(&db).await;
        let today = Utc::now().date_naive();
        let website = project(&db, "website", "medium", today, false, &project_type_id).await;

        let red = Uuid::now_v7();
        db.insert_team(&team(&red, "Red", Some(alice)), &[alice], &[website])
            .await
            .unwrap();

        db.delete_position(&dev).await.unwrap();
        let alice_row = db.select_worker(&alice).await.unwrap().unwrap();
        assert_eq!(alice_row.position_id(), &None);

        db.delete_worker(&alice).await.unwrap();
        let red_row = db.select_team(&red).await.unwrap().unwrap();
        assert_eq!(red_row.team_lead_id(), &None);

        db.delete_team(&red).await.unwrap();
        let website_row = db.select_project(&website).await.unwrap().unwrap();
        assert_eq!(website_row.team_id(), &None);

        db.delete_project_type(&project_type_id).await.unwrap();
        assert!(db.select_project(&website).await.unwrap().is_none());
        assert_eq!(db.count_projects().await.unwrap(), 0);
    }
}
