use ahash::HashMap;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sd_db_postgresql::model::project::ProjectModel as ProjectPostgresModel;
use sd_db_sqlite::model::project::ProjectModel as ProjectSqliteModel;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{count, util::pattern, Db};

pub struct ProjectDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    deadline: NaiveDate,
    is_completed: bool,
    priority: ProjectPriority,
    project_type_id: Uuid,
    team_id: Option<Uuid>,
}

impl ProjectDao {
    pub fn new(
        name: &str,
        description: &str,
        deadline: &NaiveDate,
        is_completed: &bool,
        priority: &ProjectPriority,
        project_type_id: &Uuid,
        team_id: &Option<Uuid>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
            description: description.to_owned(),
            deadline: *deadline,
            is_completed: *is_completed,
            priority: *priority,
            project_type_id: *project_type_id,
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> &NaiveDate {
        &self.deadline
    }

    pub fn is_completed(&self) -> &bool {
        &self.is_completed
    }

    pub fn priority(&self) -> &ProjectPriority {
        &self.priority
    }

    pub fn project_type_id(&self) -> &Uuid {
        &self.project_type_id
    }

    pub fn team_id(&self) -> &Option<Uuid> {
        &self.team_id
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
    }

    pub fn set_deadline(&mut self, deadline: &NaiveDate) {
        self.deadline = *deadline;
    }

    pub fn set_is_completed(&mut self, is_completed: &bool) {
        self.is_completed = *is_completed;
    }

    pub fn set_priority(&mut self, priority: &ProjectPriority) {
        self.priority = *priority;
    }

    pub fn set_project_type_id(&mut self, project_type_id: &Uuid) {
        self.project_type_id = *project_type_id;
    }

    pub fn set_team_id(&mut self, team_id: &Option<Uuid>) {
        self.team_id = *team_id;
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_project(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_project(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => match db.select_project(id).await? {
                Some(project) => Ok(Some(Self::from_postgresdb_model(&project)?)),
                None => Ok(None),
            },
            Db::SqliteDb(db) => match db.select_project(id).await? {
                Some(project) => Ok(Some(Self::from_sqlitedb_model(&project)?)),
                None => Ok(None),
            },
        }
    }

    /// Projects whose name contains `name` (case-insensitive); all projects
    /// when `name` is blank. Incomplete first, then by priority rank and deadline.
    pub async fn db_select_many_by_name(db: &Db, name: &str) -> Result<Vec<Self>> {
        let name = name.trim();
        match db {
            Db::PostgresqlDb(db) => {
                let projects = if name.is_empty() {
                    db.select_many_projects().await?
                } else {
                    db.select_many_projects_by_name(&pattern::contains(name))
                        .await?
                };
                Self::from_postgresdb_models(&projects)
            }
            Db::SqliteDb(db) => {
                let projects = if name.is_empty() {
                    db.select_many_projects().await?
                } else {
                    db.select_many_projects_by_name(&pattern::contains(name))
                        .await?
                };
                Self::from_sqlitedb_models(&projects)
            }
        }
    }

    pub async fn db_select_many_by_project_type_id(
        db: &Db,
        project_type_id: &Uuid,
    ) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Self::from_postgresdb_models(
                &db.select_many_projects_by_project_type_id(project_type_id)
                    .await?,
            ),
            Db::SqliteDb(db) => Self::from_sqlitedb_models(
                &db.select_many_projects_by_project_type_id(project_type_id)
                    .await?,
            ),
        }
    }

    pub async fn db_select_many_by_team_id(db: &Db, team_id: &Uuid) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => {
                Self::from_postgresdb_models(&db.select_many_projects_by_team_id(team_id).await?)
            }
            Db::SqliteDb(db) => {
                Self::from_sqlitedb_models(&db.select_many_projects_by_team_id(team_id).await?)
            }
        }
    }

    /// Projects without a team, plus those of `team_id` when given.
    pub async fn db_select_many_eligible_for_team(
        db: &Db,
        team_id: &Option<Uuid>,
    ) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Self::from_postgresdb_models(
                &db.select_many_projects_eligible_for_team(team_id).await?,
            ),
            Db::SqliteDb(db) => Self::from_sqlitedb_models(
                &db.select_many_projects_eligible_for_team(team_id).await?,
            ),
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64> {
        match db {
            Db::PostgresqlDb(db) => db.count_projects().await,
            Db::SqliteDb(db) => db.count_projects().await,
        }
    }

    pub async fn db_count_many_by_project_type(db: &Db) -> Result<HashMap<Uuid, i64>> {
        match db {
            Db::PostgresqlDb(db) => Ok(count::postgresdb_counts(
                &db.count_many_projects_by_project_type().await?,
            )),
            Db::SqliteDb(db) => Ok(count::sqlitedb_counts(
                &db.count_many_projects_by_project_type().await?,
            )),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::PostgresqlDb(db) => db.update_project(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.update_project(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.delete_project(id).await,
            Db::SqliteDb(db) => db.delete_project(id).await,
        }
    }

    fn from_postgresdb_models(models: &[ProjectPostgresModel]) -> Result<Vec<Self>> {
        let mut projects = Vec::with_capacity(models.len());
        for model in models {
            projects.push(Self::from_postgresdb_model(model)?);
        }
        Ok(projects)
    }

    fn from_postgresdb_model(model: &ProjectPostgresModel) -> Result<Self> {
        Ok(Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            description: model.description().to_owned(),
            deadline: *model.deadline(),
            is_completed: *model.is_completed(),
            priority: model.priority().parse()?,
            project_type_id: *model.project_type_id(),
            team_id: *model.team_id(),
        })
    }

    fn to_postgresdb_model(&self) -> ProjectPostgresModel {
        ProjectPostgresModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.description,
            &self.deadline,
            &self.is_completed,
            self.priority.to_str(),
            &self.project_type_id,
            &self.team_id,
        )
    }

    fn from_sqlitedb_models(models: &[ProjectSqliteModel]) -> Result<Vec<Self>> {
        let mut projects = Vec::with_capacity(models.len());
        for model in models {
            projects.push(Self::from_sqlitedb_model(model)?);
        }
        Ok(projects)
    }

    fn from_sqlitedb_model(model: &ProjectSqliteModel) -> Result<Self> {
        Ok(Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            description: model.description().to_owned(),
            deadline: *model.deadline(),
            is_completed: *model.is_completed(),
            priority: model.priority().parse()?,
            project_type_id: *model.project_type_id(),
            team_id: *model.team_id(),
        })
    }

    fn to_sqlitedb_model(&self) -> ProjectSqliteModel {
        ProjectSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.description,
            &self.deadline,
            &self.is_completed,
            self.priority.to_str(),
            &self.project_type_id,
            &self.team_id,
        )
    }
}

/// Declared from most to least urgent.
#[derive(
    Deserialize,
    Serialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Debug,
    Clone,
    Copy,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Backlog,
}

impl ProjectPriority {
    pub fn to_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Backlog => "Backlog",
        }
    }

    /// 0 is the most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Backlog => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, Utc};
    use strum::IntoEnumIterator;

    use crate::{project_type::ProjectTypeDao, testing, Db};

    use super::{ProjectDao, ProjectPriority};

    async fn add(db: &Db, name: &str, priority: ProjectPriority, days: u64, done: bool) {
        let project_type = ProjectTypeDao::new("Internal");
        project_type.db_insert(db).await.unwrap();
        let deadline = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(days))
            .unwrap();
        ProjectDao::new(
            name,
            "",
            &deadline,
            &done,
            &priority,
            project_type.id(),
            &None,
        )
        .db_insert(db)
        .await
        .unwrap();
    }

    async fn names(db: &Db, query: &str) -> Vec<String> {
        ProjectDao::db_select_many_by_name(db, query)
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_owned())
            .collect()
    }

    #[test]
    fn priorities_iterate_in_rank_order() {
        let ranks: Vec<u8> = ProjectPriority::iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
        assert_eq!(ProjectPriority::default(), ProjectPriority::Medium);
    }

    #[test]
    fn priority_codes_parse_back() {
        for priority in ProjectPriority::iter() {
            assert_eq!(priority.to_str().parse::<ProjectPriority>(), Ok(priority));
        }
        assert_eq!(ProjectPriority::Backlog.to_str(), "backlog");
        assert!("urgent".parse::<ProjectPriority>().is_err());
        assert!("High".parse::<ProjectPriority>().is_err());
    }

    #[tokio::test]
    async fn name_search_orders_and_filters() {
        let (_dir, db) = testing::sqlite_db().await;
        add(&db, "Website archive", ProjectPriority::Critical, 1, true).await;
        add(&db, "Website redesign", ProjectPriority::Low, 1, false).await;
        add(&db, "Billing", ProjectPriority::High, 9, false).await;
        add(&db, "Payroll", ProjectPriority::High, 2, false).await;

        assert_eq!(
            names(&db, "").await,
            vec!["Payroll", "Billing", "Website redesign", "Website archive"]
        );
        assert_eq!(
            names(&db, " website ").await,
            vec!["Website redesign", "Website archive"]
        );
        assert!(names(&db, "mobile").await.is_empty());
    }

    #[tokio::test]
    async fn name_search_folds_non_ascii_case() {
        let (_dir, db) = testing::sqlite_db().await;
        add(&db, "Проект Альфа", ProjectPriority::Medium, 3, false).await;
        add(&db, "Straße", ProjectPriority::Medium, 3, false).await;

        assert_eq!(names(&db, "альфа").await, vec!["Проект Альфа"]);
        assert_eq!(names(&db, "ПРОЕКТ").await, vec!["Проект Альфа"]);
        assert_eq!(names(&db, "STRAßE").await, vec!["Straße"]);
    }
}
