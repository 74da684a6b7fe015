use anyhow::Result;
use uuid::Uuid;

use crate::{project::ProjectDao, worker::WorkerDao, Db};

pub const NO_AVAILABLE_WORKERS: &str = "No available workers";
pub const NO_AVAILABLE_PROJECTS: &str = "No available projects";

/// Workers and projects a team form may assign.
///
/// Workers are non-admins without a team; projects are those without a team.
/// When editing an existing team its own members and projects are included.
/// The team lead is drawn from the same worker pool as the members.
pub struct TeamPool {
    workers: Vec<WorkerDao>,
    projects: Vec<ProjectDao>,
}

impl TeamPool {
    pub async fn db_select(db: &Db, team_id: &Option<Uuid>) -> Result<Self> {
        let (workers, projects) = tokio::try_join!(
            WorkerDao::db_select_many_eligible_for_team(db, team_id),
            ProjectDao::db_select_many_eligible_for_team(db, team_id),
        )?;

        Ok(Self { workers, projects })
    }

    pub fn workers(&self) -> &[WorkerDao] {
        &self.workers
    }

    pub fn projects(&self) -> &[ProjectDao] {
        &self.projects
    }

    pub fn contains_worker(&self, id: &Uuid) -> bool {
        self.workers.iter().any(|worker| worker.id() == id)
    }

    pub fn contains_project(&self, id: &Uuid) -> bool {
        self.projects.iter().any(|project| project.id() == id)
    }

    /// Shown in place of the lead and member choices when nobody is assignable.
    pub fn workers_message(&self) -> Option<&'static str> {
        if self.workers.is_empty() {
            Some(NO_AVAILABLE_WORKERS)
        } else {
            None
        }
    }

    pub fn projects_message(&self) -> Option<&'static str> {
        if self.projects.is_empty() {
            Some(NO_AVAILABLE_PROJECTS)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::{
        position::PositionDao,
        project::{ProjectDao, ProjectPriority},
        project_type::ProjectTypeDao,
        team::TeamDao,
        testing,
        worker::WorkerDao,
        Db,
    };

    use super::{TeamPool, NO_AVAILABLE_PROJECTS, NO_AVAILABLE_WORKERS};

    async fn hire(db: &Db, username: &str, position_id: Option<Uuid>) -> Uuid {
        let worker = WorkerDao::new(username, "hash", username, "Doe", &None, &position_id, &None);
        worker.db_insert(db).await.unwrap();
        *worker.id()
    }

    async fn plan(db: &Db, project_type_id: &Uuid, name: &str) -> Uuid {
        let project = ProjectDao::new(
            name,
            "",
            &Utc::now().date_naive(),
            &false,
            &ProjectPriority::Medium,
            project_type_id,
            &None,
        );
        project.db_insert(db).await.unwrap();
        *project.id()
    }

    #[tokio::test]
    async fn empty_pools_report_messages() {
        let (_dir, db) = testing::sqlite_db().await;
        let pool = TeamPool::db_select(&db, &None).await.unwrap();
        assert_eq!(pool.workers_message(), Some(NO_AVAILABLE_WORKERS));
        assert_eq!(pool.projects_message(), Some(NO_AVAILABLE_PROJECTS));
    }

    #[tokio::test]
    async fn pools_exclude_admins_and_other_teams() {
        let (_dir, db) = testing::sqlite_db().await;
        let admin = PositionDao::new("admin", &true);
        admin.db_insert(&db).await.unwrap();
        let project_type = ProjectTypeDao::new("Internal");
        project_type.db_insert(&db).await.unwrap();

        let root = hire(&db, "root", Some(*admin.id())).await;
        let ann = hire(&db, "ann", None).await;
        let ben = hire(&db, "ben", None).await;
        let cal = hire(&db, "cal", None).await;
        let wiki = plan(&db, project_type.id(), "Wiki").await;
        let crm = plan(&db, project_type.id(), "CRM").await;
        let erp = plan(&db, project_type.id(), "ERP").await;

        let red = TeamDao::new("Red", &Some(ann));
        red.db_insert(&db, &[ann], &[wiki]).await.unwrap();
        let blue = TeamDao::new("Blue", &Some(ben));
        blue.db_insert(&db, &[ben], &[crm]).await.unwrap();

        let new_team = TeamPool::db_select(&db, &None).await.unwrap();
        assert!(new_team.contains_worker(&cal));
        assert!(!new_team.contains_worker(&root));
        assert!(!new_team.contains_worker(&ann));
        assert!(new_team.contains_project(&erp));
        assert!(!new_team.contains_project(&wiki));
        assert_eq!(new_team.workers_message(), None);

        let editing_red = TeamPool::db_select(&db, &Some(*red.id())).await.unwrap();
        assert!(editing_red.contains_worker(&ann));
        assert!(editing_red.contains_worker(&cal));
        assert!(!editing_red.contains_worker(&ben));
        assert!(!editing_red.contains_worker(&root));
        assert!(editing_red.contains_project(&wiki));
        assert!(editing_red.contains_project(&erp));
        assert!(!editing_red.contains_project(&crm));
    }

    #[tokio::test]
    async fn admin_named_position_is_excluded_from_pool() {
        let (_dir, db) = testing::sqlite_db().await;
        let admin = PositionDao::new("Admin", &false);
        admin.db_insert(&db).await.unwrap();

        let root = hire(&db, "root", Some(*admin.id())).await;
        let pool = TeamPool::db_select(&db, &None).await.unwrap();
        assert!(!pool.contains_worker(&root));
        assert_eq!(pool.workers_message(), Some(NO_AVAILABLE_WORKERS));
    }
}
