use chrono::{DateTime, NaiveDate, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub struct ProjectModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    deadline: NaiveDate,
    is_completed: bool,
    priority: String,
    project_type_id: Uuid,
    team_id: Option<Uuid>,
}

impl ProjectModel {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        description: &str,
        deadline: &NaiveDate,
        is_completed: &bool,
        priority: &str,
        project_type_id: &Uuid,
        team_id: &Option<Uuid>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
            description: description.to_owned(),
            deadline: *deadline,
            is_completed: *is_completed,
            priority: priority.to_owned(),
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

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn project_type_id(&self) -> &Uuid {
        &self.project_type_id
    }

    pub fn team_id(&self) -> &Option<Uuid> {
        &self.team_id
    }
}
