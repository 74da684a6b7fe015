use chrono::{DateTime, NaiveDate, Utc};
use sd_dao::project::ProjectPriority;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{project_type::ProjectTypeResJson, team::TeamSummaryResJson},
    validation::validate_required,
};

#[derive(Deserialize)]
pub struct ProjectReqPath {
    project_id: Uuid,
}

impl ProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Deserialize)]
pub struct FindManyProjectReqQuery {
    #[serde(default)]
    name: String,
}

impl FindManyProjectReqQuery {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize, Validate)]
pub struct ProjectReqJson {
    #[serde(default)]
    #[validate(
        length(max = 255, message = "Ensure this value has at most 255 characters."),
        custom(function = "validate_required")
    )]
    name: String,
    #[serde(default)]
    description: String,
    deadline: Option<NaiveDate>,
    #[serde(default)]
    is_completed: bool,
    priority: Option<String>,
    project_type: Option<Uuid>,
    team: Option<Uuid>,
}

impl ProjectReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> &Option<NaiveDate> {
        &self.deadline
    }

    pub fn is_completed(&self) -> &bool {
        &self.is_completed
    }

    pub fn priority(&self) -> &Option<String> {
        &self.priority
    }

    pub fn project_type(&self) -> &Option<Uuid> {
        &self.project_type
    }

    pub fn team(&self) -> &Option<Uuid> {
        &self.team
    }
}

#[derive(Serialize)]
pub struct ProjectResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    deadline: NaiveDate,
    is_completed: bool,
    priority: ProjectPriority,
    priority_label: String,
    project_type_id: Uuid,
    team_id: Option<Uuid>,
}

impl ProjectResJson {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        description: &str,
        deadline: &NaiveDate,
        is_completed: &bool,
        priority: &ProjectPriority,
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
            priority: *priority,
            priority_label: priority.label().to_owned(),
            project_type_id: *project_type_id,
            team_id: *team_id,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectDetailResJson {
    project: ProjectResJson,
    project_type: Option<ProjectTypeResJson>,
    team: Option<TeamSummaryResJson>,
}

impl ProjectDetailResJson {
    pub fn new(
        project: ProjectResJson,
        project_type: Option<ProjectTypeResJson>,
        team: Option<TeamSummaryResJson>,
    ) -> Self {
        Self {
            project,
            project_type,
            team,
        }
    }
}

#[derive(Serialize)]
pub struct PriorityResJson {
    code: String,
    label: String,
    rank: u8,
}

impl PriorityResJson {
    pub fn new(code: &str, label: &str, rank: &u8) -> Self {
        Self {
            code: code.to_owned(),
            label: label.to_owned(),
            rank: *rank,
        }
    }
}
