use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{project::ProjectResJson, worker::WorkerSummaryResJson},
    validation::validate_name,
};

#[derive(Deserialize)]
pub struct TeamReqPath {
    team_id: Uuid,
}

impl TeamReqPath {
    pub fn team_id(&self) -> &Uuid {
        &self.team_id
    }
}

#[derive(Deserialize, Validate)]
pub struct TeamReqJson {
    #[serde(default)]
    #[validate(
        length(max = 255, message = "Ensure this value has at most 255 characters."),
        custom(function = "validate_name")
    )]
    name: String,
    team_lead: Option<Uuid>,
    #[serde(default)]
    members: Vec<Uuid>,
    #[serde(default)]
    projects: Vec<Uuid>,
}

impl TeamReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_lead(&self) -> &Option<Uuid> {
        &self.team_lead
    }

    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    pub fn projects(&self) -> &[Uuid] {
        &self.projects
    }
}

#[derive(Serialize)]
pub struct TeamListItemResJson {
    id: Uuid,
    name: String,
    team_lead: Option<WorkerSummaryResJson>,
    member_count: i64,
}

impl TeamListItemResJson {
    pub fn new(
        id: &Uuid,
        name: &str,
        team_lead: Option<WorkerSummaryResJson>,
        member_count: &i64,
    ) -> Self {
        Self {
            id: *id,
            name: name.to_owned(),
            team_lead,
            member_count: *member_count,
        }
    }
}

#[derive(Serialize)]
pub struct TeamDetailResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    team_lead: Option<WorkerSummaryResJson>,
    members: Vec<WorkerSummaryResJson>,
    projects: Vec<ProjectResJson>,
}

impl TeamDetailResJson {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        team_lead: Option<WorkerSummaryResJson>,
        members: Vec<WorkerSummaryResJson>,
        projects: Vec<ProjectResJson>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
            team_lead,
            members,
            projects,
        }
    }
}

#[derive(Serialize)]
pub struct TeamSummaryResJson {
    id: Uuid,
    name: String,
}

impl TeamSummaryResJson {
    pub fn new(id: &Uuid, name: &str) -> Self {
        Self {
            id: *id,
            name: name.to_owned(),
        }
    }
}

/// Choices for a team form. A `*_message` replaces the choice list when it is empty.
#[derive(Serialize)]
pub struct TeamFormResJson {
    workers: Vec<WorkerSummaryResJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workers_message: Option<String>,
    projects: Vec<ProjectResJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial: Option<TeamFormInitialResJson>,
}

impl TeamFormResJson {
    pub fn new(
        workers: Vec<WorkerSummaryResJson>,
        workers_message: &Option<&str>,
        projects: Vec<ProjectResJson>,
        projects_message: &Option<&str>,
        initial: Option<TeamFormInitialResJson>,
    ) -> Self {
        Self {
            workers,
            workers_message: workers_message.map(str::to_owned),
            projects,
            projects_message: projects_message.map(str::to_owned),
            initial,
        }
    }
}

/// Current values of the team being edited.
#[derive(Serialize)]
pub struct TeamFormInitialResJson {
    name: String,
    team_lead: Option<Uuid>,
    members: Vec<Uuid>,
    projects: Vec<Uuid>,
}

impl TeamFormInitialResJson {
    pub fn new(name: &str, team_lead: &Option<Uuid>, members: &[Uuid], projects: &[Uuid]) -> Self {
        Self {
            name: name.to_owned(),
            team_lead: *team_lead,
            members: members.to_vec(),
            projects: projects.to_vec(),
        }
    }
}
