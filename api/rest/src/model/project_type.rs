use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{model::project::ProjectResJson, validation::validate_name};

#[derive(Deserialize)]
pub struct ProjectTypeReqPath {
    project_type_id: Uuid,
}

impl ProjectTypeReqPath {
    pub fn project_type_id(&self) -> &Uuid {
        &self.project_type_id
    }
}

#[derive(Deserialize, Validate)]
pub struct ProjectTypeReqJson {
    #[serde(default)]
    #[validate(
        length(max = 255, message = "Ensure this value has at most 255 characters."),
        custom(function = "validate_name")
    )]
    name: String,
}

impl ProjectTypeReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Serialize)]
pub struct ProjectTypeResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
}

impl ProjectTypeResJson {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
        }
    }
}

#[derive(Serialize)]
pub struct ProjectTypeListItemResJson {
    id: Uuid,
    name: String,
    project_count: i64,
}

impl ProjectTypeListItemResJson {
    pub fn new(id: &Uuid, name: &str, project_count: &i64) -> Self {
        Self {
            id: *id,
            name: name.to_owned(),
            project_count: *project_count,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectTypeDetailResJson {
    project_type: ProjectTypeResJson,
    projects: Vec<ProjectResJson>,
}

impl ProjectTypeDetailResJson {
    pub fn new(project_type: ProjectTypeResJson, projects: Vec<ProjectResJson>) -> Self {
        Self {
            project_type,
            projects,
        }
    }
}
