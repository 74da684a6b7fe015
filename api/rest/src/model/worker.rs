use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{position::PositionResJson, team::TeamSummaryResJson},
    validation::validate_required,
};

#[derive(Deserialize)]
pub struct WorkerReqPath {
    worker_id: Uuid,
}

impl WorkerReqPath {
    pub fn worker_id(&self) -> &Uuid {
        &self.worker_id
    }
}

#[derive(Deserialize)]
pub struct FindManyWorkerReqQuery {
    #[serde(default)]
    search: String,
}

impl FindManyWorkerReqQuery {
    pub fn search(&self) -> &str {
        &self.search
    }
}

#[derive(Deserialize, Validate)]
pub struct InsertOneWorkerReqJson {
    #[serde(default)]
    #[validate(
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        custom(function = "validate_required")
    )]
    username: String,
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    password1: String,
    #[serde(default)]
    #[validate(
        custom(function = "validate_required"),
        must_match(other = "password1", message = "The two password fields didn't match.")
    )]
    password2: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    email: Option<String>,
    position: Option<Uuid>,
    team: Option<Uuid>,
}

impl InsertOneWorkerReqJson {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password1(&self) -> &str {
        &self.password1
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

    pub fn position(&self) -> &Option<Uuid> {
        &self.position
    }

    pub fn team(&self) -> &Option<Uuid> {
        &self.team
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateOneWorkerReqJson {
    #[serde(default)]
    #[validate(
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        custom(function = "validate_required")
    )]
    username: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    email: Option<String>,
    position: Option<Uuid>,
    team: Option<Uuid>,
}

impl UpdateOneWorkerReqJson {
    pub fn username(&self) -> &str {
        &self.username
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

    pub fn position(&self) -> &Option<Uuid> {
        &self.position
    }

    pub fn team(&self) -> &Option<Uuid> {
        &self.team
    }
}

#[derive(Serialize)]
pub struct WorkerResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    username: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    display_name: String,
    position_id: Option<Uuid>,
    team_id: Option<Uuid>,
}

impl WorkerResJson {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &Option<String>,
        display_name: &str,
        position_id: &Option<Uuid>,
        team_id: &Option<Uuid>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            username: username.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.clone(),
            display_name: display_name.to_owned(),
            position_id: *position_id,
            team_id: *team_id,
        }
    }
}

/// A worker as referenced from teams, positions and eligibility pools.
#[derive(Serialize)]
pub struct WorkerSummaryResJson {
    id: Uuid,
    username: String,
    display_name: String,
}

impl WorkerSummaryResJson {
    pub fn new(id: &Uuid, username: &str, display_name: &str) -> Self {
        Self {
            id: *id,
            username: username.to_owned(),
            display_name: display_name.to_owned(),
        }
    }
}

#[derive(Serialize)]
pub struct WorkerDetailResJson {
    worker: WorkerResJson,
    position: Option<PositionResJson>,
    team: Option<TeamSummaryResJson>,
}

impl WorkerDetailResJson {
    pub fn new(
        worker: WorkerResJson,
        position: Option<PositionResJson>,
        team: Option<TeamSummaryResJson>,
    ) -> Self {
        Self {
            worker,
            position,
            team,
        }
    }
}
