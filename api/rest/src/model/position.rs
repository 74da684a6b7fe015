use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::worker::WorkerSummaryResJson,
    validation::validate_name,
};

#[derive(Deserialize)]
pub struct PositionReqPath {
    position_id: Uuid,
}

impl PositionReqPath {
    pub fn position_id(&self) -> &Uuid {
        &self.position_id
    }
}

#[derive(Deserialize, Validate)]
pub struct PositionReqJson {
    #[serde(default)]
    #[validate(
        length(max = 255, message = "Ensure this value has at most 255 characters."),
        custom(function = "validate_name")
    )]
    name: String,
    #[serde(default)]
    is_admin: bool,
}

impl PositionReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_admin(&self) -> &bool {
        &self.is_admin
    }
}

#[derive(Serialize)]
pub struct PositionResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    is_admin: bool,
}

impl PositionResJson {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        is_admin: &bool,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
            is_admin: *is_admin,
        }
    }
}

#[derive(Serialize)]
pub struct PositionListItemResJson {
    id: Uuid,
    name: String,
    worker_count: i64,
}

impl PositionListItemResJson {
    pub fn new(id: &Uuid, name: &str, worker_count: &i64) -> Self {
        Self {
            id: *id,
            name: name.to_owned(),
            worker_count: *worker_count,
        }
    }
}

#[derive(Serialize)]
pub struct PositionDetailResJson {
    position: PositionResJson,
    workers: Vec<WorkerSummaryResJson>,
}

impl PositionDetailResJson {
    pub fn new(position: PositionResJson, workers: Vec<WorkerSummaryResJson>) -> Self {
        Self { position, workers }
    }
}
