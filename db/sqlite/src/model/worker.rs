use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub struct WorkerModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    position_id: Option<Uuid>,
    team_id: Option<Uuid>,
}

impl WorkerModel {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        username: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        email: &Option<String>,
        position_id: &Option<Uuid>,
        team_id: &Option<Uuid>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.clone(),
            position_id: *position_id,
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

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
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

    pub fn position_id(&self) -> &Option<Uuid> {
        &self.position_id
    }

    pub fn team_id(&self) -> &Option<Uuid> {
        &self.team_id
    }
}
