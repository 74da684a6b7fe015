use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Number of rows referencing the entity `id`, e.g. workers per team.
#[derive(FromRow)]
pub struct RelationCountModel {
    id: Uuid,
    count: i64,
}

impl RelationCountModel {
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn count(&self) -> &i64 {
        &self.count
    }
}
