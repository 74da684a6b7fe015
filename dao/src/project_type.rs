use anyhow::Result;
use chrono::{DateTime, Utc};
use sd_db_postgresql::model::project_type::ProjectTypeModel as ProjectTypePostgresModel;
use sd_db_sqlite::model::project_type::ProjectTypeModel as ProjectTypeSqliteModel;
use uuid::Uuid;

use crate::Db;

pub struct ProjectTypeDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
}

impl ProjectTypeDao {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
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

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_project_type(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_project_type(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_project_type(id)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_project_type(id)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_project_types()
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_project_types()
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::PostgresqlDb(db) => db.update_project_type(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.update_project_type(&self.to_sqlitedb_model()).await,
        }
    }

    /// Projects of this type are deleted with it.
    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.delete_project_type(id).await,
            Db::SqliteDb(db) => db.delete_project_type(id).await,
        }
    }

    fn from_postgresdb_model(model: &ProjectTypePostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
        }
    }

    fn to_postgresdb_model(&self) -> ProjectTypePostgresModel {
        ProjectTypePostgresModel::new(&self.id, &self.created_at, &self.updated_at, &self.name)
    }

    fn from_sqlitedb_model(model: &ProjectTypeSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> ProjectTypeSqliteModel {
        ProjectTypeSqliteModel::new(&self.id, &self.created_at, &self.updated_at, &self.name)
    }
}
