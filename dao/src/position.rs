use anyhow::Result;
use chrono::{DateTime, Utc};
use sd_db_postgresql::model::position::PositionModel as PositionPostgresModel;
use sd_db_sqlite::model::position::PositionModel as PositionSqliteModel;
use uuid::Uuid;

use crate::Db;

pub struct PositionDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    is_admin: bool,
}

impl PositionDao {
    pub fn new(name: &str, is_admin: &bool) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
            is_admin: *is_admin || Self::is_admin_name(name),
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

    pub fn is_admin(&self) -> &bool {
        &self.is_admin
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
        self.is_admin |= Self::is_admin_name(name);
    }

    pub fn set_is_admin(&mut self, is_admin: &bool) {
        self.is_admin = *is_admin || Self::is_admin_name(&self.name);
    }

    /// A position called "admin" in any case is always an admin position.
    fn is_admin_name(name: &str) -> bool {
        name.trim().eq_ignore_ascii_case("admin")
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_position(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_position(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_position(id)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_position(id)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_by_name(db: &Db, name: &str) -> Result<Option<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_position_by_name(name)
                .await?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_position_by_name(name)
                .await?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    /// Positions ordered by name; admin positions only when `include_admin`.
    pub async fn db_select_many(db: &Db, include_admin: &bool) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_positions(include_admin)
                .await?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_positions(include_admin)
                .await?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::PostgresqlDb(db) => db.update_position(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.update_position(&self.to_sqlitedb_model()).await,
        }
    }

    /// Workers holding the position are left without one.
    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.delete_position(id).await,
            Db::SqliteDb(db) => db.delete_position(id).await,
        }
    }

    fn from_postgresdb_model(model: &PositionPostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            is_admin: *model.is_admin() || Self::is_admin_name(model.name()),
        }
    }

    fn to_postgresdb_model(&self) -> PositionPostgresModel {
        PositionPostgresModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.is_admin,
        )
    }

    fn from_sqlitedb_model(model: &PositionSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            is_admin: *model.is_admin() || Self::is_admin_name(model.name()),
        }
    }

    fn to_sqlitedb_model(&self) -> PositionSqliteModel {
        PositionSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.is_admin,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::testing;

    use super::PositionDao;

    #[tokio::test]
    async fn listing_hides_admin_positions_unless_asked() {
        let (_dir, db) = testing::sqlite_db().await;
        PositionDao::new("admin", &true).db_insert(&db).await.unwrap();
        PositionDao::new("Developer", &false)
            .db_insert(&db)
            .await
            .unwrap();

        let visible = PositionDao::db_select_many(&db, &false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name(), "Developer");

        let all = PositionDao::db_select_many(&db, &true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn admin_name_implies_admin_flag() {
        assert!(*PositionDao::new("Admin", &false).is_admin());
        assert!(*PositionDao::new("ADMIN", &false).is_admin());
        assert!(!*PositionDao::new("Administrator", &false).is_admin());

        let mut position = PositionDao::new("Lead", &false);
        position.set_name("admin");
        assert!(*position.is_admin());
        position.set_is_admin(&false);
        assert!(*position.is_admin());

        position.set_name("Lead");
        position.set_is_admin(&false);
        assert!(!*position.is_admin());
    }

    #[tokio::test]
    async fn admin_named_position_is_hidden_from_listing() {
        let (_dir, db) = testing::sqlite_db().await;
        PositionDao::new("Admin", &false)
            .db_insert(&db)
            .await
            .unwrap();

        assert!(PositionDao::db_select_many(&db, &false)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn update_renames_position() {
        let (_dir, db) = testing::sqlite_db().await;
        let mut position = PositionDao::new("Tester", &false);
        position.db_insert(&db).await.unwrap();

        position.set_name("QA Engineer");
        position.db_update(&db).await.unwrap();

        let found = PositionDao::db_select_by_name(&db, "QA Engineer")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), position.id());
        assert!(PositionDao::db_select_by_name(&db, "Tester")
            .await
            .unwrap()
            .is_none());
    }
}
