use sd_db_postgresql::db::PostgresDb;
use sd_db_sqlite::db::SqliteDb;

pub mod count;
pub mod eligibility;
pub mod position;
pub mod project;
pub mod project_type;
pub mod search;
pub mod team;
pub mod worker;
mod util;

pub enum Db {
    PostgresqlDb(PostgresDb),
    SqliteDb(SqliteDb),
}

#[cfg(test)]
pub(crate) mod testing {
    use sd_db_sqlite::db::SqliteDb;
    use tempfile::TempDir;

    use crate::Db;

    pub async fn sqlite_db() -> (TempDir, Db) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staffdesk.db");
        let db = SqliteDb::new(path.to_str().unwrap(), &1).await.unwrap();
        (dir, Db::SqliteDb(db))
    }
}
