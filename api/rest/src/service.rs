pub mod index;
pub mod info;
pub mod position;
pub mod project;
pub mod project_type;
pub mod root;
pub mod team;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use actix_web::{body::to_bytes, dev::ServiceResponse, web};
    use sd_dao::Db;
    use sd_db_sqlite::db::SqliteDb;
    use sd_hash_argon2::argon2::Argon2Hash;
    use tempfile::TempDir;

    use crate::context::{ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx};

    const CONFIG: &str = r#"
log: {}
hash:
  argon2:
    salt: c3RhZmZkZXNrc2FsdA
db: {}
api:
  rest:
    host: 127.0.0.1
    port: 0
"#;

    pub async fn ctx() -> (TempDir, web::Data<ApiRestCtx>) {
        let config = sd_config::from_str(CONFIG).unwrap();
        let argon2 = Argon2Hash::new(config.hash().argon2()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staffdesk.db");
        let db = SqliteDb::new(path.to_str().unwrap(), &1).await.unwrap();

        let ctx = ApiRestCtx::new(
            ApiRestHashCtx::new(argon2),
            ApiRestDaoCtx::new(Arc::new(Db::SqliteDb(db))),
        );
        (dir, web::Data::new(ctx))
    }

    pub async fn body(res: ServiceResponse) -> serde_json::Value {
        serde_json::from_slice(&to_bytes(res.into_body()).await.unwrap()).unwrap()
    }

    pub fn location(res: &ServiceResponse) -> String {
        res.headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }
}
