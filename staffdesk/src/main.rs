use std::sync::Arc;

use sd_api_rest::{
    context::{ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx},
    ApiRestServer,
};
use sd_dao::Db;
use sd_db_postgresql::db::PostgresDb;
use sd_db_sqlite::db::SqliteDb;
use sd_hash_argon2::argon2::Argon2Hash;
use tokio_util::sync::CancellationToken;

mod config_path;

#[tokio::main]
async fn main() {
    let config_path = config_path::get();
    let config = match sd_config::from_path(&config_path) {
        Ok(config) => config,
        Err(err) => sd_log::panic(None, format!("[StaffDesk] {err:#}")),
    };

    sd_log::init(config.log().display_level(), config.log().level_filter());

    sd_log::info(Some("🚀"), "[StaffDesk] Starting");

    let argon2_hash = match Argon2Hash::new(config.hash().argon2()) {
        Ok(hash) => hash,
        Err(err) => sd_log::panic(None, format!("[StaffDesk] Invalid hash configuration: {err}")),
    };

    let db = if let Some(postgres) = config.db().postgres() {
        match PostgresDb::new(
            postgres.user(),
            postgres.password(),
            postgres.host(),
            postgres.port(),
            postgres.db_name(),
            postgres.max_connections(),
        )
        .await
        {
            Ok(db) => Db::PostgresqlDb(db),
            Err(err) => sd_log::panic(None, format!("[StaffDesk] Connecting to PostgreSQL failed: {err}")),
        }
    } else if let Some(sqlite) = config.db().sqlite() {
        match SqliteDb::new(sqlite.path(), sqlite.max_connections()).await {
            Ok(db) => Db::SqliteDb(db),
            Err(err) => sd_log::panic(None, format!("[StaffDesk] Opening SQLite failed: {err}")),
        }
    } else {
        sd_log::panic(None, "[StaffDesk] No database configuration is specified")
    };

    let api_rest_server = ApiRestServer::new(
        config.api().rest().host(),
        config.api().rest().port(),
        config.api().rest().allowed_origin(),
        ApiRestCtx::new(
            ApiRestHashCtx::new(argon2_hash),
            ApiRestDaoCtx::new(Arc::new(db)),
        ),
    );

    let cancel_token = CancellationToken::new();

    match api_rest_server.run(cancel_token.clone()).await {
        Ok(_) => sd_log::info(Some("👋"), "[StaffDesk] Turned off"),
        Err(err) => sd_log::error(None, format!("[StaffDesk] Turned off with error: {err}")),
    }
}
