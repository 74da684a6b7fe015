use std::fs::File;

use anyhow::{Context, Result};
use api::ApiConfig;
use db::DbConfig;
use hash::HashConfig;
use log::LogConfig;
use serde::Deserialize;

pub mod api;
pub mod db;
pub mod hash;
pub mod log;

#[derive(Deserialize)]
pub struct Config {
    log: LogConfig,
    hash: HashConfig,
    db: DbConfig,
    api: ApiConfig,
}

impl Config {
    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn hash(&self) -> &HashConfig {
        &self.hash
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

pub fn from_path(path: &str) -> Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open config file {path}"))?;
    serde_yaml::from_reader(file).with_context(|| format!("Failed to parse config file {path}"))
}

pub fn from_str(yaml: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Argon2Algorithm, Argon2Version};

    const SQLITE_CONFIG: &str = r#"
log:
  level_filter: debug
hash:
  argon2:
    salt: c3RhZmZkZXNrc2FsdA
db:
  sqlite:
    path: staffdesk.db
api:
  rest:
    host: 127.0.0.1
    port: 8080
"#;

    #[test]
    fn parses_sqlite_config_with_defaults() {
        let config = from_str(SQLITE_CONFIG).unwrap();

        assert!(*config.log().display_level());
        assert_eq!(config.log().level_filter(), "debug");
        assert_eq!(
            *config.hash().argon2().algorithm(),
            Argon2Algorithm::Argon2id
        );
        assert_eq!(*config.hash().argon2().version(), Argon2Version::V0x13);

        let sqlite = config.db().sqlite().as_ref().unwrap();
        assert_eq!(sqlite.path(), "staffdesk.db");
        assert_eq!(*sqlite.max_connections(), 5);
        assert!(config.db().postgres().is_none());

        assert_eq!(config.api().rest().host(), "127.0.0.1");
        assert_eq!(*config.api().rest().port(), 8080);
        assert!(config.api().rest().allowed_origin().is_none());
    }

    #[test]
    fn parses_postgres_config() {
        let config = from_str(
            r#"
log:
  display_level: false
  level_filter: warn
hash:
  argon2:
    algorithm: Argon2i
    version: V0x10
    salt: c3RhZmZkZXNrc2FsdA
db:
  postgres:
    user: staff
    password: secret
    host: localhost
    port: 5432
    db_name: staffdesk
    max_connections: 10
api:
  rest:
    host: 0.0.0.0
    port: 9000
    allowed_origin: http://localhost:3000
"#,
        )
        .unwrap();

        assert_eq!(*config.hash().argon2().algorithm(), Argon2Algorithm::Argon2i);
        let postgres = config.db().postgres().as_ref().unwrap();
        assert_eq!(postgres.db_name(), "staffdesk");
        assert_eq!(*postgres.port(), 5432);
        assert_eq!(
            config.api().rest().allowed_origin().as_deref(),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn rejects_config_without_api_section() {
        assert!(from_str("log: {}\n").is_err());
    }
}
