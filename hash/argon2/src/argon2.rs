use anyhow::{Error, Result};
use argon2::{password_hash::SaltString, Algorithm, Argon2, Params, PasswordHasher, Version};
use sd_config::hash::{Argon2Algorithm, Argon2HashConfig, Argon2Version};

pub struct Argon2Hash {
    argon2: Argon2<'static>,
    salt: SaltString,
}

impl Argon2Hash {
    pub fn new(config: &Argon2HashConfig) -> Result<Self> {
        sd_log::info(Some("⚡"), "[Argon2Hash] Initializing component");

        let algorithm = match config.algorithm() {
            Argon2Algorithm::Argon2d => Algorithm::Argon2d,
            Argon2Algorithm::Argon2i => Algorithm::Argon2i,
            Argon2Algorithm::Argon2id => Algorithm::Argon2id,
        };

        let version = match config.version() {
            Argon2Version::V0x10 => Version::V0x10,
            Argon2Version::V0x13 => Version::V0x13,
        };

        let salt = SaltString::from_b64(config.salt())
            .map_err(|err| Error::msg(format!("Invalid argon2 salt: {err}")))?;

        Ok(Self {
            argon2: Argon2::new(algorithm, version, Params::DEFAULT),
            salt,
        })
    }

    /// Returns the PHC string stored in `workers.password_hash`.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        match self.argon2.hash_password(password.as_bytes(), &self.salt) {
            Ok(hash) => Ok(hash.to_string()),
            Err(err) => Err(Error::msg(format!("Failed to hash password: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    fn hasher() -> Argon2Hash {
        let config = sd_config::from_str(
            r#"
log: {}
hash:
  argon2:
    salt: c3RhZmZkZXNrc2FsdA
db: {}
api:
  rest:
    host: 127.0.0.1
    port: 8080
"#,
        )
        .unwrap();
        Argon2Hash::new(config.hash().argon2()).unwrap()
    }

    #[test]
    fn hashed_password_verifies() {
        let hasher = hasher();
        let hash = hasher.hash_password("some123password").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(Argon2::default()
            .verify_password(b"some123password", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"different_password", &parsed)
            .is_err());
    }

    #[test]
    fn fixed_salt_hashes_deterministically() {
        let hasher = hasher();
        assert_eq!(
            hasher.hash_password("secret").unwrap(),
            hasher.hash_password("secret").unwrap()
        );
    }

    #[test]
    fn invalid_salt_is_an_error() {
        let config = sd_config::from_str(
            r#"
log: {}
hash:
  argon2:
    salt: "!"
db: {}
api:
  rest:
    host: 127.0.0.1
    port: 8080
"#,
        )
        .unwrap();
        assert!(Argon2Hash::new(config.hash().argon2()).is_err());
    }
}
