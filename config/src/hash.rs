use serde::Deserialize;

#[derive(Deserialize)]
pub struct HashConfig {
    argon2: Argon2HashConfig,
}

impl HashConfig {
    pub fn argon2(&self) -> &Argon2HashConfig {
        &self.argon2
    }
}

#[derive(Deserialize)]
pub struct Argon2HashConfig {
    #[serde(default)]
    algorithm: Argon2Algorithm,
    #[serde(default)]
    version: Argon2Version,
    salt: String,
}

impl Argon2HashConfig {
    pub fn algorithm(&self) -> &Argon2Algorithm {
        &self.algorithm
    }

    pub fn version(&self) -> &Argon2Version {
        &self.version
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Argon2Algorithm {
    Argon2d,
    Argon2i,
    #[default]
    Argon2id,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Argon2Version {
    V0x10,
    #[default]
    V0x13,
}
