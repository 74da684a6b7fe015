use std::sync::Arc;

use sd_dao::Db;
use sd_hash_argon2::argon2::Argon2Hash;

pub struct ApiRestCtx {
    hash: ApiRestHashCtx,
    dao: ApiRestDaoCtx,
}

impl ApiRestCtx {
    pub fn new(hash: ApiRestHashCtx, dao: ApiRestDaoCtx) -> Self {
        Self { hash, dao }
    }

    pub fn hash(&self) -> &ApiRestHashCtx {
        &self.hash
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }
}

pub struct ApiRestHashCtx {
    argon2: Argon2Hash,
}

impl ApiRestHashCtx {
    pub fn new(argon2: Argon2Hash) -> Self {
        Self { argon2 }
    }

    pub fn argon2(&self) -> &Argon2Hash {
        &self.argon2
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}
