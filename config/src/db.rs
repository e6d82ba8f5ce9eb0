use serde::Deserialize;

use self::sqlite::DbSqliteConfig;

pub mod sqlite;

#[derive(Deserialize)]
pub struct DbConfig {
    sqlite: DbSqliteConfig,
}

impl DbConfig {
    pub fn sqlite(&self) -> &DbSqliteConfig {
        &self.sqlite
    }
}
