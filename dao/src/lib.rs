use lb_db_sqlite::db::SqliteDb;

pub mod client;
pub mod contact;
pub mod newsletter;
pub mod project;

pub enum Db {
    SqliteDb(SqliteDb),
}
