//! Database module: the persisted shelter of dog records.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the insert payload
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `DogStorage`, the record store over a sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Dog, DogId, NewDog};
pub use schema::SQLITE_INIT;
pub use sqlite::{DogStorage, SqlitePool};
