use crate::config::ShelterConfig;
use crate::db::models::{Dog, DogId, NewDog};
use crate::db::schema::SQLITE_INIT;
use crate::error::ShelterError;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

const DOG_COLUMNS: &str = "id, name, picture";

/// The record store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct DogStorage {
    pool: SqlitePool,
}

impl DogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the pool and make sure the schema exists.
    pub async fn connect(cfg: &ShelterConfig) -> Result<Self, ShelterError> {
        let connect_opts =
            SqliteConnectOptions::from_str(&cfg.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.connect_timeout)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        info!(
            database_url = %cfg.database_url,
            max_connections = cfg.max_connections,
            "shelter storage ready"
        );
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ShelterError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Store a new dog and return it with its assigned id.
    pub async fn insert(&self, dog: NewDog) -> Result<Dog, ShelterError> {
        dog.validate()?;
        let stored = sqlx::query_as::<_, Dog>(&format!(
            "INSERT INTO dogs (name, picture) VALUES (?, ?) RETURNING {DOG_COLUMNS}"
        ))
        .bind(dog.name)
        .bind(dog.picture)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = stored.id, "dog inserted");
        Ok(stored)
    }

    /// The dog that has been in the shelter the longest.
    pub async fn find_oldest(&self) -> Result<Dog, ShelterError> {
        sqlx::query_as::<_, Dog>(&format!(
            "SELECT {DOG_COLUMNS} FROM dogs ORDER BY id LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ShelterError::NotFound("the shelter is empty".to_string()))
    }

    /// Remove one dog by id and return what was removed.
    pub async fn delete_by_id(&self, id: DogId) -> Result<Dog, ShelterError> {
        sqlx::query_as::<_, Dog>(&format!(
            "DELETE FROM dogs WHERE id = ? RETURNING {DOG_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ShelterError::NotFound(format!("no dog with id {id}")))
    }

    /// Find and remove the oldest dog in a single statement.
    ///
    /// Concurrent callers never receive the same record.
    pub async fn adopt_oldest(&self) -> Result<Dog, ShelterError> {
        sqlx::query_as::<_, Dog>(&format!(
            "DELETE FROM dogs WHERE id = (SELECT id FROM dogs ORDER BY id LIMIT 1) \
             RETURNING {DOG_COLUMNS}"
        ))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ShelterError::NotFound("no dogs available for adoption".to_string()))
    }

    pub async fn count(&self) -> Result<u64, ShelterError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dogs")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    /// Every stored dog in insertion order.
    ///
    /// The stream is single-use; call again to re-query.
    pub fn find_all(&self) -> BoxStream<'_, Result<Dog, ShelterError>> {
        sqlx::query_as::<_, Dog>("SELECT id, name, picture FROM dogs ORDER BY id")
            .fetch(&self.pool)
            .map_err(ShelterError::from)
            .boxed()
    }

    /// Empty the shelter. Returns how many records were removed.
    pub async fn delete_all(&self) -> Result<u64, ShelterError> {
        let res = sqlx::query("DELETE FROM dogs").execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
