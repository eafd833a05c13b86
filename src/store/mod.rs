//! SQLite-backed store of extracted features and their source images.
//!
//! One row per image name: the feature set as coordinate-pair text and the
//! grayscale image as PNG. Writes are a single `INSERT OR REPLACE`, so a
//! reader never sees a half-written record. The store is meant for one
//! process at a time; it holds a single connection and its own
//! current-thread runtime, and every method blocks.

mod schema;

use crate::features::codec::{decode_features, encode_features};
use crate::features::FeatureSet;
use crate::image::io::{decode_png, encode_png};
use crate::image::FingerprintImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{FingerMatchError, FingerMatchResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

/// Location of the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file; created on open if missing.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("fingerprint_database.db"),
        }
    }
}

/// A decoded stored fingerprint.
#[derive(Clone, Debug, PartialEq)]
pub struct FingerprintRecord {
    /// Assigned by the database; changes when the name is re-inserted.
    pub id: i64,
    pub name: String,
    pub features: FeatureSet,
    pub image: FingerprintImage,
}

/// A row as read from the database, before decoding.
#[derive(Clone, Debug)]
pub struct StoredRow {
    pub id: i64,
    pub name: String,
    pub minutiae: String,
    pub image: Vec<u8>,
}

impl StoredRow {
    /// Decodes the feature text and PNG bytes.
    ///
    /// Fails with `Decode` naming this row when either part is corrupt.
    pub fn decode(self) -> FingerMatchResult<FingerprintRecord> {
        let features = decode_features(&self.minutiae).map_err(|err| FingerMatchError::Decode {
            name: self.name.clone(),
            reason: err.to_string(),
        })?;
        let image = decode_png(&self.image).map_err(|reason| FingerMatchError::Decode {
            name: self.name.clone(),
            reason,
        })?;
        Ok(FingerprintRecord {
            id: self.id,
            name: self.name,
            features,
            image,
        })
    }
}

/// Handle to an open fingerprint database.
pub struct FeatureStore {
    runtime: Runtime,
    pool: SqlitePool,
    path: PathBuf,
}

impl FeatureStore {
    /// Opens (and creates if needed) the database file.
    ///
    /// The table itself is created by [`FeatureStore::ensure_schema`].
    pub fn open(config: &StoreConfig) -> FingerMatchResult<Self> {
        let _span = trace_span!("store_open").entered();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true);
        let pool = runtime.block_on(
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options),
        )?;
        trace_event!(
            "store_opened",
            path = config.database_path.display().to_string().as_str()
        );
        Ok(Self {
            runtime,
            pool,
            path: config.database_path.clone(),
        })
    }

    /// Database file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the fingerprint table if it does not exist yet.
    pub fn ensure_schema(&self) -> FingerMatchResult<()> {
        self.runtime
            .block_on(sqlx::query(schema::CREATE_TABLE).execute(&self.pool))?;
        Ok(())
    }

    /// Stores `features` and `image` under `name`, replacing any earlier record.
    pub fn put(
        &self,
        name: &str,
        features: &FeatureSet,
        image: &FingerprintImage,
    ) -> FingerMatchResult<()> {
        let _span = trace_span!("store_put", record = name).entered();
        let minutiae = encode_features(features)?;
        let blob = encode_png(image)?;
        self.runtime.block_on(
            sqlx::query(schema::UPSERT)
                .bind(name)
                .bind(minutiae)
                .bind(blob)
                .execute(&self.pool),
        )?;
        trace_event!("stored", minutiae = features.len());
        Ok(())
    }

    /// Reads every row without decoding, ordered by id.
    pub fn scan(&self) -> FingerMatchResult<Vec<StoredRow>> {
        let rows = self.runtime.block_on(
            sqlx::query_as::<_, (i64, String, String, Vec<u8>)>(schema::SELECT_ALL)
                .fetch_all(&self.pool),
        )?;
        Ok(rows
            .into_iter()
            .map(|(id, name, minutiae, image)| StoredRow {
                id,
                name,
                minutiae,
                image,
            })
            .collect())
    }

    /// Reads and decodes every record; the first corrupt row fails the call.
    pub fn get_all(&self) -> FingerMatchResult<Vec<FingerprintRecord>> {
        self.scan()?.into_iter().map(StoredRow::decode).collect()
    }

    /// Looks up a single record by name.
    pub fn get(&self, name: &str) -> FingerMatchResult<Option<FingerprintRecord>> {
        let row = self.runtime.block_on(
            sqlx::query_as::<_, (i64, String, String, Vec<u8>)>(schema::SELECT_BY_NAME)
                .bind(name)
                .fetch_optional(&self.pool),
        )?;
        row.map(|(id, name, minutiae, image)| {
            StoredRow {
                id,
                name,
                minutiae,
                image,
            }
            .decode()
        })
        .transpose()
    }

    /// Number of stored records.
    pub fn len(&self) -> FingerMatchResult<usize> {
        let count: i64 = self
            .runtime
            .block_on(sqlx::query_scalar(schema::COUNT).fetch_one(&self.pool))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn is_empty(&self) -> FingerMatchResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Closes the connection; dropping the store does the same.
    pub fn close(self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl Drop for FeatureStore {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}
