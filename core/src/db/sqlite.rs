// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Connection management for SQLite databases.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use crate::env::get_optional_var;
use async_trait::async_trait;
use log::{debug, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use time::OffsetDateTime;

/// Database file used when none is configured.
const DEFAULT_PATH: &str = "books.db";

/// Path that selects a private database living in memory.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Classifies a raw `sqlx` error `e` into our own error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::RowNotFound => DbError::NotFound,
        sqlx::Error::ColumnDecode { index, source } => {
            DbError::DataIntegrityError(format!("Cannot decode column {}: {}", index, source))
        }
        e => DbError::BackendError(e.to_string()),
    }
}

/// Where to find the SQLite database.
#[derive(Debug, PartialEq)]
pub struct SqliteOptions {
    /// Path to the database file, created on first connection.  `:memory:` keeps the database in
    /// memory for the lifetime of the pool.
    pub path: String,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self { path: DEFAULT_PATH.to_owned() }
    }
}

impl SqliteOptions {
    /// Reads the options from the `<prefix>_PATH` environment variable, falling back to the
    /// defaults when it is not set.
    pub fn from_env(prefix: &str) -> Result<SqliteOptions, String> {
        match get_optional_var::<String>(prefix, "PATH")? {
            Some(path) => Ok(SqliteOptions { path }),
            None => Ok(SqliteOptions::default()),
        }
    }
}

/// Opens a connection pool against the database described by `opts`.
pub async fn connect(opts: SqliteOptions) -> DbResult<SqliteDb> {
    let options = if opts.path == IN_MEMORY_PATH {
        SqliteConnectOptions::from_str(IN_MEMORY_PATH).map_err(map_sqlx_error)?
    } else {
        SqliteConnectOptions::new().filename(&opts.path).create_if_missing(true)
    };
    debug!("Opening SQLite database at {}", opts.path);
    let pool = SqlitePool::connect_with(options).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A `Db` backed by an SQLite connection pool.
pub struct SqliteDb {
    /// Pool shared by all executors handed out by this database.
    pool: SqlitePool,
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("SQLite pool dropped while still open; call close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Pool(conn))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor::from(tx))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Runs the statements in `schema`, which may contain more than one, on `ex`.
pub async fn run_schema(ex: &mut Executor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(ex.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Converts `ts` to the microseconds since the epoch that we store in integer columns.
///
/// Anything below microsecond precision is discarded.
pub fn timestamp_to_micros(ts: OffsetDateTime) -> DbResult<i64> {
    i64::try_from(ts.unix_timestamp_nanos() / 1000)
        .map_err(|_| DbError::BackendError(format!("Timestamp {} does not fit in storage", ts)))
}

/// Converts `micros` since the epoch, as read from an integer column, back into a timestamp.
pub fn micros_to_timestamp(micros: i64) -> DbResult<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1000).map_err(|e| {
        DbError::DataIntegrityError(format!("Invalid stored timestamp {}: {}", micros, e))
    })
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Sets up logging and returns an empty database that lives in memory.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(SqliteOptions { path: IN_MEMORY_PATH.to_owned() }).await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::setup;
    use super::*;
    use sqlx::Row;
    use time::macros::datetime;

    /// Counts the rows in the `test` table.
    async fn count_rows(db: &SqliteDb) -> i64 {
        let mut ex = db.ex().await.unwrap();
        let row = sqlx::query("SELECT COUNT(*) AS count FROM test")
            .fetch_one(ex.conn())
            .await
            .unwrap();
        row.try_get("count").unwrap()
    }

    #[tokio::test]
    async fn test_direct_execution() {
        let db = setup().await;
        run_schema(&mut db.ex().await.unwrap(), "CREATE TABLE test (i INTEGER)").await.unwrap();

        sqlx::query("INSERT INTO test (i) VALUES (3)")
            .execute(db.ex().await.unwrap().conn())
            .await
            .unwrap();
        assert_eq!(1, count_rows(&db).await);

        db.close().await;
    }

    #[tokio::test]
    async fn test_tx_commit() {
        let db = setup().await;
        run_schema(&mut db.ex().await.unwrap(), "CREATE TABLE test (i INTEGER)").await.unwrap();

        let mut tx = db.begin().await.unwrap();
        sqlx::query("INSERT INTO test (i) VALUES (3), (4)")
            .execute(tx.ex().conn())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(2, count_rows(&db).await);
        db.close().await;
    }

    #[tokio::test]
    async fn test_tx_rollback_on_drop() {
        let db = setup().await;
        run_schema(&mut db.ex().await.unwrap(), "CREATE TABLE test (i INTEGER)").await.unwrap();

        {
            let mut tx = db.begin().await.unwrap();
            sqlx::query("INSERT INTO test (i) VALUES (3)")
                .execute(tx.ex().conn())
                .await
                .unwrap();
        }

        assert_eq!(0, count_rows(&db).await);
        db.close().await;
    }

    #[tokio::test]
    async fn test_run_schema_many_statements() {
        let db = setup().await;
        let schema = "CREATE TABLE test (i INTEGER); INSERT INTO test (i) VALUES (1);";
        run_schema(&mut db.ex().await.unwrap(), schema).await.unwrap();

        assert_eq!(1, count_rows(&db).await);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = std::env::temp_dir().join(format!("bookshelf-sqlite-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.db");
        let _ = std::fs::remove_file(&path);

        let db = connect(SqliteOptions { path: path.to_string_lossy().into_owned() })
            .await
            .unwrap();
        run_schema(&mut db.ex().await.unwrap(), "CREATE TABLE test (i INTEGER)").await.unwrap();
        db.close().await;

        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sqlite_options_from_env_default() {
        temp_env::with_var_unset("SQLITE_DEFAULT_PATH", || {
            assert_eq!(SqliteOptions::default(), SqliteOptions::from_env("SQLITE_DEFAULT").unwrap());
        });
    }

    #[test]
    fn test_sqlite_options_from_env_present() {
        temp_env::with_var("SQLITE_CUSTOM_PATH", Some("/tmp/other.db"), || {
            assert_eq!(
                SqliteOptions { path: "/tmp/other.db".to_owned() },
                SqliteOptions::from_env("SQLITE_CUSTOM").unwrap()
            );
        });
    }

    #[test]
    fn test_map_sqlx_error() {
        assert_eq!(DbError::NotFound, map_sqlx_error(sqlx::Error::RowNotFound));
        assert_eq!(
            DbError::BackendError("attempted to acquire a connection on a closed pool".to_owned()),
            map_sqlx_error(sqlx::Error::PoolClosed)
        );
    }

    #[test]
    fn test_timestamp_micros_conversions() {
        let ts = datetime!(2023-05-01 10:20:30.123456 UTC);
        let micros = timestamp_to_micros(ts).unwrap();
        assert_eq!(1_682_936_430_123_456, micros);
        assert_eq!(ts, micros_to_timestamp(micros).unwrap());
    }

    #[test]
    fn test_timestamp_micros_before_epoch() {
        let ts = datetime!(1969-12-31 23:59:59 UTC);
        assert_eq!(-1_000_000, timestamp_to_micros(ts).unwrap());
        assert_eq!(ts, micros_to_timestamp(-1_000_000).unwrap());
    }

    #[test]
    fn test_timestamp_to_micros_drops_nanos() {
        let ts = datetime!(2023-05-01 10:20:30.123456789 UTC);
        assert_eq!(
            datetime!(2023-05-01 10:20:30.123456 UTC),
            micros_to_timestamp(timestamp_to_micros(ts).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_micros_to_timestamp_out_of_range() {
        match micros_to_timestamp(i64::MAX) {
            Err(DbError::DataIntegrityError(_)) => (),
            e => panic!("Must have failed with a DataIntegrityError but got: {:?}", e),
        }
    }
}
