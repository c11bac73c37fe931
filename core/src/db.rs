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

//! Access to the SQLite database that backs a service.
//!
//! Services write their queries as free functions that take an `Executor`.  The executor hides
//! whether the statements go straight to the connection pool or into an open transaction, so the
//! same query function serves both one-off reads and multi-statement updates.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnection};
use sqlx::Transaction;

pub mod sqlite;

/// Errors raised by the persistence layer.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DbError {
    /// The database failed in a way that the service cannot do anything about.
    #[error("Database error: {0}")]
    BackendError(String),

    /// A stored row cannot be turned back into domain types.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// The row being looked up does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<crate::model::ModelError> for DbError {
    fn from(e: crate::model::ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Target of the statements issued by the query functions.
pub enum Executor {
    /// A connection checked out from the pool.  Consecutive executors may not share it.
    Pool(PoolConnection<Sqlite>),

    /// An open transaction, rolled back on drop unless committed via `TxExecutor::commit`.
    Tx(Transaction<'static, Sqlite>),
}

impl Executor {
    /// Returns the connection to pass to `sqlx` queries.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            Executor::Pool(conn) => &mut **conn,
            Executor::Tx(tx) => &mut **tx,
        }
    }
}

/// An executor that is known to wrap a transaction.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Grants access to the executor of the transaction, which is short on purpose because
    /// call sites pass it to every query.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Makes all statements issued through this transaction permanent.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            Executor::Tx(tx) => tx.commit().await.map_err(sqlite::map_sqlx_error),
            Executor::Pool(_) => {
                unreachable!("TxExecutor instances are only built from transactions")
            }
        }
    }
}

impl From<Transaction<'static, Sqlite>> for TxExecutor {
    fn from(tx: Transaction<'static, Sqlite>) -> Self {
        Self(Executor::Tx(tx))
    }
}

/// Handle to a database that hands out executors.
#[async_trait]
pub trait Db {
    /// Checks out a connection for statements that need no transaction.
    async fn ex(&self) -> DbResult<Executor>;

    /// Opens a transaction.  Dropping it without calling `commit` discards its changes.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the pool, waiting for outstanding connections to be returned.
    async fn close(&self);
}
