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

//! Error types for the business logic layer.
//!
//! A service keeps its injected dependencies (database, clock) in its own `Driver` type.  Driver
//! operations take `self` by value: each one owns its executor or transaction from start to end,
//! and a caller that wants to chain two of them has to clone the driver explicitly.

use crate::db::DbError;
use crate::model::ModelError;

/// Errors returned by driver operations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// The storage failed; the caller cannot fix this by changing the request.
    #[error("{0}")]
    BackendError(String),

    /// The caller supplied data that does not pass validation.
    #[error("{0}")]
    InvalidInput(String),

    /// The entity the caller asked for does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<DbError> for DriverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound => DriverError::NotFound(e.to_string()),
            DbError::BackendError(_) | DbError::DataIntegrityError(_) => {
                DriverError::BackendError(e.to_string())
            }
        }
    }
}

impl From<ModelError> for DriverError {
    fn from(e: ModelError) -> Self {
        DriverError::InvalidInput(e.to_string())
    }
}

/// Result type for this module.
pub type DriverResult<T> = Result<T, DriverError>;
