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

//! API to list all books.

use crate::driver::Driver;
use crate::rest::BooksResponse;
use axum::extract::State;
use axum::Json;
use bookshelf_core::rest::{EmptyBody, RestError};

/// Lists all books.
#[utoipa::path(
    get,
    path = "/books",
    operation_id = "get_books",
    tag = "books",
    responses(
        (status = 200, description = "All books, sorted by identifier", body = BooksResponse),
        (status = 413, description = "The request carried a payload"),
        (status = 500, description = "The database failed"),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<Json<BooksResponse>, RestError> {
    let books = driver.get_books().await?;
    Ok(Json(BooksResponse { books }))
}
