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

//! API to get a single book.

use crate::driver::Driver;
use crate::model::BookId;
use crate::rest::BookResponse;
use axum::extract::{Path, State};
use axum::Json;
use bookshelf_core::rest::{EmptyBody, RestError};

/// Gets a single book.
#[utoipa::path(
    get,
    path = "/book/{id}",
    operation_id = "get_book",
    tag = "books",
    params(("id" = i64, Path, description = "Identifier of the book")),
    responses(
        (status = 200, description = "The requested book", body = BookResponse),
        (status = 400, description = "The identifier is not an integer"),
        (status = 404, description = "There is no book with the identifier"),
        (status = 413, description = "The request carried a payload"),
        (status = 500, description = "The database failed"),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BookId>,
    _: EmptyBody,
) -> Result<Json<BookResponse>, RestError> {
    let book = driver.get_book(id).await?;
    Ok(Json(BookResponse { book }))
}
