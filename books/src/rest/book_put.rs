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

//! API to update an existing book.

use crate::driver::Driver;
use crate::model::BookId;
use crate::rest::{BookRequest, BookResponse};
use axum::extract::{Path, State};
use axum::Json;
use bookshelf_core::rest::RestError;

/// Replaces the title and the author of a book.
#[utoipa::path(
    put,
    path = "/book/{id}",
    operation_id = "update_book",
    tag = "books",
    params(("id" = i64, Path, description = "Identifier of the book")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "The updated book", body = BookResponse),
        (status = 400, description = "The title or the author are missing or invalid"),
        (status = 404, description = "There is no book with the identifier"),
        (status = 415, description = "The payload is not JSON"),
        (status = 500, description = "The database failed"),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BookId>,
    Json(request): Json<BookRequest>,
) -> Result<Json<BookResponse>, RestError> {
    let (title, author) = request.into_parts()?;
    let book = driver.update_book(id, title, author).await?;
    Ok(Json(BookResponse { book }))
}
