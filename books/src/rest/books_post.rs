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

//! API to create a new book.

use crate::driver::Driver;
use crate::rest::{BookRequest, BookResponse};
use axum::extract::State;
use axum::{http, Json};
use bookshelf_core::rest::RestError;

/// Creates a book.
#[utoipa::path(
    post,
    path = "/books",
    operation_id = "create_book",
    tag = "books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "The stored book", body = BookResponse),
        (status = 400, description = "The title or the author are missing or invalid"),
        (status = 415, description = "The payload is not JSON"),
        (status = 500, description = "The database failed"),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<BookRequest>,
) -> Result<(http::StatusCode, Json<BookResponse>), RestError> {
    let (title, author) = request.into_parts()?;
    let book = driver.create_book(title, author).await?;
    Ok((http::StatusCode::CREATED, Json(BookResponse { book })))
}
