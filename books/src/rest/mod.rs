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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::{Author, Book, Title};
use axum::Router;
use bookshelf_core::rest::{RestError, RestResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod book_delete;
mod book_get;
mod book_put;
mod books_get;
mod books_post;
mod docs;
#[cfg(test)]
mod testutils;

/// Message sent to the server to create or update a book.
///
/// The fields are optional so that missing values can be reported with a precise error message
/// instead of a generic deserialization failure.  Any other fields are ignored.
#[derive(Default, Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct BookRequest {
    /// Title of the book.
    title: Option<String>,

    /// Author of the book.
    author: Option<String>,
}

impl BookRequest {
    /// Validates the contents of the request and returns the title and author it carries.
    fn into_parts(self) -> RestResult<(Title, Author)> {
        let title = match self.title {
            Some(title) => Title::new(title)?,
            None => return Err(RestError::InvalidRequest("Missing title".to_owned())),
        };
        let author = match self.author {
            Some(author) => Author::new(author)?,
            None => return Err(RestError::InvalidRequest("Missing author".to_owned())),
        };
        Ok((title, author))
    }
}

/// Response that carries a collection of books.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BooksResponse {
    /// All the books known by the server.
    books: Vec<Book>,
}

/// Response that carries a single book.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookResponse {
    /// The requested, created or updated book.
    book: Book,
}

/// Response that carries the contents of a book that was just deleted.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DeletedBookResponse {
    /// The book that was deleted.
    #[serde(rename = "book to delete")]
    book: Book,
}

/// Creates the router for the application, including its interactive documentation.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/books", get(books_get::handler).post(books_post::handler))
        .route(
            "/book/:id",
            get(book_get::handler).put(book_put::handler).delete(book_delete::handler),
        )
        .with_state(driver)
        .merge(docs::router())
}
