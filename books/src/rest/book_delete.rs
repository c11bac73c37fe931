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

//! API to delete a book.

use crate::driver::Driver;
use crate::model::BookId;
use crate::rest::DeletedBookResponse;
use axum::extract::{Path, State};
use axum::Json;
use bookshelf_core::rest::{EmptyBody, RestError};

/// Deletes a book.
#[utoipa::path(
    delete,
    path = "/book/{id}",
    operation_id = "delete_book",
    tag = "books",
    params(("id" = i64, Path, description = "Identifier of the book")),
    responses(
        (status = 200, description = "The deleted book", body = DeletedBookResponse),
        (status = 404, description = "There is no book with the identifier"),
        (status = 413, description = "The request carried a payload"),
        (status = 500, description = "The database failed"),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BookId>,
    _: EmptyBody,
) -> Result<Json<DeletedBookResponse>, RestError> {
    let book = driver.delete_book(id).await?;
    Ok(Json(DeletedBookResponse { book }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use crate::rest::BookResponse;
    use axum::http;
    use bookshelf_core::db::DbError;
    use bookshelf_core::rest::testutils::*;
    use bookshelf_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/book/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let book = context.create_book("Dune", "Herbert").await;
        let other = context.create_book("Solaris", "Lem").await;

        let response = OneShotBuilder::new(context.app(), route(book.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(serde_json::json!({"book to delete": book}), response);

        assert_eq!(DbError::NotFound, context.get_book(*book.id()).await.unwrap_err());
        assert_eq!(vec![other], context.get_books().await);
    }

    #[tokio::test]
    async fn test_get_after_delete() {
        let context = TestContext::setup().await;

        let book = context.create_book("Dune", "Herbert").await;

        let response = OneShotBuilder::new(context.app(), route(book.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<DeletedBookResponse>()
            .await;
        assert_eq!(DeletedBookResponse { book: book.clone() }, response);

        OneShotBuilder::new(context.app(), (http::Method::GET, format!("/book/{}", book.id())))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;

        let book = context.create_book("Dune", "Herbert").await;

        OneShotBuilder::new(context.app(), route(book.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<DeletedBookResponse>()
            .await;

        OneShotBuilder::new(context.app(), route(book.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(&format!("Book {} not found", book.id()))
            .await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(1))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Book 1 not found")
            .await;
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let context = TestContext::setup().await;

        context.create_book("Dune", "Herbert").await;
        let book = context.create_book("Solaris", "Lem").await;

        OneShotBuilder::new(context.app(), route(book.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<DeletedBookResponse>()
            .await;

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/books"))
            .send_json(serde_json::json!({"title": "Ubik", "author": "Dick"}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<BookResponse>()
            .await;
        assert!(response.book.id() > book.id());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
