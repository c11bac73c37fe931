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

//! Interactive documentation of the API.
//!
//! The OpenAPI document is generated from the annotations on each API handler and is served at
//! `/openapi.json`.  A Swagger UI page rendering it is served under `/docs/`, and `/` redirects
//! there so that browsing to the server lands on the documentation.

use crate::model::{Author, Book, BookId, Title};
use crate::rest::{
    book_delete, book_get, book_put, books_get, books_post, BookRequest, BookResponse,
    BooksResponse, DeletedBookResponse,
};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path where the Swagger UI is served.
const DOCS_PATH: &str = "/docs";

/// Path where the OpenAPI document is served.
const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI description of the books API.
#[derive(OpenApi)]
#[openapi(
    info(title = "A book API", description = "A simple REST API for books"),
    paths(
        books_get::handler,
        books_post::handler,
        book_get::handler,
        book_put::handler,
        book_delete::handler,
    ),
    components(schemas(
        Author,
        Book,
        BookId,
        BookRequest,
        BookResponse,
        BooksResponse,
        DeletedBookResponse,
        Title,
    )),
    tags((name = "books", description = "Management of the collection of books"))
)]
struct ApiDoc;

/// Creates the router that serves the documentation.
pub(super) fn router() -> Router {
    let ui = SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi());
    Router::new()
        .route("/", get(|| async { Redirect::to(&format!("{}/", DOCS_PATH)) }))
        .merge(ui)
}
