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

//! Building blocks for the HTTP layer.
//!
//! A service exposes an `app` function in its `rest` module that assembles the `axum::Router`.
//! Each API lives in a file of its own named after the entity and the method it handles, like
//! `book_get.rs`, and carries its own integration tests.  Those tests start with a `route`
//! function returning the method and path under test so that every test in the file exercises
//! the same API.

use crate::driver::DriverError;
use crate::model::ModelError;
use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Errors reported to API clients.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Something went wrong on our side.
    #[error("{0}")]
    InternalError(String),

    /// The request was understood but its contents are not acceptable.
    #[error("{0}")]
    InvalidRequest(String),

    /// The request refers to an entity that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The API takes no payload but the request carried one.
    #[error("Content should be empty")]
    PayloadNotEmpty,
}

impl RestError {
    /// Returns the HTTP status code that reports this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::PayloadNotEmpty => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::BackendError(msg) => RestError::InternalError(msg),
            DriverError::InvalidInput(msg) => RestError::InvalidRequest(msg),
            DriverError::NotFound(msg) => RestError::NotFound(msg),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.0)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse { message: self.to_string() })).into_response()
    }
}

/// Result type for this module.
pub type RestResult<T> = Result<T, RestError>;

/// Body of every error response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub message: String,
}

/// Extractor for APIs that take no payload.  Requests that carry one are rejected.
pub struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        match req.into_body().is_end_stream() {
            true => Ok(EmptyBody {}),
            false => Err(RestError::PayloadNotEmpty),
        }
    }
}

/// Harness to drive a `Router` in-process from tests.
#[cfg(feature = "testutils")]
pub mod testutils {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, HeaderName, HeaderValue};
    use axum::Router;
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    /// Largest response body the harness is willing to read.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Describes a request to send to a router exactly once.
    #[must_use]
    pub struct OneShotBuilder {
        /// Router that will handle the request.
        app: Router,

        /// Request being assembled.
        builder: http::request::Builder,
    }

    impl OneShotBuilder {
        /// Starts a request to `uri` using `method`, to be served by `app`.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = http::Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Adds the header `name` with `value` to the request.
        pub fn with_header<K, V>(self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            Self { app: self.app, builder: self.builder.header(name, value) }
        }

        /// Sends the request with `body` and hands the response over for checking.
        async fn send(self, body: Body) -> ResponseChecker {
            let request = self.builder.body(body).unwrap();
            let response = self.app.oneshot(request).await.unwrap();
            ResponseChecker { response, exp_status: StatusCode::OK }
        }

        /// Sends the request without a payload.
        pub async fn send_empty(self) -> ResponseChecker {
            self.send(Body::empty()).await
        }

        /// Sends the request with a plain text payload.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            self.with_header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .send(Body::from(text.into()))
                .await
        }

        /// Sends the request with `request` serialized as its JSON payload.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let body = serde_json::to_vec(&request).unwrap();
            self.with_header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .send(Body::from(body))
                .await
        }
    }

    /// Assertions on the response to a request sent by `OneShotBuilder`.
    ///
    /// The status code is expected to be 200 unless `expect_status` says otherwise.
    #[must_use]
    pub struct ResponseChecker {
        /// Response returned by the router.
        response: Response,

        /// Status code that the response must carry.
        exp_status: StatusCode,
    }

    impl ResponseChecker {
        /// Makes the checks expect `status` instead of 200.
        pub fn expect_status(self, status: StatusCode) -> Self {
            Self { exp_status: status, ..self }
        }

        /// Checks the status code and returns the raw body of the response.
        async fn body(self) -> Vec<u8> {
            assert_eq!(self.exp_status, self.response.status());
            let bytes = axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await;
            bytes.unwrap().to_vec()
        }

        /// Expects the body to be an `ErrorResponse` whose message matches the `exp_re` regex.
        pub async fn expect_error(self, exp_re: &str) {
            let body = self.body().await;
            let response = serde_json::from_slice::<ErrorResponse>(&body).unwrap_or_else(|e| {
                panic!("Body is not an ErrorResponse ({}): {}", e, String::from_utf8_lossy(&body))
            });
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(
                re.is_match(&response.message),
                "Error message '{}' does not match '{}'",
                response.message,
                exp_re
            );
        }

        /// Expects the body to hold a JSON document of type `T` and returns it.
        pub async fn expect_json<T: DeserializeOwned>(self) -> T {
            serde_json::from_slice::<T>(&self.body().await).unwrap()
        }

        /// Expects the body to be text that matches the `exp_re` regex.  Use `expect_error` for
        /// bodies that carry an `ErrorResponse`.
        pub async fn expect_text(self, exp_re: &str) {
            let body = String::from_utf8(self.body().await).unwrap();
            assert!(!body.contains("\"message\":"), "Body is an ErrorResponse: {}", body);
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(re.is_match(&body), "Body '{}' does not match '{}'", body, exp_re);
        }
    }

    /// Generates a test checking that the API at `$route` rejects payloads that are not JSON.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("title=Dune&author=Herbert")
                    .await
                    .expect_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE)
                    .expect_text("Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("title=Dune&author=Herbert")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_text("expected value")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_json;

    /// Generates a test checking that the API at `$route` rejects any payload.
    #[macro_export]
    macro_rules! test_payload_must_be_empty {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_empty() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("{\"title\": \"Dune\"}")
                    .await
                    .expect_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE)
                    .expect_error("should be empty")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_empty;
}
