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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use bookshelf_core::clocks::testutils::SettableClock;
use bookshelf_core::clocks::Clock;
use bookshelf_core::db::{Db, DbResult};
use std::sync::Arc;

pub(crate) use crate::driver::testutils::TEST_NOW;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the app, which tests can tweak.
    clock: Arc<SettableClock>,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a settable clock that starts at
    /// `TEST_NOW`.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(TEST_NOW));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    /// Returns a handle to the router so that a test can send more than one request to it.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router, for tests that send a single request and do
    /// not inspect the database afterwards.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Returns the clock that the app reads the time from.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Closes the database under the app so that any further access to it fails.
    pub(crate) async fn close_db(&self) {
        self.db.close().await;
    }

    /// Stores a book directly in the database, timestamped with the current test time.
    pub(crate) async fn create_book(&self, title: &'static str, author: &'static str) -> Book {
        db::create_book(
            &mut self.db.ex().await.unwrap(),
            Title::from(title),
            Author::from(author),
            self.clock.now_utc(),
        )
        .await
        .unwrap()
    }

    /// Fetches a book directly from the database.
    pub(crate) async fn get_book(&self, id: BookId) -> DbResult<Book> {
        db::get_book(&mut self.db.ex().await.unwrap(), id).await
    }

    /// Fetches all books directly from the database.
    pub(crate) async fn get_books(&self) -> Vec<Book> {
        db::get_books(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
