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

//! Operations on one book.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, Book, BookId, Title};
use bookshelf_core::db::DbError;
use bookshelf_core::driver::{DriverError, DriverResult};
use log::info;

/// Converts a database error `e` raised while operating on book `id` into a driver error, giving
/// a meaningful message to lookup misses.
fn book_error(id: BookId, e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("Book {} not found", id)),
        e => e.into(),
    }
}

impl Driver {
    /// Gets the book identified by `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<Book> {
        let book =
            db::get_book(&mut self.db.ex().await?, id).await.map_err(|e| book_error(id, e))?;
        Ok(book)
    }

    /// Replaces the `title` and `author` of the existing book `id`.
    pub(crate) async fn update_book(
        self,
        id: BookId,
        title: Title,
        author: Author,
    ) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let book =
            db::update_book(tx.ex(), id, title, author).await.map_err(|e| book_error(id, e))?;
        tx.commit().await?;
        info!("Updated book {}: '{}' by {}", id, book.title().as_str(), book.author().as_str());
        Ok(book)
    }

    /// Deletes the existing book `id` and returns the contents it had.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let book = db::delete_book(tx.ex(), id).await.map_err(|e| book_error(id, e))?;
        tx.commit().await?;
        info!("Deleted book {}", id);
        Ok(book)
    }
}
