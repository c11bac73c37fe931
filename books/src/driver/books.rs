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

//! Operations on the collection of books.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, Book, Title};
use bookshelf_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Stores a new book with the given `title` and `author`, timestamped with the current time.
    pub(crate) async fn create_book(self, title: Title, author: Author) -> DriverResult<Book> {
        let now = self.clock.now_utc();
        let book = db::create_book(&mut self.db.ex().await?, title, author, now).await?;
        info!(
            "Created book {}: '{}' by {}",
            book.id(),
            book.title().as_str(),
            book.author().as_str()
        );
        Ok(book)
    }

    /// Gets all books in the collection.
    pub(crate) async fn get_books(self) -> DriverResult<Vec<Book>> {
        let books = db::get_books(&mut self.db.ex().await?).await?;
        Ok(books)
    }
}
