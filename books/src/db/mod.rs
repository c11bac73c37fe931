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

//! Persistence of books.  Every function takes the `Executor` to run on so that callers decide
//! whether the work happens inside a transaction.

use crate::model::{Author, Book, BookId, Title};
use bookshelf_core::db::sqlite::{self, map_sqlx_error, micros_to_timestamp, timestamp_to_micros};
use bookshelf_core::db::{DbError, DbResult, Executor};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use time::OffsetDateTime;


/// Creates the tables if they do not exist yet.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    sqlite::run_schema(ex, include_str!("sqlite.sql")).await
}

impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Book::new(
            BookId::new(id),
            Title::new(title)?,
            Author::new(author)?,
            micros_to_timestamp(created_at)?,
        ))
    }
}

/// Stores a new book and returns it along with the identifier the database picked for it.
pub(crate) async fn create_book(
    ex: &mut Executor,
    title: Title,
    author: Author,
    created_at: OffsetDateTime,
) -> DbResult<Book> {
    let row = sqlx::query("INSERT INTO books (title, author, created_at) VALUES (?, ?, ?) RETURNING id")
        .bind(title.as_str())
        .bind(author.as_str())
        .bind(timestamp_to_micros(created_at)?)
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    Ok(Book::new(BookId::new(id), title, author, created_at))
}

/// Gets all books in ascending identifier order.
pub(crate) async fn get_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let rows = sqlx::query("SELECT * FROM books ORDER BY id")
        .fetch_all(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    rows.into_iter().map(Book::try_from).collect()
}

/// Gets book `id`.  Fails with `DbError::NotFound` if there is no such book.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    let row = sqlx::query("SELECT * FROM books WHERE id = ?")
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Book::try_from(row)
}

/// Overwrites the `title` and `author` of book `id` and returns the stored result.
pub(crate) async fn update_book(
    ex: &mut Executor,
    id: BookId,
    title: Title,
    author: Author,
) -> DbResult<Book> {
    let row = sqlx::query("UPDATE books SET title = ?, author = ? WHERE id = ? RETURNING *")
        .bind(title.as_str())
        .bind(author.as_str())
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Book::try_from(row)
}

/// Removes book `id` and returns what it held.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    let row = sqlx::query("DELETE FROM books WHERE id = ? RETURNING *")
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Book::try_from(row)
}
