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

//! High-level data types.

use bookshelf_core::model::{validate_text, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Maximum length of a book title as specified in the schema.
pub(crate) const TITLE_MAX_LENGTH: usize = 80;

/// Maximum length of a book author as specified in the schema.
pub(crate) const AUTHOR_MAX_LENGTH: usize = 40;

/// Identifier of a book, assigned by the database when the book is first stored.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize, ToSchema)]
#[serde(transparent)]
pub(crate) struct BookId(i64);

impl BookId {
    /// Creates a book identifier from its raw database value.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as the raw database value.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generates a newtype for a required piece of text that cannot be empty and that has a maximum
/// length.  Deserialization goes through the same validation as `new`.
macro_rules! required_text [
    ( $name:ident, $what:literal, $max_length:expr ) => {
        #[doc = concat!($what, " of a book.")]
        #[derive(Clone, Debug, Eq, PartialEq, Serialize, ToSchema)]
        #[serde(transparent)]
        pub(crate) struct $name(String);

        impl $name {
            /// Creates a new value from an untrusted string `s`, making sure it is valid.
            pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
                let s = s.into();
                validate_text($what, &s, $max_length)?;
                Ok(Self(s))
            }

            /// Returns a string view of the value.
            pub(crate) fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::new(s).map_err(|e| D::Error::custom(e.to_string()))
            }
        }

        #[cfg(test)]
        impl From<&'static str> for $name {
            /// Creates a new value from a hardcoded string, which must be valid.
            fn from(s: &'static str) -> Self {
                $name::new(s).expect("Hardcoded values must be valid")
            }
        }
    }
];

required_text!(Title, "Title", TITLE_MAX_LENGTH);
required_text!(Author, "Author", AUTHOR_MAX_LENGTH);

/// A book as stored in the database.
///
/// The serialized form is part of the REST API contract.  Note that the creation timestamp is
/// exposed as `dateJoined` for compatibility with existing clients.
#[derive(Clone, Constructor, Getters, Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Book {
    /// Unique identifier of the book.
    id: BookId,

    /// Title of the book.
    title: Title,

    /// Author of the book.
    author: Author,

    /// Time when the book was first stored.
    #[serde(rename = "dateJoined", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}
