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

//! Layered building blocks for the books service.
//!
//! The service adheres to the following layered architecture and structures its code with these
//! modules as well:
//!
//! 1.  `model`: The base layer, providing high-level data types that represent concepts in the
//!     domain of the application.  There should be no logic in here other than validation of the
//!     values that the types can hold.
//!
//! 1.  `db`: The persistence layer.  Services provide free functions that take an `Executor` and
//!     issue the queries for each supported database system.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type to hold all
//!     of the injected dependencies and to coordinate access to the database.
//!
//! 1.  `rest`: The HTTP layer, offering the REST APIs.  Services provide their own `axum::Router`
//!     and back every API with a `Driver`.
//!
//! 1.  `main`: The app launcher.  Its sole purpose is to gather configuration data from
//!     environment variables and start serving.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors
//! float to the top of the app using the `?` operator and are translated to HTTP status codes
//! once returned from the REST layer.
//!
//! Test harnesses for every layer live in `testutils` modules gated behind the `testutils` cargo
//! feature.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
