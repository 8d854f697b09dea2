// Speedway
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

//! Plumbing shared by the layers of a database-backed REST service.
//!
//! Services built on top of this crate are split in the following layers, and they should
//! structure their code to have these modules as well:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     There should be no logic in here other than validation of values.
//!
//! 1.  `db`: The persistence layer.  Services provide free functions that take an `Executor` and
//!     issue the queries needed by the domain, one per supported database system.
//!
//! 1.  `driver`: The business logic layer.  Services expose their operations behind traits so
//!     that the REST layer can be tested against test doubles, and provide one implementation
//!     that coordinates access to the database.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose handlers call into the
//!     business logic layer.
//!
//! 1.  `main`: The app launcher.  Its sole purpose is to gather configuration data from
//!     environment variables and start serving.
//!
//! Every layer has its own result and error types, such as `DbResult` and `DbError`.  Errors float
//! to the top of the app with the `?` operator and are translated to HTTP status codes once they
//! are returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
