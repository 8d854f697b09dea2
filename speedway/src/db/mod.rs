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

//! Database abstraction in terms of the operations needed by the server.

use speedway_core::db::postgres;
#[cfg(test)]
use speedway_core::db::sqlite;
use speedway_core::db::{DbError, DbResult, Executor};

mod cars;
pub(crate) use cars::*;
mod drivers;
pub(crate) use drivers::*;
mod races;
pub(crate) use races::*;


/// Validates that a statement that targets a single entity by its id touched exactly one row.
fn ensure_one_row(affected: u64) -> DbResult<()> {
    match affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("Operation affected {} rows", affected))),
    }
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}
