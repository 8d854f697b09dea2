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

//! Persistence of races.

use crate::db::ensure_one_row;
use crate::model::{Id, Race, RaceData};
use speedway_core::db::postgres;
#[cfg(test)]
use speedway_core::db::sqlite;
use speedway_core::db::{DbError, DbResult, Executor};

/// Raw contents of a row in the `races` table.
#[derive(sqlx::FromRow)]
struct RaceRow {
    /// Value of the `id` column.
    id: i64,

    /// Value of the `name` column.
    name: Option<String>,

    /// Value of the `category` column.
    category: Option<String>,

    /// Value of the `date` column.
    date: Option<String>,

    /// Value of the `best_time` column.
    best_time: Option<String>,

    /// Value of the `status` column.
    status: Option<String>,
}

impl TryFrom<RaceRow> for Race {
    type Error = DbError;

    fn try_from(row: RaceRow) -> DbResult<Self> {
        let data = RaceData {
            name: row.name,
            category: row.category,
            date: row.date,
            best_time: row.best_time,
            status: row.status,
        };
        Ok(Race::new(Id::new(row.id)?, data))
    }
}

/// Stores a new race with the attributes in `data` and returns it with its assigned id.
pub(crate) async fn put_race(ex: &mut Executor, data: &RaceData) -> DbResult<Race> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO races (name, category, date, best_time, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
            ";
            sqlx::query_scalar::<_, i64>(query_str)
                .bind(data.name.as_deref())
                .bind(data.category.as_deref())
                .bind(data.date.as_deref())
                .bind(data.best_time.as_deref())
                .bind(data.status.as_deref())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO races (name, category, date, best_time, status)
                VALUES (?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(data.name.as_deref())
                .bind(data.category.as_deref())
                .bind(data.date.as_deref())
                .bind(data.best_time.as_deref())
                .bind(data.status.as_deref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Race::new(Id::new(id)?, data.clone()))
}

/// Gets the race identified by `id`.
pub(crate) async fn get_race(ex: &mut Executor, id: Id) -> DbResult<Race> {
    let row = match ex {
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT id, name, category, date, best_time, status FROM races WHERE id = $1";
            sqlx::query_as::<_, RaceRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str =
                "SELECT id, name, category, date, best_time, status FROM races WHERE id = ?";
            sqlx::query_as::<_, RaceRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Race::try_from(row)
}

/// Gets all existing races sorted by id.
pub(crate) async fn get_races(ex: &mut Executor) -> DbResult<Vec<Race>> {
    let query_str = "SELECT id, name, category, date, best_time, status FROM races ORDER BY id";
    let rows = match ex {
        Executor::Postgres(ex) => sqlx::query_as::<_, RaceRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query_as::<_, RaceRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(sqlite::map_sqlx_error)?,

        #[allow(unused)]
        _ => unreachable!(),
    };
    rows.into_iter().map(Race::try_from).collect()
}

/// Replaces all attributes of the race identified by `id` with `data`.
pub(crate) async fn update_race(ex: &mut Executor, id: Id, data: &RaceData) -> DbResult<Race> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE races
                SET name = $1, category = $2, date = $3, best_time = $4, status = $5
                WHERE id = $6
            ";
            sqlx::query(query_str)
                .bind(data.name.as_deref())
                .bind(data.category.as_deref())
                .bind(data.date.as_deref())
                .bind(data.best_time.as_deref())
                .bind(data.status.as_deref())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE races
                SET name = ?, category = ?, date = ?, best_time = ?, status = ?
                WHERE id = ?
            ";
            sqlx::query(query_str)
                .bind(data.name.as_deref())
                .bind(data.category.as_deref())
                .bind(data.date.as_deref())
                .bind(data.best_time.as_deref())
                .bind(data.status.as_deref())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(affected)?;
    Ok(Race::new(id, data.clone()))
}

/// Deletes the race identified by `id`.
pub(crate) async fn delete_race(ex: &mut Executor, id: Id) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => sqlx::query("DELETE FROM races WHERE id = $1")
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?
            .rows_affected(),

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query("DELETE FROM races WHERE id = ?")
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(sqlite::map_sqlx_error)?
            .rows_affected(),

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(affected)
}
