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

//! Persistence of drivers.

use crate::db::ensure_one_row;
use crate::model::{Driver, DriverData, Id};
use speedway_core::db::postgres;
#[cfg(test)]
use speedway_core::db::sqlite;
use speedway_core::db::{DbError, DbResult, Executor};

/// Raw contents of a row in the `drivers` table.
#[derive(sqlx::FromRow)]
struct DriverRow {
    /// Value of the `id` column.
    id: i64,

    /// Value of the `first_name` column.
    first_name: Option<String>,

    /// Value of the `last_name` column.
    last_name: Option<String>,

    /// Value of the `age` column.
    age: Option<i32>,

    /// Value of the `nickname` column.
    nickname: Option<String>,

    /// Value of the `wins` column.
    wins: Option<i32>,

    /// Value of the `losses` column.
    losses: Option<i32>,
}

impl TryFrom<DriverRow> for Driver {
    type Error = DbError;

    fn try_from(row: DriverRow) -> DbResult<Self> {
        let data = DriverData {
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            nickname: row.nickname,
            wins: row.wins,
            losses: row.losses,
        };
        Ok(Driver::new(Id::new(row.id)?, data))
    }
}

/// Stores a new driver with the attributes in `data` and returns it with its assigned id.
pub(crate) async fn put_driver(ex: &mut Executor, data: &DriverData) -> DbResult<Driver> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO drivers (first_name, last_name, age, nickname, wins, losses)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            ";
            sqlx::query_scalar::<_, i64>(query_str)
                .bind(data.first_name.as_deref())
                .bind(data.last_name.as_deref())
                .bind(data.age)
                .bind(data.nickname.as_deref())
                .bind(data.wins)
                .bind(data.losses)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO drivers (first_name, last_name, age, nickname, wins, losses)
                VALUES (?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(data.first_name.as_deref())
                .bind(data.last_name.as_deref())
                .bind(data.age)
                .bind(data.nickname.as_deref())
                .bind(data.wins)
                .bind(data.losses)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Driver::new(Id::new(id)?, data.clone()))
}

/// Gets the driver identified by `id`.
pub(crate) async fn get_driver(ex: &mut Executor, id: Id) -> DbResult<Driver> {
    let row = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, first_name, last_name, age, nickname, wins, losses
                FROM drivers WHERE id = $1
            ";
            sqlx::query_as::<_, DriverRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, first_name, last_name, age, nickname, wins, losses
                FROM drivers WHERE id = ?
            ";
            sqlx::query_as::<_, DriverRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Driver::try_from(row)
}

/// Gets all existing drivers sorted by id.
pub(crate) async fn get_drivers(ex: &mut Executor) -> DbResult<Vec<Driver>> {
    let query_str = "
        SELECT id, first_name, last_name, age, nickname, wins, losses
        FROM drivers ORDER BY id
    ";
    let rows = match ex {
        Executor::Postgres(ex) => sqlx::query_as::<_, DriverRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query_as::<_, DriverRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(sqlite::map_sqlx_error)?,

        #[allow(unused)]
        _ => unreachable!(),
    };
    rows.into_iter().map(Driver::try_from).collect()
}

/// Replaces all attributes of the driver identified by `id` with `data`.
pub(crate) async fn update_driver(ex: &mut Executor, id: Id, data: &DriverData) -> DbResult<Driver> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE drivers
                SET first_name = $1, last_name = $2, age = $3, nickname = $4, wins = $5,
                    losses = $6
                WHERE id = $7
            ";
            sqlx::query(query_str)
                .bind(data.first_name.as_deref())
                .bind(data.last_name.as_deref())
                .bind(data.age)
                .bind(data.nickname.as_deref())
                .bind(data.wins)
                .bind(data.losses)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE drivers
                SET first_name = ?, last_name = ?, age = ?, nickname = ?, wins = ?, losses = ?
                WHERE id = ?
            ";
            sqlx::query(query_str)
                .bind(data.first_name.as_deref())
                .bind(data.last_name.as_deref())
                .bind(data.age)
                .bind(data.nickname.as_deref())
                .bind(data.wins)
                .bind(data.losses)
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
    Ok(Driver::new(id, data.clone()))
}

/// Deletes the driver identified by `id`.
pub(crate) async fn delete_driver(ex: &mut Executor, id: Id) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?
            .rows_affected(),

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query("DELETE FROM drivers WHERE id = ?")
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
