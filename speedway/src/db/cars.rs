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

//! Persistence of cars.

use crate::db::ensure_one_row;
use crate::model::{Car, CarData, Id};
use speedway_core::db::postgres;
#[cfg(test)]
use speedway_core::db::sqlite;
use speedway_core::db::{DbError, DbResult, Executor};

/// Raw contents of a row in the `cars` table.
#[derive(sqlx::FromRow)]
struct CarRow {
    /// Value of the `id` column.
    id: i64,

    /// Value of the `nickname` column.
    nickname: Option<String>,

    /// Value of the `model` column.
    model: Option<String>,

    /// Value of the `year` column.
    year: Option<i32>,

    /// Value of the `status` column.
    status: Option<String>,

    /// Value of the `top_speed` column.
    top_speed: Option<i32>,
}

impl TryFrom<CarRow> for Car {
    type Error = DbError;

    fn try_from(row: CarRow) -> DbResult<Self> {
        let data = CarData {
            nickname: row.nickname,
            model: row.model,
            year: row.year,
            status: row.status,
            top_speed: row.top_speed,
        };
        Ok(Car::new(Id::new(row.id)?, data))
    }
}

/// Stores a new car with the attributes in `data` and returns it with its assigned id.
pub(crate) async fn put_car(ex: &mut Executor, data: &CarData) -> DbResult<Car> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO cars (nickname, model, year, status, top_speed)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
            ";
            sqlx::query_scalar::<_, i64>(query_str)
                .bind(data.nickname.as_deref())
                .bind(data.model.as_deref())
                .bind(data.year)
                .bind(data.status.as_deref())
                .bind(data.top_speed)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO cars (nickname, model, year, status, top_speed)
                VALUES (?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(data.nickname.as_deref())
                .bind(data.model.as_deref())
                .bind(data.year)
                .bind(data.status.as_deref())
                .bind(data.top_speed)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Car::new(Id::new(id)?, data.clone()))
}

/// Gets the car identified by `id`.
pub(crate) async fn get_car(ex: &mut Executor, id: Id) -> DbResult<Car> {
    let row = match ex {
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT id, nickname, model, year, status, top_speed FROM cars WHERE id = $1";
            sqlx::query_as::<_, CarRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str =
                "SELECT id, nickname, model, year, status, top_speed FROM cars WHERE id = ?";
            sqlx::query_as::<_, CarRow>(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Car::try_from(row)
}

/// Gets all existing cars sorted by id.
pub(crate) async fn get_cars(ex: &mut Executor) -> DbResult<Vec<Car>> {
    let query_str = "SELECT id, nickname, model, year, status, top_speed FROM cars ORDER BY id";
    let rows = match ex {
        Executor::Postgres(ex) => sqlx::query_as::<_, CarRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query_as::<_, CarRow>(query_str)
            .fetch_all(ex.conn())
            .await
            .map_err(sqlite::map_sqlx_error)?,

        #[allow(unused)]
        _ => unreachable!(),
    };
    rows.into_iter().map(Car::try_from).collect()
}

/// Replaces all attributes of the car identified by `id` with `data`.
pub(crate) async fn update_car(ex: &mut Executor, id: Id, data: &CarData) -> DbResult<Car> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE cars
                SET nickname = $1, model = $2, year = $3, status = $4, top_speed = $5
                WHERE id = $6
            ";
            sqlx::query(query_str)
                .bind(data.nickname.as_deref())
                .bind(data.model.as_deref())
                .bind(data.year)
                .bind(data.status.as_deref())
                .bind(data.top_speed)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE cars
                SET nickname = ?, model = ?, year = ?, status = ?, top_speed = ?
                WHERE id = ?
            ";
            sqlx::query(query_str)
                .bind(data.nickname.as_deref())
                .bind(data.model.as_deref())
                .bind(data.year)
                .bind(data.status.as_deref())
                .bind(data.top_speed)
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
    Ok(Car::new(id, data.clone()))
}

/// Deletes the car identified by `id`.
pub(crate) async fn delete_car(ex: &mut Executor, id: Id) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id.as_i64())
            .execute(ex.conn())
            .await
            .map_err(postgres::map_sqlx_error)?
            .rows_affected(),

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlx::query("DELETE FROM cars WHERE id = ?")
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
