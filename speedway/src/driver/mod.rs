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

//! Business logic for the service.
//!
//! The operations are split in one trait per entity so that the REST layer can be tested against
//! an in-memory double instead of a real database.

use crate::model::*;
use async_trait::async_trait;
use speedway_core::db::Db;
use speedway_core::driver::DriverResult;
use std::sync::Arc;

mod cars;
mod drivers;
mod races;
#[cfg(test)]
pub(crate) mod testutils;

/// Operations on drivers.
#[async_trait]
pub(crate) trait DriverService {
    /// Stores a new driver with the attributes in `data`.
    async fn create_driver(&self, data: DriverData) -> DriverResult<Driver>;

    /// Gets the driver identified by `id`.
    async fn find_driver_by_id(&self, id: Id) -> DriverResult<Driver>;

    /// Gets all drivers sorted by id.
    async fn find_all_drivers(&self) -> DriverResult<Vec<Driver>>;

    /// Replaces the attributes of the driver identified by `id` with `data`.
    async fn update_driver_by_id(&self, id: Id, data: DriverData) -> DriverResult<Driver>;

    /// Deletes the driver identified by `id`.
    async fn delete_driver_by_id(&self, id: Id) -> DriverResult<()>;
}

/// Operations on cars.
#[async_trait]
pub(crate) trait CarService {
    /// Stores a new car with the attributes in `data`.
    async fn create_car(&self, data: CarData) -> DriverResult<Car>;

    /// Gets the car identified by `id`.
    async fn find_car_by_id(&self, id: Id) -> DriverResult<Car>;

    /// Gets all cars sorted by id.
    async fn find_all_cars(&self) -> DriverResult<Vec<Car>>;

    /// Replaces the attributes of the car identified by `id` with `data`.
    async fn update_car_by_id(&self, id: Id, data: CarData) -> DriverResult<Car>;

    /// Deletes the car identified by `id`.
    async fn delete_car_by_id(&self, id: Id) -> DriverResult<()>;
}

/// Operations on races.
#[async_trait]
pub(crate) trait RaceService {
    /// Stores a new race with the attributes in `data`.
    async fn create_race(&self, data: RaceData) -> DriverResult<Race>;

    /// Gets the race identified by `id`.
    async fn find_race_by_id(&self, id: Id) -> DriverResult<Race>;

    /// Gets all races sorted by id.
    async fn find_all_races(&self) -> DriverResult<Vec<Race>>;

    /// Replaces the attributes of the race identified by `id` with `data`.
    async fn update_race_by_id(&self, id: Id, data: RaceData) -> DriverResult<Race>;

    /// Deletes the race identified by `id`.
    async fn delete_race_by_id(&self, id: Id) -> DriverResult<()>;
}

/// All operations exposed by the service.
pub(crate) trait SpeedwayService: DriverService + CarService + RaceService + Send + Sync {}

impl<T> SpeedwayService for T where T: DriverService + CarService + RaceService + Send + Sync {}

/// Business logic backed by a database.
///
/// Every public operation is "one shot": writes start and commit their own transaction, so it's
/// incorrect for the caller to expect two separate calls to observe a consistent view.
#[derive(Clone)]
pub(crate) struct Speedway {
    /// The database that the business logic uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Speedway {
    /// Creates a new business layer backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}
