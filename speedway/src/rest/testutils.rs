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

//! Test utilities for the REST API.

use crate::driver::{CarService, DriverService, RaceService};
use crate::model::*;
use crate::rest::app;
use async_trait::async_trait;
use axum::Router;
use futures::lock::{Mutex, MutexGuard};
use speedway_core::driver::{DriverError, DriverResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Returns the error that the service raises for unknown ids.
fn not_found() -> DriverError {
    DriverError::NotFound("Entity not found".to_owned())
}

/// In-memory collection of entities of one kind, keyed by id.
#[derive(Default)]
pub(crate) struct Table<D> {
    /// The stored entities.
    rows: BTreeMap<Id, D>,

    /// Last id handed out by `insert`.  Ids are never reused.
    last_id: i64,
}

impl<D: Clone> Table<D> {
    /// Stores `data` under a fresh id and returns the id.
    pub(crate) fn insert(&mut self, data: D) -> Id {
        self.last_id += 1;
        let id = Id::from(self.last_id);
        self.rows.insert(id, data);
        id
    }

    /// Returns the entity stored under `id`, if any.
    pub(crate) fn get(&self, id: Id) -> Option<&D> {
        self.rows.get(&id)
    }

    /// Returns the number of stored entities.
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Replaces the entity under `id` with `data`.
    fn replace(&mut self, id: Id, data: D) -> DriverResult<()> {
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = data;
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    /// Removes the entity under `id`.
    fn remove(&mut self, id: Id) -> DriverResult<()> {
        self.rows.remove(&id).map(|_| ()).ok_or_else(not_found)
    }
}

/// All state kept by the fake service.
#[derive(Default)]
pub(crate) struct FakeState {
    /// Stored drivers.
    pub(crate) drivers: Table<DriverData>,

    /// Stored cars.
    pub(crate) cars: Table<CarData>,

    /// Stored races.
    pub(crate) races: Table<RaceData>,

    /// Names of the service operations invoked so far, with their id argument if any.
    pub(crate) calls: Vec<String>,

    /// Error to return from the next operation instead of executing it.
    pub(crate) next_error: Option<DriverError>,
}

impl FakeState {
    /// Records a call to `op` and returns the injected error, if any.
    fn enter(&mut self, op: String) -> DriverResult<()> {
        self.calls.push(op);
        match self.next_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// An in-memory implementation of the business layer that records the operations it receives.
#[derive(Clone, Default)]
pub(crate) struct FakeSpeedway {
    /// Shared mutable state.
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl DriverService for FakeSpeedway {
    async fn create_driver(&self, data: DriverData) -> DriverResult<Driver> {
        let mut state = self.state.lock().await;
        state.enter("create_driver".to_owned())?;
        let id = state.drivers.insert(data.clone());
        Ok(Driver::new(id, data))
    }

    async fn find_driver_by_id(&self, id: Id) -> DriverResult<Driver> {
        let mut state = self.state.lock().await;
        state.enter(format!("find_driver_by_id {}", id))?;
        let data = state.drivers.get(id).cloned().ok_or_else(not_found)?;
        Ok(Driver::new(id, data))
    }

    async fn find_all_drivers(&self) -> DriverResult<Vec<Driver>> {
        let mut state = self.state.lock().await;
        state.enter("find_all_drivers".to_owned())?;
        Ok(state.drivers.rows.iter().map(|(id, data)| Driver::new(*id, data.clone())).collect())
    }

    async fn update_driver_by_id(&self, id: Id, data: DriverData) -> DriverResult<Driver> {
        let mut state = self.state.lock().await;
        state.enter(format!("update_driver_by_id {}", id))?;
        state.drivers.replace(id, data.clone())?;
        Ok(Driver::new(id, data))
    }

    async fn delete_driver_by_id(&self, id: Id) -> DriverResult<()> {
        let mut state = self.state.lock().await;
        state.enter(format!("delete_driver_by_id {}", id))?;
        state.drivers.remove(id)
    }
}

#[async_trait]
impl CarService for FakeSpeedway {
    async fn create_car(&self, data: CarData) -> DriverResult<Car> {
        let mut state = self.state.lock().await;
        state.enter("create_car".to_owned())?;
        let id = state.cars.insert(data.clone());
        Ok(Car::new(id, data))
    }

    async fn find_car_by_id(&self, id: Id) -> DriverResult<Car> {
        let mut state = self.state.lock().await;
        state.enter(format!("find_car_by_id {}", id))?;
        let data = state.cars.get(id).cloned().ok_or_else(not_found)?;
        Ok(Car::new(id, data))
    }

    async fn find_all_cars(&self) -> DriverResult<Vec<Car>> {
        let mut state = self.state.lock().await;
        state.enter("find_all_cars".to_owned())?;
        Ok(state.cars.rows.iter().map(|(id, data)| Car::new(*id, data.clone())).collect())
    }

    async fn update_car_by_id(&self, id: Id, data: CarData) -> DriverResult<Car> {
        let mut state = self.state.lock().await;
        state.enter(format!("update_car_by_id {}", id))?;
        state.cars.replace(id, data.clone())?;
        Ok(Car::new(id, data))
    }

    async fn delete_car_by_id(&self, id: Id) -> DriverResult<()> {
        let mut state = self.state.lock().await;
        state.enter(format!("delete_car_by_id {}", id))?;
        state.cars.remove(id)
    }
}

#[async_trait]
impl RaceService for FakeSpeedway {
    async fn create_race(&self, data: RaceData) -> DriverResult<Race> {
        let mut state = self.state.lock().await;
        state.enter("create_race".to_owned())?;
        let id = state.races.insert(data.clone());
        Ok(Race::new(id, data))
    }

    async fn find_race_by_id(&self, id: Id) -> DriverResult<Race> {
        let mut state = self.state.lock().await;
        state.enter(format!("find_race_by_id {}", id))?;
        let data = state.races.get(id).cloned().ok_or_else(not_found)?;
        Ok(Race::new(id, data))
    }

    async fn find_all_races(&self) -> DriverResult<Vec<Race>> {
        let mut state = self.state.lock().await;
        state.enter("find_all_races".to_owned())?;
        Ok(state.races.rows.iter().map(|(id, data)| Race::new(*id, data.clone())).collect())
    }

    async fn update_race_by_id(&self, id: Id, data: RaceData) -> DriverResult<Race> {
        let mut state = self.state.lock().await;
        state.enter(format!("update_race_by_id {}", id))?;
        state.races.replace(id, data.clone())?;
        Ok(Race::new(id, data))
    }

    async fn delete_race_by_id(&self, id: Id) -> DriverResult<()> {
        let mut state = self.state.lock().await;
        state.enter(format!("delete_race_by_id {}", id))?;
        state.races.remove(id)
    }
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The fake business layer behind the app.
    service: FakeSpeedway,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Sets up the app on top of an empty fake business layer.
    pub(crate) async fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        let service = FakeSpeedway::default();
        let app = app(Arc::new(service.clone()));
        Self { service, app }
    }

    /// Returns a clone of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Grants access to the state of the fake business layer for seeding and inspection.
    pub(crate) async fn state(&self) -> MutexGuard<'_, FakeState> {
        self.service.state.lock().await
    }

    /// Makes the next business operation fail with `e`.
    pub(crate) async fn fail_next(&self, e: DriverError) {
        self.state().await.next_error = Some(e);
    }
}
