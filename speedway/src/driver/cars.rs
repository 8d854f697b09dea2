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

//! Operations on cars.

use crate::db;
use crate::driver::{CarService, Speedway};
use crate::model::*;
use async_trait::async_trait;
use log::debug;
use speedway_core::driver::DriverResult;

#[async_trait]
impl CarService for Speedway {
    async fn create_car(&self, data: CarData) -> DriverResult<Car> {
        let mut tx = self.db.begin().await?;
        let car = db::put_car(tx.ex(), &data).await?;
        tx.commit().await?;
        debug!("Created car {}", car.id());
        Ok(car)
    }

    async fn find_car_by_id(&self, id: Id) -> DriverResult<Car> {
        let car = db::get_car(&mut self.db.ex().await?, id).await?;
        Ok(car)
    }

    async fn find_all_cars(&self) -> DriverResult<Vec<Car>> {
        let cars = db::get_cars(&mut self.db.ex().await?).await?;
        Ok(cars)
    }

    async fn update_car_by_id(&self, id: Id, data: CarData) -> DriverResult<Car> {
        let mut tx = self.db.begin().await?;
        let car = db::update_car(tx.ex(), id, &data).await?;
        tx.commit().await?;
        debug!("Updated car {}", id);
        Ok(car)
    }

    async fn delete_car_by_id(&self, id: Id) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_car(tx.ex(), id).await?;
        tx.commit().await?;
        debug!("Deleted car {}", id);
        Ok(())
    }
}
