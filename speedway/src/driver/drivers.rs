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

//! Operations on drivers.

use crate::db;
use crate::driver::{DriverService, Speedway};
use crate::model::*;
use async_trait::async_trait;
use log::debug;
use speedway_core::driver::DriverResult;

#[async_trait]
impl DriverService for Speedway {
    async fn create_driver(&self, data: DriverData) -> DriverResult<Driver> {
        let mut tx = self.db.begin().await?;
        let driver = db::put_driver(tx.ex(), &data).await?;
        tx.commit().await?;
        debug!("Created driver {}", driver.id());
        Ok(driver)
    }

    async fn find_driver_by_id(&self, id: Id) -> DriverResult<Driver> {
        let driver = db::get_driver(&mut self.db.ex().await?, id).await?;
        Ok(driver)
    }

    async fn find_all_drivers(&self) -> DriverResult<Vec<Driver>> {
        let drivers = db::get_drivers(&mut self.db.ex().await?).await?;
        Ok(drivers)
    }

    async fn update_driver_by_id(&self, id: Id, data: DriverData) -> DriverResult<Driver> {
        let mut tx = self.db.begin().await?;
        let driver = db::update_driver(tx.ex(), id, &data).await?;
        tx.commit().await?;
        debug!("Updated driver {}", id);
        Ok(driver)
    }

    async fn delete_driver_by_id(&self, id: Id) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_driver(tx.ex(), id).await?;
        tx.commit().await?;
        debug!("Deleted driver {}", id);
        Ok(())
    }
}
