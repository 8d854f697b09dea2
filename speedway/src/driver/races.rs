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

//! Operations on races.

use crate::db;
use crate::driver::{RaceService, Speedway};
use crate::model::*;
use async_trait::async_trait;
use log::debug;
use speedway_core::driver::DriverResult;

#[async_trait]
impl RaceService for Speedway {
    async fn create_race(&self, data: RaceData) -> DriverResult<Race> {
        let mut tx = self.db.begin().await?;
        let race = db::put_race(tx.ex(), &data).await?;
        tx.commit().await?;
        debug!("Created race {}", race.id());
        Ok(race)
    }

    async fn find_race_by_id(&self, id: Id) -> DriverResult<Race> {
        let race = db::get_race(&mut self.db.ex().await?, id).await?;
        Ok(race)
    }

    async fn find_all_races(&self) -> DriverResult<Vec<Race>> {
        let races = db::get_races(&mut self.db.ex().await?).await?;
        Ok(races)
    }

    async fn update_race_by_id(&self, id: Id, data: RaceData) -> DriverResult<Race> {
        let mut tx = self.db.begin().await?;
        let race = db::update_race(tx.ex(), id, &data).await?;
        tx.commit().await?;
        debug!("Updated race {}", id);
        Ok(race)
    }

    async fn delete_race_by_id(&self, id: Id) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_race(tx.ex(), id).await?;
        tx.commit().await?;
        debug!("Deleted race {}", id);
        Ok(())
    }
}
