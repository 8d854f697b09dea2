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

//! Test utilities for the business layer.

use crate::db::init_schema;
use crate::driver::Speedway;
use speedway_core::db::sqlite;
use speedway_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the business layer, for direct inspection.
    db: Arc<dyn Db + Send + Sync>,

    /// The business layer under test.
    speedway: Speedway,
}

impl TestContext {
    /// Initializes the business layer on top of an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let db: Arc<dyn Db + Send + Sync> = Arc::new(db);
        let speedway = Speedway::new(db.clone());
        Self { db, speedway }
    }

    /// Returns a direct executor against the test database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns the business layer under test.
    pub(crate) fn speedway(&self) -> &Speedway {
        &self.speedway
    }
}
