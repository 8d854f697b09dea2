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

//! API to get one car.

use crate::driver::SpeedwayService;
use crate::model::Id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use speedway_core::rest::{EmptyBody, RestError};
use std::sync::Arc;

/// API handler.
pub(crate) async fn handler(
    State(service): State<Arc<dyn SpeedwayService>>,
    Path(id): Path<Id>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let car = service.find_car_by_id(id).await?;

    Ok(Json(car))
}
