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

//! API to get one race.

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
    let race = service.find_race_by_id(id).await?;

    Ok(Json(race))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use speedway_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/api/speedway/race/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let data = RaceData {
            name: Some("Daytona 500".to_owned()),
            status: Some("SCHEDULED".to_owned()),
            ..Default::default()
        };
        let id = context.state().await.races.insert(data.clone());

        let response = OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_json::<Race>()
            .await;
        assert_eq!(id, *response.id());
        assert_eq!(&data, response.data());
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(8))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
