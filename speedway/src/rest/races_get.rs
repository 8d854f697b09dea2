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

//! API to get all existing races.

use crate::driver::SpeedwayService;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use speedway_core::rest::{EmptyBody, RestError};
use std::sync::Arc;

/// API handler.
pub(crate) async fn handler(
    State(service): State<Arc<dyn SpeedwayService>>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let races = service.find_all_races().await?;

    Ok(Json(races))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use speedway_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/speedway/race".to_owned())
    }

    #[tokio::test]
    async fn test_some() {
        let context = TestContext::setup().await;

        let data = RaceData { category: Some("RALLY".to_owned()), ..Default::default() };
        let id = context.state().await.races.insert(data.clone());

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Race>>()
            .await;
        assert_eq!(vec![Race::new(id, data)], response);
        assert_eq!(vec!["find_all_races".to_owned()], context.state().await.calls);
    }

    #[tokio::test]
    async fn test_trailing_slash_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/api/speedway/race/"))
            .send_empty()
            .await
            .expect_json::<Vec<Race>>()
            .await;
        assert!(response.is_empty());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
