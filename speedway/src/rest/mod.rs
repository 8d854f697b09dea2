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

//! Entry point to the REST server.

use crate::driver::SpeedwayService;
use axum::Router;
use std::sync::Arc;

mod car_delete;
mod car_get;
mod car_post;
mod car_put;
mod cars_get;
mod driver_delete;
mod driver_get;
mod driver_post;
mod driver_put;
mod drivers_get;
mod race_delete;
mod race_get;
mod race_post;
mod race_put;
mod races_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
///
/// Collection paths are registered with and without a trailing slash so that both spellings work.
pub(crate) fn app(service: Arc<dyn SpeedwayService>) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/api/speedway/driver", get(drivers_get::handler).post(driver_post::handler))
        .route("/api/speedway/driver/", get(drivers_get::handler).post(driver_post::handler))
        .route(
            "/api/speedway/driver/:id",
            get(driver_get::handler).put(driver_put::handler).delete(driver_delete::handler),
        )
        .route("/api/speedway/car", get(cars_get::handler).post(car_post::handler))
        .route("/api/speedway/car/", get(cars_get::handler).post(car_post::handler))
        .route(
            "/api/speedway/car/:id",
            get(car_get::handler).put(car_put::handler).delete(car_delete::handler),
        )
        .route("/api/speedway/race", get(races_get::handler).post(race_post::handler))
        .route("/api/speedway/race/", get(races_get::handler).post(race_post::handler))
        .route(
            "/api/speedway/race/:id",
            get(race_get::handler).put(race_put::handler).delete(race_delete::handler),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::TestContext;
    use crate::model::*;
    use axum::http;
    use serde_json::json;
    use speedway_core::rest::testutils::*;

    /// Exercises the whole stack, from the router down to the database, for one entity kind.
    #[tokio::test]
    async fn test_end_to_end_driver_flow() {
        let context = TestContext::setup().await;
        let app = app(Arc::new(context.speedway().clone()));

        let created = OneShotBuilder::new(app.clone(), (http::Method::POST, "/api/speedway/driver"))
            .send_json(json!({"firstName": "Niki", "lastName": "Lauda", "wins": 25}))
            .await
            .expect_json::<Driver>()
            .await;
        assert_eq!(Id::from(1), *created.id());

        let fetched = OneShotBuilder::new(app.clone(), (http::Method::GET, "/api/speedway/driver/1"))
            .send_empty()
            .await
            .expect_json::<Driver>()
            .await;
        assert_eq!(created, fetched);

        let updated = OneShotBuilder::new(app.clone(), (http::Method::PUT, "/api/speedway/driver/1"))
            .send_json(json!({"id": 99, "nickname": "The Rat"}))
            .await
            .expect_json::<Driver>()
            .await;
        assert_eq!(Id::from(1), *updated.id());
        assert_eq!(Some("The Rat".to_owned()), updated.data().nickname);
        assert_eq!(None, updated.data().first_name);

        let all = OneShotBuilder::new(app.clone(), (http::Method::GET, "/api/speedway/driver/"))
            .send_empty()
            .await
            .expect_json::<Vec<Driver>>()
            .await;
        assert_eq!(vec![updated], all);

        OneShotBuilder::new(app.clone(), (http::Method::DELETE, "/api/speedway/driver/1"))
            .send_empty()
            .await
            .expect_empty()
            .await;

        OneShotBuilder::new(app, (http::Method::GET, "/api/speedway/driver/1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_entities_have_separate_ids() {
        let context = TestContext::setup().await;
        let app = app(Arc::new(context.speedway().clone()));

        for path in ["/api/speedway/driver", "/api/speedway/car/", "/api/speedway/race"] {
            let response = OneShotBuilder::new(app.clone(), (http::Method::POST, path))
                .send_json(json!({}))
                .await
                .expect_json::<serde_json::Value>()
                .await;
            assert_eq!(1, response["id"], "Unexpected id for {}", path);
        }

        let car = OneShotBuilder::new(app, (http::Method::GET, "/api/speedway/car/1"))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(
            json!({"id": 1, "nickname": null, "model": null, "year": null, "status": null,
                   "topSpeed": null}),
            car
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let context = TestContext::setup().await;
        let app = app(Arc::new(context.speedway().clone()));

        OneShotBuilder::new(app, (http::Method::GET, "/api/speedway/track"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_empty()
            .await;
    }
}
