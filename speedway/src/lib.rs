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

//! REST service to manage the drivers, cars and races of a speedway.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::{info, warn};
use speedway_core::db::postgres::{PostgresDb, PostgresOptions};
use speedway_core::db::Db;
use speedway_core::env::get_optional_var;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

mod db;
use db::init_schema;
mod driver;
use driver::Speedway;
mod model;
mod rest;
use rest::app;

/// Port to listen on when `SPEEDWAY_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Configuration of the server.
#[derive(Debug)]
pub struct Config {
    /// Address and port to listen on.
    pub bind_addr: SocketAddr,

    /// Options to connect to the database.
    pub db_opts: PostgresOptions,
}

impl Config {
    /// Gathers the configuration from `SPEEDWAY_*` and `PGSQL_PROD_*` environment variables.
    pub fn from_env() -> Result<Self, String> {
        let address =
            get_optional_var::<Ipv4Addr>("SPEEDWAY", "ADDRESS")?.unwrap_or(Ipv4Addr::LOCALHOST);
        let port = get_optional_var::<u16>("SPEEDWAY", "PORT")?.unwrap_or(DEFAULT_PORT);
        let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
        Ok(Self { bind_addr: SocketAddr::from((address, port)), db_opts })
    }
}

/// Waits until the user asks the server to stop.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C; shutting down"),
        Err(e) => {
            warn!("Cannot listen for Ctrl-C; server will only stop when killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Prepares the database and serves the application on `bind_addr` until asked to stop.
async fn run(db: Arc<dyn Db + Send + Sync>, bind_addr: SocketAddr) -> Result<(), Box<dyn Error>> {
    init_schema(&mut db.ex().await?).await?;

    let app = app(Arc::new(Speedway::new(db)));

    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Runs the server on top of `db` and closes `db` once done, whether the server failed or not.
async fn serve_with_db(
    db: Arc<dyn Db + Send + Sync>,
    bind_addr: SocketAddr,
) -> Result<(), Box<dyn Error>> {
    let result = run(db.clone(), bind_addr).await;
    db.close().await;
    info!("Server stopped");
    result
}

/// Instantiates all resources to serve the application as described by `config`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(config: Config) -> Result<(), Box<dyn Error>> {
    let db = PostgresDb::connect(config.db_opts)?;
    serve_with_db(Arc::new(db), config.bind_addr).await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs `f` with a valid set of database variables plus the `extra` overrides.
    fn with_env<F: FnOnce()>(extra: &[(&str, Option<&str>)], f: F) {
        let defaults = [
            ("PGSQL_PROD_HOST", Some("db.example.com")),
            ("PGSQL_PROD_PORT", Some("5432")),
            ("PGSQL_PROD_DATABASE", Some("speedway")),
            ("PGSQL_PROD_USERNAME", Some("racer")),
            ("PGSQL_PROD_PASSWORD", Some("secret")),
            ("SPEEDWAY_ADDRESS", None),
            ("SPEEDWAY_PORT", None),
        ];
        let mut vars: Vec<(&str, Option<&str>)> = defaults
            .into_iter()
            .filter(|(name, _)| !extra.iter().any(|(other, _)| other == name))
            .collect();
        vars.extend_from_slice(extra);
        temp_env::with_vars(vars, f);
    }

    #[tokio::test]
    async fn test_serve_closes_db_when_bind_fails() {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(speedway_core::db::sqlite::testutils::setup().await);
        let busy = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();

        serve_with_db(db.clone(), busy.local_addr().unwrap()).await.unwrap_err();
        assert!(db.ex().await.is_err(), "Database should have been closed");
    }

    #[test]
    fn test_config_defaults() {
        with_env(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)), config.bind_addr);
            assert_eq!("db.example.com", config.db_opts.host);
            assert_eq!(5432, config.db_opts.port);
        });
    }

    #[test]
    fn test_config_overrides() {
        with_env(&[("SPEEDWAY_ADDRESS", Some("0.0.0.0")), ("SPEEDWAY_PORT", Some("8080"))], || {
            let config = Config::from_env().unwrap();
            assert_eq!(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)), config.bind_addr);
        });
    }

    #[test]
    fn test_config_bad_port() {
        with_env(&[("SPEEDWAY_PORT", Some("70000"))], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.contains("SPEEDWAY_PORT"), "Unexpected error: {}", err);
        });
    }

    #[test]
    fn test_config_missing_db_var() {
        with_env(&[("PGSQL_PROD_PASSWORD", None)], || {
            assert_eq!(
                "Required environment variable PGSQL_PROD_PASSWORD not present",
                Config::from_env().unwrap_err()
            );
        });
    }

    #[test]
    fn test_config_debug_hides_password() {
        with_env(&[], || {
            let config = Config::from_env().unwrap();
            assert!(!format!("{:?}", config).contains("secret"));
        });
    }
}
