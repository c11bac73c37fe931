// Bookshelf
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

//! REST service to manage a collection of books.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_core::clocks::SystemClock;
use bookshelf_core::db::{sqlite, Db};
use log::{info, warn};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod config;
use config::Config;
mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested; waiting for in-flight requests to finish"),
        Err(e) => {
            warn!("Cannot listen for the shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Serves the application on `bind_addr` backed by the already-connected `db`.
async fn run(bind_addr: SocketAddr, db: Arc<dyn Db + Send + Sync>) -> Result<(), Box<dyn Error>> {
    db::init_schema(&mut db.ex().await?).await?;

    let driver = Driver::new(db, Arc::new(SystemClock::default()));
    let app = app(driver).layer(CorsLayer::permissive());

    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Instantiates all resources to serve the application as described by `config`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(config: Config) -> Result<(), Box<dyn Error>> {
    info!("Starting with {:?}", config);
    let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::connect(config.db).await?);
    let result = run(config.bind_addr, db.clone()).await;
    db.close().await;
    result
}
