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

//! Configuration of the service, read from environment variables.

use bookshelf_core::db::sqlite::SqliteOptions;
use bookshelf_core::env::get_optional_var;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default port to listen on when `<prefix>_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Default address to bind to when `<prefix>_BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Prefix of the variables that configure the database.
const SQLITE_PREFIX: &str = "SQLITE_PROD";

/// Service configuration.
#[derive(Debug)]
pub struct Config {
    /// Address and port to listen on.
    pub bind_addr: SocketAddr,

    /// Database to persist books into.
    pub db: SqliteOptions,
}

impl Config {
    /// Reads the configuration from `<prefix>_PORT` and `<prefix>_BIND_ADDR`, plus the
    /// `SQLITE_PROD_*` variables for the database.
    pub fn from_env(prefix: &str) -> Result<Config, String> {
        let port = get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT);
        let addr = get_optional_var::<IpAddr>(prefix, "BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);
        let db = SqliteOptions::from_env(SQLITE_PREFIX)?;
        Ok(Config { bind_addr: SocketAddr::new(addr, port), db })
    }
}
