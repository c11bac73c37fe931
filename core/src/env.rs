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

//! Reads service settings from environment variables.
//!
//! Variables are named `<prefix>_<suffix>` so that one process can host several configurations,
//! like the production database and the one used by tests.

use std::env;
use std::net::IpAddr;

/// Result type for this module.  Errors are ready to show to the user.
type Result<T> = std::result::Result<T, String>;

/// Raw text of a variable, convertible to the types that settings use.
pub struct Value(String);

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Ok(value.0)
    }
}

/// Implements `TryFrom<Value>` for `$t` via its `FromStr` implementation.
macro_rules! parse_value_as [
    ( $t:ty ) => {
        impl TryFrom<Value> for $t {
            type Error = String;

            fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
                value.0.parse::<$t>().map_err(|e| format!("Invalid {}: {}", stringify!($t), e))
            }
        }
    }
];

parse_value_as!(u16);
parse_value_as!(IpAddr);

/// Reads `<prefix>_<suffix>` as a `T`.  Unset variables yield `None`; set variables that do not
/// convert to `T` are an error.
pub fn get_optional_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<Option<T>> {
    let name = format!("{}_{}", prefix, suffix);
    let raw = match env::var(&name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(format!("Invalid value in environment variable {}", name));
        }
    };
    T::try_from(Value(raw))
        .map(Some)
        .map_err(|e| format!("Invalid type in environment variable {}: {}", name, e))
}
