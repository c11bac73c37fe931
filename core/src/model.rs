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

//! Generic types to build the domain model of a service.
//!
//! Model types should use the newtype pattern to wrap primitive values and validate them at
//! construction time, returning a `ModelError` when the input is not acceptable.  This way, any
//! instance of a model type that exists in memory is known to be valid.

/// Model errors.  These describe why a value cannot be represented by a model type.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Checks that a required textual `value` named `what` is not empty and fits in `max_length`
/// characters.
pub fn validate_text(what: &str, value: &str, max_length: usize) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", what)));
    }
    let length = value.chars().count();
    if length > max_length {
        return Err(ModelError(format!(
            "{} is too long: {} characters exceed the maximum of {}",
            what, length, max_length
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_ok() {
        validate_text("Title", "a", 1).unwrap();
        validate_text("Title", "Dune", 10).unwrap();
        validate_text("Title", "Ñandú", 5).unwrap();
    }

    #[test]
    fn test_validate_text_empty() {
        assert_eq!(
            ModelError("Title cannot be empty".to_owned()),
            validate_text("Title", "", 10).unwrap_err()
        );
        assert_eq!(
            ModelError("Author cannot be empty".to_owned()),
            validate_text("Author", "  \t ", 10).unwrap_err()
        );
    }

    #[test]
    fn test_validate_text_too_long() {
        assert_eq!(
            ModelError("Title is too long: 4 characters exceed the maximum of 3".to_owned()),
            validate_text("Title", "abcd", 3).unwrap_err()
        );
    }
}
