//! Wire-format fixtures shared by the api and app test suites.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::fs;
use thiserror::Error;

/// Errors raised while loading fixtures.
#[derive(Debug, Error)]
pub enum ParityError {
    /// Fixture file does not exist.
    #[error("missing fixture: {}", .path.display())]
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    #[error("failed to read fixture {}: {source}", .path.display())]
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture file could not be parsed.
    #[error("failed to parse fixture {}: {source}", .path.display())]
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Expected JSON bodies for the API v1 responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1JsonFixtures {
    /// 400 body for `{"title": "", "price": -10}` on product creation.
    pub validation_failed: Value,
    /// `{"message": ...}` body after signup.
    pub signup_message: Value,
    /// One product in the listing.
    pub product: Value,
    /// Detailed error DTO for a duplicate signup.
    pub error_dto: Value,
}

/// Load the API v1 JSON fixtures.
pub fn api_v1_json_fixtures() -> Result<ApiV1JsonFixtures, ParityError> {
    load_fixture("api-v1/json-fixtures.json")
}

fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> Result<T, ParityError> {
    let path = fixture_root().join(relative_path);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(ParityError::MissingFixture { path });
        },
        Err(error) => {
            return Err(ParityError::FixtureRead {
                path,
                source: error,
            });
        },
    };

    serde_json::from_str(&contents).map_err(|error| ParityError::FixtureParse {
        path,
        source: error,
    })
}

/// Directory holding the testkit fixtures.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_fixtures_load() -> Result<(), ParityError> {
        let fixtures = api_v1_json_fixtures()?;
        assert!(fixtures.validation_failed.get("errors").is_some());
        Ok(())
    }

    #[test]
    fn missing_fixture_reports_path() {
        let error = load_fixture::<Value>("api-v1/nope.json").err();
        assert!(matches!(error, Some(ParityError::MissingFixture { .. })));
        let message = error.map(|error| error.to_string()).unwrap_or_default();
        assert!(message.starts_with("missing fixture: "));
        assert!(message.ends_with("nope.json"));
    }

    #[test]
    fn unparsable_fixture_keeps_its_source() {
        let source = serde_json::from_str::<Value>("{").err();
        let Some(source) = source else {
            panic!("truncated JSON must not parse");
        };
        let error = ParityError::FixtureParse {
            path: PathBuf::from("broken.json"),
            source,
        };
        assert!(error.to_string().starts_with("failed to parse fixture broken.json: "));
        assert!(std::error::Error::source(&error).is_some());
    }
}
