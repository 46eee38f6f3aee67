//! Environment variable helpers shared by the config loaders

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvError {
    #[error("Environment variable {name} has an invalid value '{value}'")]
    Invalid { name: String, value: String },
}

/// Non-empty value of `name`, if set
pub fn var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Value of `name`, or `default` when unset or blank
pub fn var_or(name: &str, default: &str) -> String {
    var_opt(name).unwrap_or_else(|| default.to_string())
}

/// Parsed value of `name`, or `default` when unset
///
/// A set but unparsable value is an error rather than a silent fallback.
pub fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, EnvError> {
    match var_opt(name) {
        Some(value) => value.parse().map_err(|_| EnvError::Invalid {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_var_or_falls_back_on_blank() {
        std::env::set_var("MEDPIPE_TEST_BLANK", "   ");
        assert_eq!(var_or("MEDPIPE_TEST_BLANK", "fallback"), "fallback");
        std::env::remove_var("MEDPIPE_TEST_BLANK");
    }

    #[test]
    #[serial]
    fn test_parse_or() {
        std::env::set_var("MEDPIPE_TEST_PORT", "9001");
        assert_eq!(parse_or("MEDPIPE_TEST_PORT", 8000u16), Ok(9001));

        std::env::set_var("MEDPIPE_TEST_PORT", "ninety");
        assert_eq!(
            parse_or("MEDPIPE_TEST_PORT", 8000u16),
            Err(EnvError::Invalid {
                name: "MEDPIPE_TEST_PORT".to_string(),
                value: "ninety".to_string(),
            })
        );

        std::env::remove_var("MEDPIPE_TEST_PORT");
        assert_eq!(parse_or("MEDPIPE_TEST_PORT", 8000u16), Ok(8000));
    }
}
