//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced forms are recognised; a value without `${` is returned
/// as is, so bare `$` characters survive. `field` names the configuration
/// key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Lookup failure for a variable without a default.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("data", "storage.data_dir").unwrap(), "data");
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("$HOME/data", "storage.data_dir").unwrap(), "$HOME/data");
    }

    #[test]
    fn test_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SC_EXPAND_TEST_ROOT", "/srv/cms");
        }
        let result = expand_env("${SC_EXPAND_TEST_ROOT}/data", "storage.data_dir").unwrap();
        assert_eq!(result, "/srv/cms/data");
        unsafe {
            std::env::remove_var("SC_EXPAND_TEST_ROOT");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SC_EXPAND_TEST_UNSET");
        }
        let result = expand_env("${SC_EXPAND_TEST_UNSET:-warn}", "logging.filter").unwrap();
        assert_eq!(result, "warn");
    }

    #[test]
    fn test_unset_without_default_is_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SC_EXPAND_TEST_MISSING");
        }
        let err = expand_env("${SC_EXPAND_TEST_MISSING}", "storage.data_dir").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in storage.data_dir: ${SC_EXPAND_TEST_MISSING} not set"
        );
    }
}
