//! Environment variable expansion for menu targets.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("/users", "tabs[0].url").unwrap(), "/users");
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env("${TABMENU_TEST_SURELY_UNSET:-/app}/users", "tabs[0].url").unwrap();
        assert_eq!(value, "/app/users");
    }

    #[test]
    fn test_missing_variable_is_error() {
        let err = expand_env("${TABMENU_TEST_SURELY_UNSET}/users", "tabs[2].url").unwrap_err();

        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "tabs[2].url");
                assert_eq!(message, "${TABMENU_TEST_SURELY_UNSET} not set");
            }
            other => panic!("Expected EnvVar error, got {other:?}"),
        }
    }
}
