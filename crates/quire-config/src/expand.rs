//! `${VAR}` expansion for layout strings in `quire.toml`.

use crate::ConfigError;

/// Variable name that failed to resolve.
struct Unset(String);

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned as-is. Bare `$VAR` is left alone so
/// file names containing dollar signs survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, Unset> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| Unset(name.to_owned()))
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_EXPAND_THEME", "solarized");
        }
        let result = expand_env("${QUIRE_EXPAND_THEME}", "layout.style").unwrap();
        assert_eq!(result, "solarized");
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_THEME");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_UNSET");
        }
        let result = expand_env("${QUIRE_EXPAND_UNSET:-plain}", "layout.style").unwrap();
        assert_eq!(result, "plain");
    }

    #[test]
    fn test_expand_inside_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_EXPAND_HOME", "/home/doc");
        }
        let result = expand_env("${QUIRE_EXPAND_HOME}/styles", "layout.style_dir").unwrap();
        assert_eq!(result, "/home/doc/styles");
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_HOME");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_MISSING");
        }
        let err = expand_env("${QUIRE_EXPAND_MISSING}", "layout.style_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("QUIRE_EXPAND_MISSING"));
        assert!(message.contains("layout.style_dir"));
    }

    #[test]
    fn test_bare_dollar_kept() {
        let result = expand_env("styles/$draft", "layout.style_dir").unwrap();
        assert_eq!(result, "styles/$draft");
    }
}
