//! `${VAR}` expansion for configuration strings.
//!
//! `${VAR}` fails when VAR is unset, `${VAR:-default}` falls back to the
//! default. Bare `$VAR` is left alone.

use crate::ConfigError;

/// Variable that was referenced but not set.
struct UnsetVar {
    name: String,
}

/// Expand `${...}` references in `value`.
///
/// `field` names the config key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}
