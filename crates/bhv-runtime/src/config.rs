#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! [`RuntimeConfig`] is fixed when a registry is created and copied into
//! every view it owns. It can be built explicitly or read from the
//! environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `BHV_MODEL_WARNINGS` | `model_warnings` | `true` |
//! | `BHV_TRACE_DISPATCH` | `trace_dispatch` | `false` |
//!
//! Accepted tokens are `1/true/yes/on` and `0/false/no/off`
//! (case-insensitive). Anything else keeps the default.

use std::env;

/// Environment variable controlling [`RuntimeConfig::model_warnings`].
pub const ENV_MODEL_WARNINGS: &str = "BHV_MODEL_WARNINGS";
/// Environment variable controlling [`RuntimeConfig::trace_dispatch`].
pub const ENV_TRACE_DISPATCH: &str = "BHV_TRACE_DISPATCH";

/// Behavior switches for a registry and its views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Emit a warning when `expects` is called on a view whose model is
    /// already non-empty.
    pub model_warnings: bool,
    /// Open a debug span per view dispatch and trace each stage.
    pub trace_dispatch: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            model_warnings: true,
            trace_dispatch: false,
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let warnings = env::var(ENV_MODEL_WARNINGS).ok();
        let trace = env::var(ENV_TRACE_DISPATCH).ok();
        Self::from_env_vars(warnings.as_deref(), trace.as_deref())
    }

    /// Build a configuration from raw variable values.
    #[must_use]
    pub fn from_env_vars(model_warnings: Option<&str>, trace_dispatch: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            model_warnings: model_warnings
                .and_then(parse_flag)
                .unwrap_or(defaults.model_warnings),
            trace_dispatch: trace_dispatch
                .and_then(parse_flag)
                .unwrap_or(defaults.trace_dispatch),
        }
    }

    /// Toggle model redeclaration warnings.
    #[must_use]
    pub fn with_model_warnings(mut self, enabled: bool) -> Self {
        self.model_warnings = enabled;
        self
    }

    /// Toggle dispatch tracing.
    #[must_use]
    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if ["1", "true", "yes", "on"]
        .iter()
        .any(|t| raw.eq_ignore_ascii_case(t))
    {
        Some(true)
    } else if ["0", "false", "no", "off"]
        .iter()
        .any(|t| raw.eq_ignore_ascii_case(t))
    {
        Some(false)
    } else {
        None
    }
}
