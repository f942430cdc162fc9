//! Provider configuration.
//!
//! Every attribute may be omitted from the configuration block and supplied
//! through its environment variable instead; an explicit, non-empty value in
//! the block wins.
//!
//! | Attribute | Environment | Default |
//! |---|---|---|
//! | `meraki_dashboard_api_key` | `MERAKI_DASHBOARD_API_KEY` | required |
//! | `meraki_base_url` | `MERAKI_BASE_URL` | `https://api.meraki.com/api/v1` |
//! | `meraki_debug` | `MERAKI_DEBUG` | `false` |
//! | `meraki_caller` | `MERAKI_CALLER` | none |
//! | `meraki_timeout_seconds` | `MERAKI_TIMEOUT_SECONDS` | `30` |

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::convert::non_empty;
use crate::schema::{Attribute, Diagnostic, Schema};
use crate::validation::validate;

/// Dashboard API key attribute.
pub const API_KEY: &str = "meraki_dashboard_api_key";
/// API root attribute.
pub const BASE_URL: &str = "meraki_base_url";
/// Body logging attribute.
pub const DEBUG: &str = "meraki_debug";
/// User-Agent suffix attribute.
pub const CALLER: &str = "meraki_caller";
/// Request timeout attribute, in seconds.
pub const TIMEOUT_SECONDS: &str = "meraki_timeout_seconds";

/// Environment variable backing each attribute.
pub fn env_var(attribute: &str) -> Option<&'static str> {
    match attribute {
        API_KEY => Some("MERAKI_DASHBOARD_API_KEY"),
        BASE_URL => Some("MERAKI_BASE_URL"),
        DEBUG => Some("MERAKI_DEBUG"),
        CALLER => Some("MERAKI_CALLER"),
        TIMEOUT_SECONDS => Some("MERAKI_TIMEOUT_SECONDS"),
        _ => None,
    }
}

/// Schema of the provider configuration block.
pub fn schema() -> Schema {
    Schema::v0()
        .with_description("Cisco Meraki Dashboard API provider.")
        .with_attribute(
            API_KEY,
            Attribute::optional_string()
                .sensitive()
                .with_description("Dashboard API key. Falls back to `MERAKI_DASHBOARD_API_KEY`."),
        )
        .with_attribute(
            BASE_URL,
            Attribute::optional_string().with_description(format!(
                "API root. Falls back to `MERAKI_BASE_URL`, then `{}`.",
                DEFAULT_BASE_URL
            )),
        )
        .with_attribute(
            DEBUG,
            Attribute::optional_bool()
                .with_description("Log request and response bodies. Falls back to `MERAKI_DEBUG`."),
        )
        .with_attribute(
            CALLER,
            Attribute::optional_string().with_description(
                "Identifier appended to the User-Agent. Falls back to `MERAKI_CALLER`.",
            ),
        )
        .with_attribute(
            TIMEOUT_SECONDS,
            Attribute::optional_int64().with_description(
                "Per-request timeout in seconds. Falls back to `MERAKI_TIMEOUT_SECONDS`, then 30.",
            ),
        )
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    meraki_dashboard_api_key: Option<String>,
    meraki_base_url: Option<String>,
    meraki_debug: Option<bool>,
    meraki_caller: Option<String>,
    meraki_timeout_seconds: Option<i64>,
}

/// Resolved provider settings.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    /// Dashboard API key.
    pub api_key: String,
    /// API root.
    pub base_url: String,
    /// Log request and response bodies.
    pub debug: bool,
    /// User-Agent suffix.
    pub caller: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("caller", &self.caller)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve `config` against the process environment.
    pub fn resolve(config: &Value) -> Result<Self, Vec<Diagnostic>> {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolve `config`, looking up fallbacks with `env`.
    ///
    /// All problems are reported together as attribute-scoped diagnostics.
    pub fn resolve_with<F>(config: &Value, env: F) -> Result<Self, Vec<Diagnostic>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = if config.is_null() {
            Value::Object(Default::default())
        } else {
            config.clone()
        };

        let mut diagnostics = validate(&schema(), &config);
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }
        let raw: RawConfig = serde_json::from_value(config).map_err(|e| {
            vec![Diagnostic::error("Invalid provider configuration").with_detail(e.to_string())]
        })?;

        let lookup = |attribute: &str| env_var(attribute).and_then(&env).filter(|v| !v.is_empty());

        let api_key = non_empty(raw.meraki_dashboard_api_key).or_else(|| lookup(API_KEY));
        if api_key.is_none() {
            diagnostics.push(
                Diagnostic::error("Missing Dashboard API key")
                    .with_detail(
                        "Set meraki_dashboard_api_key or the MERAKI_DASHBOARD_API_KEY environment variable",
                    )
                    .with_attribute(API_KEY),
            );
        }

        let base_url = non_empty(raw.meraki_base_url)
            .or_else(|| lookup(BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            diagnostics.push(
                Diagnostic::error("Invalid Dashboard base URL")
                    .with_detail(format!("'{}' must start with http:// or https://", base_url))
                    .with_attribute(BASE_URL),
            );
        }

        let debug = match raw.meraki_debug {
            Some(debug) => debug,
            None => match lookup(DEBUG) {
                None => false,
                Some(v) => match v.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" => true,
                    "0" | "false" | "no" => false,
                    _ => {
                        diagnostics.push(
                            Diagnostic::error("Invalid MERAKI_DEBUG value")
                                .with_detail(format!("'{}' is not a boolean", v))
                                .with_attribute(DEBUG),
                        );
                        false
                    },
                },
            },
        };

        let caller = non_empty(raw.meraki_caller).or_else(|| lookup(CALLER));

        let timeout_seconds = match raw.meraki_timeout_seconds {
            Some(seconds) => Some(seconds),
            None => match lookup(TIMEOUT_SECONDS) {
                None => None,
                Some(v) => match v.parse::<i64>() {
                    Ok(seconds) => Some(seconds),
                    Err(_) => {
                        diagnostics.push(
                            Diagnostic::error("Invalid MERAKI_TIMEOUT_SECONDS value")
                                .with_detail(format!("'{}' is not an integer", v))
                                .with_attribute(TIMEOUT_SECONDS),
                        );
                        None
                    },
                },
            },
        };
        let timeout = match timeout_seconds {
            None => DEFAULT_TIMEOUT,
            Some(seconds) if seconds > 0 => Duration::from_secs(seconds as u64),
            Some(seconds) => {
                diagnostics.push(
                    Diagnostic::error("Invalid request timeout")
                        .with_detail(format!("Timeout must be a positive number of seconds, got {}", seconds))
                        .with_attribute(TIMEOUT_SECONDS),
                );
                DEFAULT_TIMEOUT
            },
        };

        match api_key {
            Some(api_key) if diagnostics.is_empty() => Ok(Self {
                api_key,
                base_url,
                debug,
                caller,
                timeout,
            }),
            _ => Err(diagnostics),
        }
    }

    /// Client settings for these values.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            debug: self.debug,
            caller: self.caller.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_key_in_config() {
        let config =
            ProviderConfig::resolve_with(&json!({"meraki_dashboard_api_key": "abc"}), env(&[]))
                .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.debug);
        assert_eq!(config.caller, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_environment_fallbacks() {
        let config = ProviderConfig::resolve_with(
            &Value::Null,
            env(&[
                ("MERAKI_DASHBOARD_API_KEY", "from-env"),
                ("MERAKI_BASE_URL", "https://api.meraki.cn/api/v1"),
                ("MERAKI_DEBUG", "true"),
                ("MERAKI_CALLER", "AcmeCorp"),
                ("MERAKI_TIMEOUT_SECONDS", "90"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.base_url, "https://api.meraki.cn/api/v1");
        assert!(config.debug);
        assert_eq!(config.caller.as_deref(), Some("AcmeCorp"));
        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_config_wins_over_environment() {
        let config = ProviderConfig::resolve_with(
            &json!({"meraki_dashboard_api_key": "explicit", "meraki_debug": false}),
            env(&[("MERAKI_DASHBOARD_API_KEY", "from-env"), ("MERAKI_DEBUG", "true")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "explicit");
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_string_falls_back() {
        let config = ProviderConfig::resolve_with(
            &json!({"meraki_dashboard_api_key": ""}),
            env(&[("MERAKI_DASHBOARD_API_KEY", "from-env")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "from-env");
    }

    #[test]
    fn test_all_problems_reported_together() {
        let diagnostics = ProviderConfig::resolve_with(
            &json!({"meraki_base_url": "ftp://example.com", "meraki_timeout_seconds": 0}),
            env(&[]),
        )
        .unwrap_err();

        let attributes: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert_eq!(attributes, vec![API_KEY, BASE_URL, TIMEOUT_SECONDS]);
    }

    #[test]
    fn test_bad_environment_values() {
        let diagnostics = ProviderConfig::resolve_with(
            &json!({"meraki_dashboard_api_key": "abc"}),
            env(&[("MERAKI_DEBUG", "maybe"), ("MERAKI_TIMEOUT_SECONDS", "soon")]),
        )
        .unwrap_err();
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_schema_violations_short_circuit() {
        let diagnostics = ProviderConfig::resolve_with(
            &json!({"meraki_debug": "yes", "region": "eu"}),
            env(&[]),
        )
        .unwrap_err();
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config =
            ProviderConfig::resolve_with(&json!({"meraki_dashboard_api_key": "secret"}), env(&[]))
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_client_options() {
        let config = ProviderConfig::resolve_with(
            &json!({"meraki_dashboard_api_key": "abc", "meraki_caller": "Acme"}),
            env(&[]),
        )
        .unwrap();
        let options = config.client_options();
        assert_eq!(options.api_key, "abc");
        assert!(options.user_agent().ends_with("Acme"));
    }
}
