//! Shell configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell ships as a WASM bundle, so there is no process environment at
//! runtime. Settings are captured from the build environment with
//! `option_env!` and parsed through the same lookup path tests use.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;
pub const DEFAULT_DEVICE_TYPE: &str = "web";
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_PROFILE_KEY: &str = "user_info";
pub const DEFAULT_APP_TITLE: &str = "Portal";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SHELL_TIMEOUT_MS: {0}")]
    InvalidTimeout(String),
    #[error("SHELL_API_BASE must be an absolute path or URL: {0}")]
    InvalidApiBase(String),
}

/// Durable storage keys for the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub profile: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN_KEY.to_owned(),
            profile: DEFAULT_PROFILE_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prefix joined to every gateway request path.
    pub api_base: String,
    /// Per-request timeout enforced by the browser transport.
    pub timeout_ms: u32,
    /// Value of the `deviceType` header and login field.
    pub device_type: String,
    pub storage_keys: StorageKeys,
    /// Suffix appended to every route title.
    pub app_title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            device_type: DEFAULT_DEVICE_TYPE.to_owned(),
            storage_keys: StorageKeys::default(),
            app_title: DEFAULT_APP_TITLE.to_owned(),
        }
    }
}

impl ShellConfig {
    /// Build config from the variables present when the bundle was compiled.
    ///
    /// # Errors
    ///
    /// Returns an error if a captured value fails validation.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "SHELL_API_BASE" => option_env!("SHELL_API_BASE"),
                "SHELL_TIMEOUT_MS" => option_env!("SHELL_TIMEOUT_MS"),
                "SHELL_DEVICE_TYPE" => option_env!("SHELL_DEVICE_TYPE"),
                "SHELL_TOKEN_KEY" => option_env!("SHELL_TOKEN_KEY"),
                "SHELL_PROFILE_KEY" => option_env!("SHELL_PROFILE_KEY"),
                "SHELL_APP_TITLE" => option_env!("SHELL_APP_TITLE"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Optional (defaults in parentheses):
    /// - `SHELL_API_BASE` (`/api`)
    /// - `SHELL_TIMEOUT_MS` (`5000`)
    /// - `SHELL_DEVICE_TYPE` (`web`)
    /// - `SHELL_TOKEN_KEY` (`auth_token`)
    /// - `SHELL_PROFILE_KEY` (`user_info`)
    /// - `SHELL_APP_TITLE` (`Portal`)
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a positive integer or the API
    /// base is neither an absolute path nor an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base = parse_api_base(non_empty("SHELL_API_BASE").as_deref())?;
        let timeout_ms = parse_timeout(non_empty("SHELL_TIMEOUT_MS").as_deref())?;
        let device_type = non_empty("SHELL_DEVICE_TYPE").unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_owned());
        let storage_keys = StorageKeys {
            token: non_empty("SHELL_TOKEN_KEY").unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_owned()),
            profile: non_empty("SHELL_PROFILE_KEY").unwrap_or_else(|| DEFAULT_PROFILE_KEY.to_owned()),
        };
        let app_title = non_empty("SHELL_APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.to_owned());

        Ok(Self { api_base, timeout_ms, device_type, storage_keys, app_title })
    }

    /// Render a page title for a route.
    #[must_use]
    pub fn page_title(&self, route_title: &str) -> String {
        if route_title.is_empty() {
            return self.app_title.clone();
        }
        format!("{route_title} | {}", self.app_title)
    }
}

fn parse_api_base(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_API_BASE.to_owned());
    };
    let absolute = raw.starts_with('/') || raw.starts_with("http://") || raw.starts_with("https://");
    if !absolute {
        return Err(ConfigError::InvalidApiBase(raw.to_owned()));
    }
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(raw: Option<&str>) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(DEFAULT_TIMEOUT_MS),
        Some(raw) => match raw.parse::<u32>() {
            Ok(ms) if ms > 0 => Ok(ms),
            _ => Err(ConfigError::InvalidTimeout(raw.to_owned())),
        },
    }
}
