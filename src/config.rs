//! Start-up configuration.
//!
//! Resolved once in `main` and handed to components through context; nothing
//! here changes while the page is open.

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost/api";
pub const DEFAULT_LOG_FILTER: &str = "info";

const API_BASE_META: &str = "dashboard-api-base";
const LOG_FILTER_META: &str = "dashboard-log";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL is valid"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build a config for an explicit base URL with the default log filter.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        })
    }

    /// Read the host page's meta tags, then the build-time environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(
            ConfigSource {
                api_base: meta_content(API_BASE_META),
                log_filter: meta_content(LOG_FILTER_META),
            },
            ConfigSource {
                api_base: option_env!("DASHBOARD_API_BASE_URL").map(str::to_string),
                log_filter: option_env!("DASHBOARD_LOG").map(str::to_string),
            },
        )
    }

    /// Merge page-level and build-level settings; page wins, blanks are ignored.
    pub fn resolve(page: ConfigSource, build: ConfigSource) -> Result<Self, ConfigError> {
        let base = first_non_blank(page.api_base, build.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let log_filter = first_non_blank(page.log_filter, build.log_filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mut config = Self::new(&base)?;
        config.log_filter = log_filter;
        Ok(config)
    }
}

/// One layer of optional settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    pub api_base: Option<String>,
    pub log_filter: Option<String>,
}

fn first_non_blank(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .into_iter()
        .chain(fallback)
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()?
        .get_attribute("content")
}
