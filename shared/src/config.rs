use thiserror::Error;
use url::Url;

use crate::case::CaseId;

pub const DEFAULT_API_BASE_URL: &str = "https://sih-backend-seven.vercel.app";
pub const MAX_URL_LENGTH: usize = 2048;

const CASE_LIST_PATH: &str = "case_list";
const CASE_UPDATE_PATH: &str = "case_update";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ConfigError {
    fn invalid(url: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidUrl {
            url: truncate_url(url),
            reason: reason.into(),
        }
    }
}

/// An absolute http(s) URL with a host and no embedded credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl {
    url: Url,
}

impl ValidatedUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(ConfigError::invalid(&url, "URL cannot be empty"));
        }
        if trimmed.len() > MAX_URL_LENGTH {
            return Err(ConfigError::invalid(
                &url,
                format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
            ));
        }

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::invalid(&url, e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::invalid(
                    &url,
                    format!("invalid scheme '{other}', only 'http' and 'https' are allowed"),
                ))
            }
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::invalid(&url, "URL must have a host"));
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(ConfigError::invalid(&url, "credentials in URL are not allowed"));
        }

        Ok(Self { url: parsed })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}

/// Where the case endpoints live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: ValidatedUrl,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: ValidatedUrl::new(base_url)?,
        })
    }

    pub fn base_url(&self) -> &ValidatedUrl {
        &self.base_url
    }

    /// `<base>/case_list/`
    pub fn case_list_url(&self) -> Result<String, ConfigError> {
        self.endpoint(&[CASE_LIST_PATH])
    }

    /// `<base>/case_update/<id>/`, with the id percent-encoded.
    pub fn case_update_url(&self, id: &CaseId) -> Result<String, ConfigError> {
        self.endpoint(&[CASE_UPDATE_PATH, &id.to_string()])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<String, ConfigError> {
        let mut url = self.base_url.url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ConfigError::invalid(self.base_url.as_str(), "base URL cannot carry a path")
            })?;
            path.pop_if_empty();
            path.extend(segments);
            // trailing slash
            path.push("");
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url.into())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ValidatedUrl::new(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|e| unreachable!("default base URL is valid: {e}")),
        }
    }
}
