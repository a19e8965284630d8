use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::Result;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Site configuration, read once at startup.
///
/// Only `main_url` is consumed by the scraping core; the remaining fields tune the
/// HTTP transport.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub main_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    pub fn new(main_url: impl Into<String>) -> Result<Self> {
        Self {
            main_url: main_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
        .validated()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Config>(json)?.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that `main_url` is absolute and strips its trailing slash so paths can be appended.
    fn validated(mut self) -> Result<Self> {
        Url::parse(&self.main_url)?;
        let trimmed_len = self.main_url.trim_end_matches('/').len();
        self.main_url.truncate(trimmed_len);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn json_defaults_and_trailing_slash() {
        let config = Config::from_json(r#"{ "main_url": "http://coolier.dip.jp/" }"#).unwrap();
        assert_eq!(config.main_url, "http://coolier.dip.jp");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn missing_main_url_is_rejected() {
        let err = Config::from_json(r#"{ "timeout_secs": 5 }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn relative_main_url_is_rejected() {
        let err = Config::new("coolier.dip.jp").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "main_url": "http://localhost:3000", "timeout_secs": 5, "user_agent": "sosowa-test" }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.main_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent.as_deref(), Some("sosowa-test"));
    }
}
