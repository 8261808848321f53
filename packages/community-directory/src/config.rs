use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use icu_locid::Locale;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TOKEN_PATH: &str = ".community-directory/token";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL of the backend serving `/api/*`
    pub api_url: Url,
    /// File holding the persisted bearer token
    pub token_path: PathBuf,
    pub request_timeout: Duration,
    /// Serve the illustrative dataset when the member list can't be fetched
    pub sample_fallback: bool,
    /// Locale used to order members by location or occupation
    pub collation_locale: Locale,
}

impl DirectoryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("DIRECTORY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)
            .with_context(|| format!("DIRECTORY_API_URL must be a valid URL, got {api_url}"))?;

        let request_timeout = lookup("DIRECTORY_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("DIRECTORY_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let sample_fallback = match lookup("DIRECTORY_SAMPLE_FALLBACK") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("DIRECTORY_SAMPLE_FALLBACK must be true or false, got {raw}"))?,
            None => false,
        };

        let collation_locale = match lookup("DIRECTORY_COLLATION_LOCALE") {
            Some(raw) => raw.parse::<Locale>().map_err(|e| {
                anyhow!("DIRECTORY_COLLATION_LOCALE must be a BCP-47 tag, got {raw}: {e:?}")
            })?,
            None => Locale::UND,
        };

        Ok(Self {
            api_url,
            token_path: lookup("DIRECTORY_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH)),
            request_timeout: Duration::from_secs(request_timeout),
            sample_fallback,
            collation_locale,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised flag value: {other}"),
    }
}
