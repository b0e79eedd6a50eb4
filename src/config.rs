// =============================================================================
// config.rs - THE SHORT LIST OF KNOBS
// =============================================================================
//
// Which pages to fetch, where to put the two output files, and how to
// introduce ourselves to the server. That's it.
//
// All values can be overridden via PRODUCT_SCRAPE_* environment variables
// (or a .env file). Out of the box: four product pages, products.jsonl,
// products_output.csv.
// =============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ScrapeError;

/// The product pages fetched when PRODUCT_SCRAPE_URLS is not set.
pub const DEFAULT_PRODUCT_URLS: [&str; 4] = [
    "https://www.amazon.in/gp/product/B07WDJZY5Q/ref=s9_bw_cg_Budget_4b1_w",
    "https://www.amazon.in/iQOO-Storage-Snapdragon%C2%AE-Platform-Flagship/dp/B07WGMXVFK",
    "https://www.amazon.in/dp/B0DGJ3THPR",
    "https://www.amazon.in/dp/B0CHX3TW6X",
];

const URLS_KEY: &str = "PRODUCT_SCRAPE_URLS";
const JSONL_PATH_KEY: &str = "PRODUCT_SCRAPE_JSONL_PATH";
const CSV_PATH_KEY: &str = "PRODUCT_SCRAPE_CSV_PATH";
const USER_AGENT_KEY: &str = "PRODUCT_SCRAPE_USER_AGENT";
const TIMEOUT_KEY: &str = "PRODUCT_SCRAPE_TIMEOUT_SECS";
const LOG_FORMAT_KEY: &str = "PRODUCT_SCRAPE_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct Config {
    /// Product pages, fetched strictly in this order. Duplicates are kept.
    pub product_urls: Vec<String>,

    /// Where the line-record (JSON Lines) file goes. Overwritten every run.
    pub jsonl_path: PathBuf,

    /// Where the CSV table goes. Overwritten every run.
    pub csv_path: PathBuf,

    pub user_agent: String,

    /// Per-request timeout. `None` means wait as long as the server likes.
    pub request_timeout: Option<Duration>,

    /// Emit logs as JSON objects instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            product_urls: DEFAULT_PRODUCT_URLS.iter().map(|u| u.to_string()).collect(),
            jsonl_path: PathBuf::from("products.jsonl"),
            csv_path: PathBuf::from("products_output.csv"),
            user_agent: default_user_agent(),
            request_timeout: None,
            json_logs: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// [`Config::default`] for anything unset.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Every configured URL must be an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ScrapeError> {
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let product_urls = match env::var(URLS_KEY) {
            Ok(raw) => parse_url_list(&raw)?,
            Err(_) => defaults.product_urls,
        };

        let request_timeout = match env::var(TIMEOUT_KEY) {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| ScrapeError::InvalidSetting {
                    key: TIMEOUT_KEY.to_string(),
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Config {
            product_urls,
            jsonl_path: env::var(JSONL_PATH_KEY)
                .map(PathBuf::from)
                .unwrap_or(defaults.jsonl_path),
            csv_path: env::var(CSV_PATH_KEY)
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            user_agent: env_or_default(USER_AGENT_KEY, &defaults.user_agent),
            request_timeout,
            json_logs: env_or_default(LOG_FORMAT_KEY, "text").eq_ignore_ascii_case("json"),
        })
    }
}

/// Split a comma- or whitespace-separated URL list and validate each entry.
/// An empty string is a valid, empty list.
fn parse_url_list(raw: &str) -> Result<Vec<String>, ScrapeError> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(validate_url)
        .collect()
}

fn validate_url(candidate: &str) -> Result<String, ScrapeError> {
    let parsed = Url::parse(candidate).map_err(|source| ScrapeError::InvalidUrl {
        url: candidate.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(candidate.to_string()),
        _ => Err(ScrapeError::InvalidSetting {
            key: URLS_KEY.to_string(),
            value: candidate.to_string(),
        }),
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [&str; 6] = [
        URLS_KEY,
        JSONL_PATH_KEY,
        CSV_PATH_KEY,
        USER_AGENT_KEY,
        TIMEOUT_KEY,
        LOG_FORMAT_KEY,
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_KEYS.iter().map(|k| (*k, None)).collect()
    }

    #[test]
    fn test_defaults_without_env() {
        temp_env::with_vars(unset_all(), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.product_urls.len(), 4);
            assert_eq!(config.product_urls[2], "https://www.amazon.in/dp/B0DGJ3THPR");
            assert_eq!(config.jsonl_path, PathBuf::from("products.jsonl"));
            assert_eq!(config.csv_path, PathBuf::from("products_output.csv"));
            assert!(config.request_timeout.is_none());
            assert!(!config.json_logs);
        });
    }

    #[test]
    fn test_url_list_from_env_keeps_order_and_duplicates() {
        let mut vars = unset_all();
        vars[0] = (
            URLS_KEY,
            Some("https://b.example/p/2, https://a.example/p/1\nhttps://b.example/p/2"),
        );
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(
                config.product_urls,
                vec![
                    "https://b.example/p/2",
                    "https://a.example/p/1",
                    "https://b.example/p/2",
                ]
            );
        });
    }

    #[test]
    fn test_empty_url_list_is_allowed() {
        let mut vars = unset_all();
        vars[0] = (URLS_KEY, Some(""));
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert!(config.product_urls.is_empty());
        });
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let mut vars = unset_all();
        vars[0] = (URLS_KEY, Some("/dp/B0DGJ3THPR"));
        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidUrl { .. }));
        });
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let mut vars = unset_all();
        vars[0] = (URLS_KEY, Some("ftp://files.example/product"));
        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidSetting { .. }));
        });
    }

    #[test]
    fn test_overrides_paths_timeout_and_log_format() {
        let mut vars = unset_all();
        vars[1] = (JSONL_PATH_KEY, Some("/tmp/out/records.jsonl"));
        vars[2] = (CSV_PATH_KEY, Some("/tmp/out/table.csv"));
        vars[3] = (USER_AGENT_KEY, Some("test-agent/1.0"));
        vars[4] = (TIMEOUT_KEY, Some("15"));
        vars[5] = (LOG_FORMAT_KEY, Some("JSON"));
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.jsonl_path, PathBuf::from("/tmp/out/records.jsonl"));
            assert_eq!(config.csv_path, PathBuf::from("/tmp/out/table.csv"));
            assert_eq!(config.user_agent, "test-agent/1.0");
            assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
            assert!(config.json_logs);
        });
    }

    #[test]
    fn test_garbage_timeout_is_rejected() {
        let mut vars = unset_all();
        vars[4] = (TIMEOUT_KEY, Some("soon"));
        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidSetting { ref key, .. } if key == TIMEOUT_KEY));
        });
    }
}
