use {
    crate::client::RetryPolicy,
    anyhow::{Context as _, Result},
    std::{str::FromStr, time::Duration},
};

pub const DEFAULT_API_URL: &str = "https://challenge.crossmint.io/api";

/// `Config` は一回の実行で使う API の接続先と再送方針を表す.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub candidate_id: String,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Config {
    /// 環境変数から読み込む. `net` が有効なら先に `.env` を読む.
    pub fn from_env() -> Result<Self> {
        #[cfg(feature = "net")]
        dotenv::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let candidate_id = var("CANDIDATE_ID")
            .filter(|id| !id.trim().is_empty())
            .context("set CANDIDATE_ID environment variable")?;

        let api_url = var("MEGAVERSE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let defaults = RetryPolicy::default();
        let max_retries = parse_or(&var, "MEGAVERSE_MAX_RETRIES", defaults.max_retries)?;
        let backoff_ms = parse_or(
            &var,
            "MEGAVERSE_BACKOFF_MS",
            defaults.backoff_base.as_millis() as u64,
        )?;
        let timeout_secs = parse_or(&var, "MEGAVERSE_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            api_url,
            candidate_id,
            retry: RetryPolicy {
                max_retries,
                backoff_base: Duration::from_millis(backoff_ms),
                ..defaults
            },
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("failed to parse {}. raw: '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map = pairs
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect::<std::collections::HashMap<_, _>>();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_vars(vars(&[("CANDIDATE_ID", "abc")])).unwrap();
    assert_eq!(config.candidate_id, "abc");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.retry, RetryPolicy::default());
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_overrides() {
    let config = Config::from_vars(vars(&[
        ("CANDIDATE_ID", "abc"),
        ("MEGAVERSE_API_URL", "http://localhost:8080/api"),
        ("MEGAVERSE_MAX_RETRIES", "2"),
        ("MEGAVERSE_BACKOFF_MS", " 250 "),
    ]))
    .unwrap();
    assert_eq!(config.api_url, "http://localhost:8080/api");
    assert_eq!(config.retry.max_retries, 2);
    assert_eq!(config.retry.backoff_base, Duration::from_millis(250));
    assert_eq!(config.retry.retry_statuses, vec![429]);
}

#[test]
fn test_missing_or_broken() {
    assert!(Config::from_vars(vars(&[])).is_err());
    assert!(Config::from_vars(vars(&[("CANDIDATE_ID", "  ")])).is_err());

    let err = Config::from_vars(vars(&[
        ("CANDIDATE_ID", "abc"),
        ("MEGAVERSE_MAX_RETRIES", "many"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("MEGAVERSE_MAX_RETRIES"));
}
