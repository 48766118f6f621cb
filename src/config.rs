use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: String,
    pub retry_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let practicum_token = get("PRACTICUM_TOKEN");
        let telegram_token = get("TELEGRAM_TOKEN").or_else(|| get("TOKEN"));
        let chat_id = get("TELEGRAM_CHAT_ID");

        let mut missing = Vec::new();
        if practicum_token.is_none() {
            missing.push("PRACTICUM_TOKEN");
        }
        if telegram_token.is_none() {
            missing.push("TELEGRAM_TOKEN");
        }
        if chat_id.is_none() {
            missing.push("TELEGRAM_CHAT_ID");
        }
        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        };

        let retry_secs = match get("RETRY_TIME") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("RETRY_TIME must be a number of seconds, got {:?}", raw))?;
                if secs == 0 {
                    bail!("RETRY_TIME must be positive");
                }
                secs
            }
            None => DEFAULT_RETRY_SECS,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint: ENDPOINT.to_string(),
            retry_interval: Duration::from_secs(retry_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const FULL: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "p"),
        ("TELEGRAM_TOKEN", "t"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn loads_required_values_with_defaults() {
        let config = load(&FULL).unwrap();
        assert_eq!(config.practicum_token, "p");
        assert_eq!(config.telegram_token, "t");
        assert_eq!(config.chat_id, "42");
        assert_eq!(config.endpoint, ENDPOINT);
        assert_eq!(config.retry_interval, Duration::from_secs(600));
    }

    #[test]
    fn legacy_token_name_is_accepted() {
        let config = load(&[
            ("PRACTICUM_TOKEN", "p"),
            ("TOKEN", "legacy"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .unwrap();
        assert_eq!(config.telegram_token, "legacy");
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = load(&[("TELEGRAM_TOKEN", "t")]).unwrap_err().to_string();
        assert!(err.contains("PRACTICUM_TOKEN"));
        assert!(err.contains("TELEGRAM_CHAT_ID"));
        assert!(!err.contains("TELEGRAM_TOKEN,"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = load(&[
            ("PRACTICUM_TOKEN", "  "),
            ("TELEGRAM_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PRACTICUM_TOKEN"));
    }

    #[test]
    fn retry_time_override() {
        let mut vars = FULL.to_vec();
        vars.push(("RETRY_TIME", "30"));
        assert_eq!(load(&vars).unwrap().retry_interval, Duration::from_secs(30));
    }

    #[test]
    fn invalid_retry_time_is_rejected() {
        for bad in ["0", "ten"] {
            let mut vars = FULL.to_vec();
            vars.push(("RETRY_TIME", bad));
            assert!(load(&vars).is_err(), "accepted RETRY_TIME={}", bad);
        }
    }
}
