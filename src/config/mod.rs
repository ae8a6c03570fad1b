use crate::error::ClientError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_STORE_PATH: &str = ".auction-client.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub store_path: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 읽기 (없으면 기본값)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = var_or(&lookup, "AUCTION_API_URL", DEFAULT_API_URL);
        let store_path = var_or(&lookup, "AUCTION_STORE_PATH", DEFAULT_STORE_PATH);
        let timeout_secs = var_or(
            &lookup,
            "AUCTION_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        );

        let timeout_secs: u64 = timeout_secs.trim().parse().map_err(|e| {
            ClientError::Config(format!("AUCTION_TIMEOUT_SECS 값이 올바르지 않습니다: {e}"))
        })?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            store_path: PathBuf::from(store_path),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{:<12} --> {key} 미설정, 기본값 사용: {default}", "Config");
        default.to_string()
    })
}
