//! 클라이언트 설정.
//!
//! 설정 소스 우선순위 (높은 순):
//! 1. `HUOBI_` 접두사 환경 변수 (예: `HUOBI_ACCESS_KEY`)
//! 2. 설정 파일 (TOML 등 `config` 크레이트가 지원하는 형식)
//! 3. 기본값

use crate::credentials::{mask_key, Credentials};
use crate::error::{HuobiError, HuobiResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::warn;
use url::Url;

/// 기본 REST 호스트.
pub const DEFAULT_HOST: &str = "https://api.huobi.pro";

/// 요청 타임아웃 기본값 (초).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 모든 요청에 붙는 `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("huobi-rest/", env!("CARGO_PKG_VERSION"));

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Huobi REST 클라이언트 설정.
///
/// # 보안
/// - `Serialize`를 구현하지 않으며, `Debug`는 키를 마스킹합니다.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// REST 기본 URL
    #[serde(default = "default_host")]
    pub host: String,
    /// API 접근 키
    #[serde(default)]
    pub access_key: Option<String>,
    /// API 시크릿 키
    #[serde(default)]
    pub secret_key: Option<String>,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 클라이언트 식별 헤더
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("access_key", &self.access_key.as_deref().map(mask_key))
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "***REDACTED***"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            access_key: None,
            secret_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// 호스트만 지정한 설정 생성 (공개 API 전용).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// API 키 설정.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// 요청 타임아웃 설정.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// 식별 헤더 설정.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// 환경 변수에서 생성.
    ///
    /// # 환경 변수
    /// - `HUOBI_HOST` (기본: `https://api.huobi.pro`)
    /// - `HUOBI_ACCESS_KEY`, `HUOBI_SECRET_KEY`
    /// - `HUOBI_TIMEOUT_SECS` (기본: 10)
    pub fn from_env() -> Self {
        let host = std::env::var("HUOBI_HOST").unwrap_or_else(|_| default_host());
        let timeout_secs = std::env::var("HUOBI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            host,
            access_key: std::env::var("HUOBI_ACCESS_KEY").ok(),
            secret_key: std::env::var("HUOBI_SECRET_KEY").ok(),
            timeout_secs,
            user_agent: default_user_agent(),
        }
    }

    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("HUOBI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("user_agent", DEFAULT_USER_AGENT)
    }

    /// 설정 값 검증.
    pub fn validate(&self) -> HuobiResult<()> {
        let url = Url::parse(&self.host)
            .map_err(|e| HuobiError::Config(format!("invalid host {}: {}", self.host, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(HuobiError::Config(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(HuobiError::Config(format!("host has no hostname: {}", self.host)));
        }

        if self.timeout_secs == 0 {
            return Err(HuobiError::Config("timeout_secs must be positive".to_string()));
        }

        Ok(())
    }

    /// 설정된 키로 자격증명 생성.
    ///
    /// 두 키가 모두 비어 있지 않아야 하며, 하나만 있거나 빈 키가 있으면 경고 후
    /// `None`을 반환합니다.
    pub fn credentials(&self) -> Option<Credentials> {
        let creds = match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                Credentials::new(access_key.clone(), secret_key.clone())
            }
            (None, None) => return None,
            _ => {
                warn!("Only one of access_key/secret_key is configured; ignoring credentials");
                return None;
            }
        };

        if !creds.is_complete() {
            warn!("access_key or secret_key is empty; ignoring credentials");
            return None;
        }
        Some(creds)
    }
}
