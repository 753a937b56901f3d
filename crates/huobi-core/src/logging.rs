//! 로깅 초기화.
//!
//! 디스패처는 호출마다 `huobi_request` span을 열고 그 안에서 서명, 전송,
//! 응답 해석 이벤트를 남깁니다. 여기서는 그 이벤트를 받을 subscriber를 구성합니다.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 터미널용 여러 줄 형식
    #[default]
    Pretty,
    /// 한 줄 JSON (로그 수집기용)
    Json,
    /// 한 줄 텍스트
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` 지시어 (예: "info", "huobi_rest=debug")
    pub level: String,
    pub format: LogFormat,
    /// `huobi_request` span의 시작/종료 기록 여부
    pub span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            span_events: false,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 요청 span의 시작/종료를 기록합니다 (요청별 소요 시간 확인용).
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// 형식에 맞는 fmt 레이어.
    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer().with_span_events(self.span_events());

        match self.format {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
        }
    }
}

/// 전역 subscriber 설정.
///
/// `RUST_LOG`가 있으면 `config.level`보다 우선합니다.
/// 이미 subscriber가 설정되어 있으면 에러를 반환합니다.
///
/// ```no_run
/// use huobi_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("huobi_rest=debug").with_format(LogFormat::Json);
/// init_logging(config).expect("logging");
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(env_filter)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        span_events = config.span_events,
        "Logging initialized"
    );

    Ok(())
}

/// 요청 한 건의 span (`method`, `path`, `auth` 필드).
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr, $auth:expr) => {
        tracing::debug_span!(
            "huobi_request",
            method = %$method,
            path = %$path,
            auth = $auth
        )
    };
}
