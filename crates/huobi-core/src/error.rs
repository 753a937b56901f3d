//! Huobi 클라이언트 에러 타입.

use crate::envelope::Envelope;
use thiserror::Error;

/// Huobi REST 호출 에러.
///
/// 전송 계층 실패, 거래소의 애플리케이션 거부, 요청 전 사전조건 실패를 구분합니다.
#[derive(Debug, Error)]
pub enum HuobiError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// 응답 본문 파싱 에러
    #[error("Parse error: {0}")]
    Parse(String),

    /// 거래소가 요청을 거부함 (`status != "ok"`)
    #[error("Request rejected: {0}")]
    Rejected(Envelope),

    /// 인증 요청에 필요한 자격증명 없음
    #[error("Missing API credentials for authenticated request")]
    MissingCredentials,

    /// 유효하지 않은 요청 (검증 실패, 잘못된 URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 설정 에러
    #[error("Config error: {0}")]
    Config(String),
}

/// Huobi 호출 결과 타입.
pub type HuobiResult<T> = Result<T, HuobiError>;

impl HuobiError {
    /// 전송 계층 에러인지 확인.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HuobiError::Network(_)
                | HuobiError::Timeout(_)
                | HuobiError::Http { .. }
                | HuobiError::Parse(_)
        )
    }

    /// 거래소 거부 에러인지 확인.
    pub fn is_rejection(&self) -> bool {
        matches!(self, HuobiError::Rejected(_))
    }

    /// 네트워크 시도 전에 발생한 에러인지 확인.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            HuobiError::MissingCredentials | HuobiError::InvalidRequest(_) | HuobiError::Config(_)
        )
    }

    /// 거부된 응답의 엔벨로프.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            HuobiError::Rejected(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// 거부된 응답의 거래소 에러 코드.
    pub fn err_code(&self) -> Option<String> {
        self.envelope().and_then(Envelope::err_code)
    }
}

impl From<reqwest::Error> for HuobiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HuobiError::Timeout(err.to_string())
        } else if err.is_decode() {
            HuobiError::Parse(err.to_string())
        } else {
            HuobiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HuobiError {
    fn from(err: serde_json::Error) -> Self {
        HuobiError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for HuobiError {
    fn from(err: url::ParseError) -> Self {
        HuobiError::InvalidRequest(format!("invalid url: {}", err))
    }
}

impl From<validator::ValidationErrors> for HuobiError {
    fn from(err: validator::ValidationErrors) -> Self {
        HuobiError::InvalidRequest(err.to_string())
    }
}

impl From<config::ConfigError> for HuobiError {
    fn from(err: config::ConfigError) -> Self {
        HuobiError::Config(err.to_string())
    }
}
