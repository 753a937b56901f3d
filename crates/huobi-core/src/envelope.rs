//! 거래소 응답 엔벨로프.
//!
//! Huobi는 모든 응답을 최상위 JSON 객체로 감쌉니다.
//! v1 API는 `status`/`err-code`/`err-msg`, v2 API는 `code`/`message`를 사용합니다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 성공 응답의 `status` 값.
pub const STATUS_OK: &str = "ok";

/// 디코딩된 응답 본문.
///
/// 호출 간에 상태를 유지하지 않으며, 원본 JSON을 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// JSON 값으로 엔벨로프 생성.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 응답 본문 문자열을 파싱.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body).map(Self)
    }

    /// `status` 필드 반환.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// `status == "ok"` 여부.
    pub fn is_ok(&self) -> bool {
        self.status() == Some(STATUS_OK)
    }

    /// 거래소 에러 코드.
    ///
    /// v1의 `err-code`를 우선하고, 없으면 v2의 `code`를 문자열로 반환합니다.
    pub fn err_code(&self) -> Option<String> {
        if let Some(code) = self.0.get("err-code").and_then(Value::as_str) {
            return Some(code.to_string());
        }

        match self.0.get("code") {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        }
    }

    /// 거래소 에러 메시지.
    pub fn err_msg(&self) -> Option<&str> {
        self.0
            .get("err-msg")
            .or_else(|| self.0.get("message"))
            .and_then(Value::as_str)
    }

    /// 결과 페이로드 (`data`, 시세 API는 `tick`).
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data").or_else(|| self.0.get("tick"))
    }

    /// 결과 페이로드를 지정한 타입으로 역직렬화.
    ///
    /// 페이로드가 없으면 `null`에서 역직렬화를 시도합니다.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self.data() {
            Some(value) => T::deserialize(value),
            None => T::deserialize(&Value::Null),
        }
    }

    /// 원본 JSON 참조.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 원본 JSON 반환.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_status() {
        let envelope = Envelope::new(json!({"status": "ok", "data": 1}));
        assert!(envelope.is_ok());
        assert_eq!(envelope.status(), Some("ok"));
        assert_eq!(envelope.data(), Some(&json!(1)));
    }

    #[test]
    fn test_missing_status_is_not_ok() {
        let envelope = Envelope::new(json!({"code": 200, "success": true, "data": []}));
        assert!(!envelope.is_ok());
        assert_eq!(envelope.status(), None);
    }

    #[test]
    fn test_v1_error_fields() {
        let envelope = Envelope::from_body(
            r#"{"status":"error","err-code":"order-orderstate-error","err-msg":"invalid state"}"#,
        )
        .unwrap();

        assert!(!envelope.is_ok());
        assert_eq!(envelope.err_code().as_deref(), Some("order-orderstate-error"));
        assert_eq!(envelope.err_msg(), Some("invalid state"));
    }

    #[test]
    fn test_v2_error_fields() {
        let envelope = Envelope::new(json!({"code": 13403, "message": "insufficient", "success": false}));
        assert_eq!(envelope.err_code().as_deref(), Some("13403"));
        assert_eq!(envelope.err_msg(), Some("insufficient"));
    }

    #[test]
    fn test_tick_payload() {
        #[derive(Deserialize)]
        struct Tick {
            version: u64,
        }

        let envelope = Envelope::new(json!({"status": "ok", "tick": {"version": 7}}));
        let tick: Tick = envelope.data_as().unwrap();
        assert_eq!(tick.version, 7);
    }

    #[test]
    fn test_data_as_without_payload() {
        let envelope = Envelope::new(json!({"status": "ok"}));
        let data: Option<Vec<u64>> = envelope.data_as().unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_invalid_body() {
        assert!(Envelope::from_body("<html>bad gateway</html>").is_err());
    }
}
