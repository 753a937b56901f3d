//! API 자격증명.
//!
//! 시크릿 키는 `SecretString`으로 보관하며 로그나 직렬화 경로에 노출하지 않습니다.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Huobi API 키 쌍.
///
/// 클라이언트 수명 동안 변경되지 않습니다.
///
/// # 보안
/// - `Debug` 구현은 `access_key`를 마스킹하고 `secret_key`를 출력하지 않습니다.
pub struct Credentials {
    access_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// 새 자격증명 생성.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let secret_key: String = secret_key.into();
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key),
        }
    }

    /// `AccessKeyId` 파라미터로 전송되는 접근 키.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// 서명용 시크릿 키.
    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }

    /// 두 키가 모두 비어 있지 않은지 확인.
    pub fn is_complete(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.expose_secret().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &mask_key(&self.access_key))
            .field("secret_key", &"***REDACTED***")
            .finish()
    }
}

/// 키의 앞뒤 4글자만 남기고 마스킹.
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***REDACTED***".to_string()
    }
}
