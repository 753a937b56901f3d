//! Huobi API 서명 (Signature Version 2).
//!
//! 서명 대상 문자열은 다음 네 줄을 `\n`으로 이어 붙인 것입니다:
//!
//! ```text
//! GET
//! api.huobi.pro
//! /v1/order/orders
//! AccessKeyId=...&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=...
//! ```
//!
//! 쿼리는 키 순으로 정렬한 뒤 인코딩합니다. 영숫자와 `-._~`만 그대로 두고
//! 공백은 `+`, 나머지는 대문자 `%XX`로 바꿉니다.
//! HMAC-SHA256 결과를 base64로 인코딩한 값이 `Signature` 파라미터가 됩니다.
//! 이 모듈은 시계를 읽지 않으며, 같은 입력에는 항상 같은 서명을 만듭니다.

use crate::query::{encode_pairs, QueryParams};
use base64::Engine;
use hmac::{Hmac, Mac};
use huobi_core::{HuobiError, HuobiResult};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// 접근 키 파라미터 이름.
pub const ACCESS_KEY_ID: &str = "AccessKeyId";
/// 서명 방식 파라미터 이름.
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
/// 서명 버전 파라미터 이름.
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
/// 타임스탬프 파라미터 이름.
pub const TIMESTAMP: &str = "Timestamp";
/// 서명 파라미터 이름.
pub const SIGNATURE: &str = "Signature";

/// `SignatureMethod` 값.
pub const SIGNATURE_METHOD_VALUE: &str = "HmacSHA256";
/// `SignatureVersion` 값.
pub const SIGNATURE_VERSION_VALUE: &str = "2";
/// `Timestamp` 형식 (UTC, 초 단위, 시간대 접미사 없음).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `http://` 또는 `https://`로 시작하는 절대 URL인지 확인.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// 서명에 사용할 호스트와 경로.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningTarget {
    /// 소문자 호스트명 (포트 제외)
    pub host: String,
    /// 요청 경로
    pub path: String,
}

/// 서명 대상 호스트/경로 결정.
///
/// 절대 URL이면 그 URL의 호스트명과 경로를, 아니면 기본 호스트의 호스트명과
/// 전달된 경로를 그대로 사용합니다.
pub fn resolve_signing_target(path: &str, base_host: &str) -> HuobiResult<SigningTarget> {
    if is_absolute(path) {
        let url = Url::parse(path)?;
        return Ok(SigningTarget {
            host: hostname(&url)?,
            path: url.path().to_string(),
        });
    }

    let base = Url::parse(base_host)?;
    Ok(SigningTarget {
        host: hostname(&base)?,
        path: path.to_string(),
    })
}

fn hostname(url: &Url) -> HuobiResult<String> {
    url.host_str()
        .map(str::to_lowercase)
        .ok_or_else(|| HuobiError::InvalidRequest(format!("url has no host: {}", url)))
}

/// 정렬된 쿼리 문자열 (서명 대상).
///
/// `Signature` 키는 제외합니다.
pub fn encode_sorted(params: &QueryParams) -> String {
    encode_pairs(
        params
            .sorted()
            .into_iter()
            .filter(|(key, _)| *key != SIGNATURE),
    )
}

/// 서명 대상 문자열 생성.
pub fn canonical_payload(method: &Method, host: &str, path: &str, params: &QueryParams) -> String {
    [
        method.as_str().to_ascii_uppercase(),
        host.to_string(),
        path.to_string(),
        encode_sorted(params),
    ]
    .join("\n")
}

/// 요청 서명.
///
/// # 인자
/// * `method` - HTTP 메서드
/// * `path` - 상대 경로 또는 절대 URL
/// * `params` - 인증 필드를 포함한 서명 전 쿼리 (`Signature`는 무시)
/// * `base_host` - 상대 경로일 때 사용할 기본 URL
/// * `secret` - 시크릿 키
pub fn sign(
    method: &Method,
    path: &str,
    params: &QueryParams,
    base_host: &str,
    secret: &SecretString,
) -> HuobiResult<String> {
    let target = resolve_signing_target(path, base_host)?;
    let payload = canonical_payload(method, &target.host, &target.path, params);
    hmac_base64(secret.expose_secret().as_bytes(), payload.as_bytes())
}

/// HMAC-SHA256 후 base64 인코딩.
fn hmac_base64(key: &[u8], payload: &[u8]) -> HuobiResult<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| HuobiError::InvalidRequest(format!("invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOST: &str = "https://api.huobi.pro";

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn auth_params(access_key: &str, timestamp: &str) -> QueryParams {
        QueryParams::new()
            .with(ACCESS_KEY_ID, access_key)
            .with(SIGNATURE_METHOD, SIGNATURE_METHOD_VALUE)
            .with(SIGNATURE_VERSION, SIGNATURE_VERSION_VALUE)
            .with(TIMESTAMP, timestamp)
    }

    #[test]
    fn test_known_signature() {
        let params = auth_params("e2xxxxxx-99xxxxxx-84xxxxxx-7xxxx", "2017-05-11T15:19:30")
            .with("order-id", "1234567890");

        let signature = sign(
            &Method::GET,
            "/v1/order/orderDetail",
            &params,
            HOST,
            &secret("b0xxxxxx-c6xxxxxx-94xxxxxx-dxxxx"),
        )
        .unwrap();

        assert_eq!(signature, "955yCQObttwABdrKmmVwYfwaN1GVcBIvpobvduwuIIU=");
    }

    #[test]
    fn test_canonical_payload() {
        let params = auth_params("access", "2020-09-10T08:00:00");
        let payload = canonical_payload(&Method::POST, "api.huobi.pro", "/v1/order/orders/place", &params);

        assert_eq!(
            payload,
            "POST\napi.huobi.pro\n/v1/order/orders/place\n\
             AccessKeyId=access&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=2020-09-10T08%3A00%3A00"
        );
    }

    #[test]
    fn test_post_signature() {
        let params = auth_params("access", "2020-09-10T08:00:00");
        let signature = sign(
            &Method::POST,
            "/v1/order/orders/place",
            &params,
            HOST,
            &secret("secret"),
        )
        .unwrap();

        assert_eq!(signature, "kJbnx+BeVj5xblRPe4HjvMzKDEtxEI3O4LsqjxolgRY=");
    }

    #[test]
    fn test_absolute_url_overrides_host() {
        let target = resolve_signing_target("https://API.Example.com/v1/x", HOST).unwrap();
        assert_eq!(target.host, "api.example.com");
        assert_eq!(target.path, "/v1/x");

        let params = auth_params("access", "2020-09-10T08:00:00");
        let signature = sign(
            &Method::POST,
            "https://api.example.com/v1/x",
            &params,
            HOST,
            &secret("secret"),
        )
        .unwrap();
        assert_eq!(signature, "04YV1xH/rn2avmur4bL+2GVnPlG+3nv1T/yhoGDiXF4=");
    }

    #[test]
    fn test_relative_path_uses_base_host() {
        let target = resolve_signing_target("/market/depth", "https://api.huobi.pro:443").unwrap();
        assert_eq!(target.host, "api.huobi.pro");
        assert_eq!(target.path, "/market/depth");
    }

    #[test]
    fn test_invalid_base_host() {
        let err = resolve_signing_target("/market/depth", "api.huobi.pro").unwrap_err();
        assert!(matches!(err, HuobiError::InvalidRequest(_)));
    }

    #[test]
    fn test_encode_sorted_reserved_characters() {
        let params = QueryParams::new().with("b", "1 2").with("a", "x*y~z!");
        assert_eq!(encode_sorted(&params), "a=x%2Ay~z%21&b=1+2");
    }

    #[test]
    fn test_method_case() {
        let params = auth_params("access", "2020-09-10T08:00:00");
        let lower = Method::from_bytes(b"post").unwrap();
        let payload = canonical_payload(&lower, "h", "/p", &params);
        assert!(payload.starts_with("POST\n"));
    }

    #[test]
    fn test_signature_placeholder_ignored() {
        let params = auth_params("access", "2020-09-10T08:00:00");
        let with_placeholder = params.clone().with(SIGNATURE, "placeholder");

        let a = sign(&Method::GET, "/v1/order/orders", &params, HOST, &secret("s")).unwrap();
        let b = sign(&Method::GET, "/v1/order/orders", &with_placeholder, HOST, &secret("s")).unwrap();
        assert_eq!(a, b);
    }

    fn params_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::btree_map("[a-z][a-z-]{0,11}", "[ -~]{0,16}", 1..8)
            .prop_map(|map| map.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_signing_is_deterministic(pairs in params_strategy()) {
            let params: QueryParams = pairs.into_iter().collect();
            let a = sign(&Method::GET, "/v1/x", &params, HOST, &secret("k")).unwrap();
            let b = sign(&Method::GET, "/v1/x", &params, HOST, &secret("k")).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_insertion_order_does_not_matter(pairs in params_strategy()) {
            let forward: QueryParams = pairs.iter().cloned().collect();
            let reversed: QueryParams = pairs.iter().rev().cloned().collect();

            let a = sign(&Method::POST, "/v1/x", &forward, HOST, &secret("k")).unwrap();
            let b = sign(&Method::POST, "/v1/x", &reversed, HOST, &secret("k")).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_value_change_changes_signature(pairs in params_strategy(), extra in "[a-z]{1,8}") {
            let original: QueryParams = pairs.iter().cloned().collect();
            let mut changed = original.clone();
            let (key, value) = &pairs[0];
            changed.insert(key.clone(), format!("{}{}", value, extra));

            let a = sign(&Method::GET, "/v1/x", &original, HOST, &secret("k")).unwrap();
            let b = sign(&Method::GET, "/v1/x", &changed, HOST, &secret("k")).unwrap();
            prop_assert_ne!(a, b);
        }
    }
}
