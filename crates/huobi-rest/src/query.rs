//! 쿼리 파라미터 컨테이너.

use huobi_core::{HuobiError, HuobiResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use url::form_urlencoded;

/// 인코딩하지 않는 문자: 영숫자, `-`, `.`, `_`, `~`.
///
/// 공백은 이 단계에서 그대로 두고 `+`로 바꿉니다.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b' ');

/// 쿼리 키/값 하나를 인코딩 (공백은 `+`, 그 외 예약 문자는 대문자 `%XX`).
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET)
        .to_string()
        .replace(' ', "+")
}

/// `key=value` 쌍을 주어진 순서대로 `&`로 이어 붙임.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// 삽입 순서를 보존하는 쿼리 파라미터 목록.
///
/// 키는 유일하며, 이미 있는 키를 다시 넣으면 같은 위치의 값이 교체됩니다.
/// URL에는 삽입 순서대로 직렬화되고, 서명 시에만 키 순으로 정렬됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// 빈 파라미터 목록 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 직렬화 가능한 요청 구조체에서 생성.
    ///
    /// 필드 선언 순서가 그대로 쿼리 순서가 됩니다.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> HuobiResult<Self> {
        let encoded = serde_urlencoded::to_string(value)
            .map_err(|e| HuobiError::InvalidRequest(format!("query encoding failed: {}", e)))?;

        Ok(form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect())
    }

    /// 값 삽입 (기존 키는 제자리에서 교체).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// 빌더 스타일 삽입.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// 키에 해당하는 값.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 키 제거.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 삽입 순서대로 순회.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 키 순서로 정렬한 목록 (바이트 단위 비교).
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    /// 삽입 순서대로 form-urlencoded 문자열 생성.
    pub fn to_query_string(&self) -> String {
        encode_pairs(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
