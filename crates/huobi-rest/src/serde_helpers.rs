//! 요청 직렬화 헬퍼.

use serde::Serializer;
use std::fmt::Display;

/// 목록을 쉼표로 이어 붙인 문자열로 직렬화.
///
/// 빈 목록은 `skip_serializing_if = "Vec::is_empty"`와 함께 사용해 생략합니다.
pub fn comma_separated<S, T>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}
