//! 엔드포인트별 요청 타입과 호출 메서드.
//!
//! 각 호출은 요청 구조체를 `validator`로 검증한 뒤 디스패처에 위임합니다.
//! 검증 실패는 네트워크 요청 전에 `HuobiError::InvalidRequest`로 반환됩니다.

pub mod account;
pub mod etp;
pub mod market;
pub mod order;

pub use account::*;
pub use etp::*;
pub use market::*;
pub use order::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

// ==================== 공통 검증 함수 ====================

/// 0보다 큰 수량/가격 검증.
pub(crate) fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("not_positive")
            .with_message("값은 0보다 커야 합니다".into()));
    }
    Ok(())
}

/// URL 경로에 들어가는 ID 검증 (영숫자, `-`, `_`만 허용).
pub(crate) fn validate_path_segment(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(ValidationError::new("invalid_path_segment")
            .with_message("ID는 영숫자, '-', '_'로만 구성되어야 합니다".into()));
    }
    Ok(())
}

/// 날짜 형식 검증 (YYYY-MM-DD).
pub(crate) fn validate_date_format(value: &str) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ValidationError::new("invalid_date_format")
            .with_message("날짜 형식은 YYYY-MM-DD여야 합니다".into()));
    }
    Ok(())
}

/// 시작/종료 시각 순서 검증 (밀리초).
pub(crate) fn check_time_range(
    start: Option<i64>,
    end: Option<i64>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::new("invalid_time_range")
                .with_message("시작 시각은 종료 시각보다 늦을 수 없습니다".into()));
        }
    }
    Ok(())
}
