//! 계좌 간 이체 (인증 API).

use super::validate_positive;
use crate::client::HuobiRestClient;
use crate::query::QueryParams;
use crate::types::TransferDirection;
use huobi_core::{Envelope, HuobiResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use validator::Validate;

/// 현물/선물 이체 엔드포인트.
///
/// 설정된 호스트와 무관하게 항상 이 절대 URL로 요청하고, 서명도 이 호스트 기준으로 합니다.
pub const FUTURES_TRANSFER_URL: &str = "https://api.huobi.pro/v1/futures/transfer";

/// 현물/선물 계좌 이체 요청.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct FuturesTransferRequest {
    /// 통화 (예: "btc")
    #[validate(length(min = 1, max = 16, message = "통화는 1-16자여야 합니다"))]
    pub currency: String,
    /// 이체 수량 (소수점 8자리까지)
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub direction: TransferDirection,
}

impl FuturesTransferRequest {
    pub fn new(currency: impl Into<String>, amount: Decimal, direction: TransferDirection) -> Self {
        Self {
            currency: currency.into(),
            amount,
            direction,
        }
    }
}

impl HuobiRestClient {
    /// 현물/선물 계좌 간 이체.
    pub async fn transfer_spot_futures(
        &self,
        request: &FuturesTransferRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(
            currency = %request.currency,
            amount = %request.amount,
            direction = %request.direction,
            "Transferring between spot and futures"
        );

        let body = serde_json::to_value(request)?;
        self.post(FUTURES_TRANSFER_URL, QueryParams::new(), Some(body), true)
            .await
    }
}
