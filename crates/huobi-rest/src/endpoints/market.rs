//! 시세 조회 (공개 API).

use crate::client::HuobiRestClient;
use crate::query::QueryParams;
use crate::types::{DepthStep, KlinePeriod};
use huobi_core::{Envelope, HuobiResult};
use serde::Serialize;
use tracing::debug;
use validator::{Validate, ValidationError};

const DEPTH_PATH: &str = "/market/depth";
const KLINE_PATH: &str = "/market/history/kline";

/// 허용되는 호가 깊이.
pub const DEPTH_LEVELS: [u32; 3] = [5, 10, 20];

fn validate_depth(value: u32) -> Result<(), ValidationError> {
    if !DEPTH_LEVELS.contains(&value) {
        return Err(ValidationError::new("invalid_depth")
            .with_message("호가 깊이는 5, 10, 20 중 하나여야 합니다".into()));
    }
    Ok(())
}

/// 호가 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct DepthRequest {
    /// 거래 심볼 (예: "btcusdt")
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    /// 병합 단계
    #[serde(rename = "type")]
    pub step: DepthStep,
    /// 호가 깊이 (5, 10, 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_depth"))]
    pub depth: Option<u32>,
}

impl DepthRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            step: DepthStep::default(),
            depth: None,
        }
    }

    pub fn with_step(mut self, step: DepthStep) -> Self {
        self.step = step;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

/// 캔들 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct KlineRequest {
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    pub period: KlinePeriod,
    /// 조회 개수 (1-2000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 2000, message = "조회 개수는 1-2000 사이여야 합니다"))]
    pub size: Option<u32>,
}

impl KlineRequest {
    pub fn new(symbol: impl Into<String>, period: KlinePeriod) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            size: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

impl HuobiRestClient {
    /// 호가창 조회.
    pub async fn get_orderbook(&self, request: &DepthRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, step = %request.step, "Fetching order book");

        let query = QueryParams::from_serializable(request)?;
        self.get(DEPTH_PATH, query, false).await
    }

    /// 캔들 조회.
    pub async fn get_klines(&self, request: &KlineRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, period = %request.period, "Fetching klines");

        let query = QueryParams::from_serializable(request)?;
        self.get(KLINE_PATH, query, false).await
    }
}
