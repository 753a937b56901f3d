//! 주문 생성, 취소, 조회 (인증 API).
//!
//! 주문 생성/취소는 재시도하지 않습니다. 응답을 받지 못한 주문은
//! `get_open_orders` 또는 `get_order_detail`로 상태를 확인한 뒤 재전송해야 합니다.

use super::{check_time_range, validate_date_format, validate_path_segment, validate_positive};
use crate::client::HuobiRestClient;
use crate::query::QueryParams;
use crate::serde_helpers::comma_separated;
use crate::types::{Direct, OrderSource, OrderState, OrderType, Side, StopOperator};
use huobi_core::{Envelope, HuobiResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use validator::{Validate, ValidationError};

const PLACE_ORDER_PATH: &str = "/v1/order/orders/place";
const BATCH_ORDERS_PATH: &str = "/v1/order/batch-orders";
const CANCEL_CLIENT_ORDER_PATH: &str = "/v1/order/orders/submitCancelClientOrder";
const BATCH_CANCEL_PATH: &str = "/v1/order/orders/batchcancel";
const CANCEL_OPEN_ORDERS_PATH: &str = "/v1/order/orders/batchCancelOpenOrders";
const SWAP_ORDER_INFO_PATH: &str = "/linear-swap-api/v1/swap_order_info";
const OPEN_ORDERS_PATH: &str = "/v1/order/openOrders";
const HISTORY_ORDERS_PATH: &str = "/v1/order/orders";

/// 일괄 취소 최대 ID 개수.
pub const MAX_BATCH_CANCEL_IDS: usize = 50;

fn order_path(order_id: &str) -> String {
    format!("/v1/order/orders/{}", order_id)
}

// ==================== 주문 생성 ====================

/// 가격/스탑 조건 조합 검증.
fn validate_place_order(request: &PlaceOrderRequest) -> Result<(), ValidationError> {
    let order_type = request.order_type;

    if order_type.is_market() && request.price.is_some() {
        return Err(ValidationError::new("market_order_with_price")
            .with_message("시장가 주문에는 가격을 지정할 수 없습니다".into()));
    }
    if !order_type.is_market() && request.price.is_none() {
        return Err(ValidationError::new("price_required")
            .with_message("지정가 주문에는 가격이 필요합니다".into()));
    }

    let has_stop = request.stop_price.is_some() || request.operator.is_some();
    if order_type.is_stop() {
        if request.stop_price.is_none() || request.operator.is_none() {
            return Err(ValidationError::new("stop_params_required")
                .with_message("스탑 주문에는 stop-price와 operator가 필요합니다".into()));
        }
    } else if has_stop {
        return Err(ValidationError::new("unexpected_stop_params")
            .with_message("스탑 주문이 아니면 stop-price와 operator를 지정할 수 없습니다".into()));
    }

    Ok(())
}

/// 주문 생성 요청.
///
/// `Decimal` 값은 문자열로 직렬화됩니다 (예: `"0.001"`).
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
#[validate(schema(function = "validate_place_order"))]
pub struct PlaceOrderRequest {
    /// 계좌 ID
    #[validate(length(min = 1, message = "계좌 ID가 필요합니다"))]
    pub account_id: String,
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 수량 (시장가 매수는 호가 통화 금액)
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_positive"))]
    pub price: Option<Decimal>,
    pub source: OrderSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "클라이언트 주문 ID는 1-64자여야 합니다"))]
    pub client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_positive"))]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<StopOperator>,
}

impl PlaceOrderRequest {
    /// 시장가 주문.
    pub fn market(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        order_type: OrderType,
        amount: Decimal,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            symbol: symbol.into(),
            order_type,
            amount,
            price: None,
            source: OrderSource::default(),
            client_order_id: None,
            stop_price: None,
            operator: None,
        }
    }

    /// 가격을 지정한 주문 (지정가, IOC, FOK, 메이커 등).
    pub fn limit(
        account_id: impl Into<String>,
        symbol: impl Into<String>,
        order_type: OrderType,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            price: Some(price),
            ..Self::market(account_id, symbol, order_type, amount)
        }
    }

    pub fn with_source(mut self, source: OrderSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    /// 스탑 조건 설정.
    pub fn with_stop(mut self, stop_price: Decimal, operator: StopOperator) -> Self {
        self.stop_price = Some(stop_price);
        self.operator = Some(operator);
        self
    }
}

/// 일괄 주문 요청 (최대 10건).
#[derive(Debug, Clone, Validate)]
pub struct BatchPlaceOrdersRequest {
    #[validate(length(min = 1, max = 10, message = "주문은 1-10개 사이여야 합니다"), nested)]
    pub orders: Vec<PlaceOrderRequest>,
}

impl BatchPlaceOrdersRequest {
    pub fn new(orders: Vec<PlaceOrderRequest>) -> Self {
        Self { orders }
    }
}

// ==================== 주문 취소 ====================

/// 주문 ID로 취소.
#[derive(Debug, Clone, Validate)]
pub struct CancelOrderRequest {
    #[validate(custom(function = "validate_path_segment"))]
    pub order_id: String,
}

impl CancelOrderRequest {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

/// 클라이언트 주문 ID로 취소.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CancelClientOrderRequest {
    #[validate(length(min = 1, max = 64, message = "클라이언트 주문 ID는 1-64자여야 합니다"))]
    pub client_order_id: String,
}

impl CancelClientOrderRequest {
    pub fn new(client_order_id: impl Into<String>) -> Self {
        Self {
            client_order_id: client_order_id.into(),
        }
    }
}

fn validate_batch_cancel(request: &BatchCancelRequest) -> Result<(), ValidationError> {
    let total = request.order_ids.len() + request.client_order_ids.len();
    if total == 0 {
        return Err(ValidationError::new("no_order_ids")
            .with_message("취소할 주문 ID가 하나 이상 필요합니다".into()));
    }
    if total > MAX_BATCH_CANCEL_IDS {
        return Err(ValidationError::new("too_many_order_ids")
            .with_message("한 번에 최대 50개 주문까지 취소할 수 있습니다".into()));
    }
    Ok(())
}

/// 일괄 취소 요청.
///
/// 본문에는 ID 목록이 JSON 배열로 들어갑니다.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
#[validate(schema(function = "validate_batch_cancel"))]
pub struct BatchCancelRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_order_ids: Vec<String>,
}

impl BatchCancelRequest {
    pub fn by_order_ids(order_ids: Vec<String>) -> Self {
        Self {
            order_ids,
            client_order_ids: Vec::new(),
        }
    }

    pub fn by_client_order_ids(client_order_ids: Vec<String>) -> Self {
        Self {
            order_ids: Vec::new(),
            client_order_ids,
        }
    }
}

/// 미체결 주문 전체 취소 요청.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CancelOpenOrdersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// 대상 심볼 (비어 있으면 전체)
    #[serde(
        rename = "symbol",
        serialize_with = "comma_separated",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub symbols: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// 취소 개수 (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100, message = "취소 개수는 0-100 사이여야 합니다"))]
    pub size: Option<u32>,
}

// ==================== 주문 조회 ====================

fn validate_order_info(request: &OrderInfoRequest) -> Result<(), ValidationError> {
    if request.order_ids.is_empty() && request.client_order_ids.is_empty() {
        return Err(ValidationError::new("no_order_ids")
            .with_message("order_id 또는 client_order_id가 필요합니다".into()));
    }
    Ok(())
}

/// 선형 스왑 주문 정보 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_order_info"))]
pub struct OrderInfoRequest {
    /// 계약 코드 (예: "BTC-USDT")
    #[validate(length(min = 1, message = "계약 코드가 필요합니다"))]
    pub contract_code: String,
    #[serde(
        rename = "order_id",
        serialize_with = "comma_separated",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[validate(length(max = 20, message = "주문 ID는 최대 20개입니다"))]
    pub order_ids: Vec<String>,
    #[serde(
        rename = "client_order_id",
        serialize_with = "comma_separated",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[validate(length(max = 20, message = "클라이언트 주문 ID는 최대 20개입니다"))]
    pub client_order_ids: Vec<String>,
}

/// 주문 상세 조회 요청.
#[derive(Debug, Clone, Validate)]
pub struct OrderDetailRequest {
    #[validate(custom(function = "validate_path_segment"))]
    pub order_id: String,
}

impl OrderDetailRequest {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

/// 미체결 주문 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct OpenOrdersRequest {
    #[validate(length(min = 1, message = "계좌 ID가 필요합니다"))]
    pub account_id: String,
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// 조회 시작 주문 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<Direct>,
    #[validate(range(min = 1, max = 500, message = "조회 개수는 1-500 사이여야 합니다"))]
    pub size: u32,
}

impl OpenOrdersRequest {
    pub fn new(account_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            symbol: symbol.into(),
            side: None,
            from: None,
            direct: None,
            size: default_page_size(),
        }
    }
}

fn validate_history_orders(request: &HistoryOrdersRequest) -> Result<(), ValidationError> {
    check_time_range(request.start_time, request.end_time)?;

    if let (Some(start), Some(end)) = (&request.start_date, &request.end_date) {
        // YYYY-MM-DD는 문자열 비교가 날짜 비교와 같음
        if start > end {
            return Err(ValidationError::new("invalid_date_range")
                .with_message("시작 날짜는 종료 날짜보다 늦을 수 없습니다".into()));
        }
    }
    Ok(())
}

/// 과거 주문 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "kebab-case")]
#[validate(schema(function = "validate_history_orders"))]
pub struct HistoryOrdersRequest {
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<OrderType>,
    /// 시작 시각 (UTC 밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// 시작 날짜 (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date_format"))]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date_format"))]
    pub end_date: Option<String>,
    /// 조회할 주문 상태 (하나 이상)
    #[serde(serialize_with = "comma_separated")]
    #[validate(length(min = 1, message = "주문 상태가 하나 이상 필요합니다"))]
    pub states: Vec<OrderState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<Direct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100, message = "조회 개수는 1-100 사이여야 합니다"))]
    pub size: Option<u32>,
}

impl HistoryOrdersRequest {
    pub fn new(symbol: impl Into<String>, states: Vec<OrderState>) -> Self {
        Self {
            symbol: symbol.into(),
            types: Vec::new(),
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            states,
            from: None,
            direct: None,
            size: None,
        }
    }
}

// ==================== 클라이언트 메서드 ====================

impl HuobiRestClient {
    /// 주문 생성.
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(
            symbol = %request.symbol,
            order_type = %request.order_type,
            amount = %request.amount,
            price = ?request.price,
            "Placing order"
        );

        let body = serde_json::to_value(request)?;
        self.post(PLACE_ORDER_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 일괄 주문 생성.
    pub async fn place_batch_orders(
        &self,
        request: &BatchPlaceOrdersRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(count = request.orders.len(), "Placing batch orders");

        let body = serde_json::to_value(&request.orders)?;
        self.post(BATCH_ORDERS_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 주문 취소.
    pub async fn cancel_order(&self, request: &CancelOrderRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(order_id = %request.order_id, "Cancelling order");

        let path = format!("{}/submitcancel", order_path(&request.order_id));
        self.post(&path, QueryParams::new(), None, true).await
    }

    /// 클라이언트 주문 ID로 주문 취소.
    pub async fn cancel_order_by_client_id(
        &self,
        request: &CancelClientOrderRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(client_order_id = %request.client_order_id, "Cancelling order by client id");

        let body = serde_json::to_value(request)?;
        self.post(CANCEL_CLIENT_ORDER_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 여러 주문 일괄 취소.
    pub async fn batch_cancel_orders(&self, request: &BatchCancelRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(
            order_ids = request.order_ids.len(),
            client_order_ids = request.client_order_ids.len(),
            "Cancelling orders in batch"
        );

        let body = serde_json::to_value(request)?;
        self.post(BATCH_CANCEL_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 미체결 주문 전체 취소.
    pub async fn cancel_open_orders(
        &self,
        request: &CancelOpenOrdersRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(symbols = ?request.symbols, side = ?request.side, "Cancelling open orders");

        let body = serde_json::to_value(request)?;
        self.post(CANCEL_OPEN_ORDERS_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 선형 스왑 주문 정보 조회.
    pub async fn get_order_info(&self, request: &OrderInfoRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(contract_code = %request.contract_code, "Fetching order info");

        let body = serde_json::to_value(request)?;
        self.post(SWAP_ORDER_INFO_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 주문 상세 조회.
    pub async fn get_order_detail(&self, request: &OrderDetailRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(order_id = %request.order_id, "Fetching order detail");

        self.post(&order_path(&request.order_id), QueryParams::new(), None, true)
            .await
    }

    /// 미체결 주문 조회.
    pub async fn get_open_orders(&self, request: &OpenOrdersRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, size = request.size, "Fetching open orders");

        let body = serde_json::to_value(request)?;
        self.post(OPEN_ORDERS_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// 과거 주문 조회.
    pub async fn get_history_orders(
        &self,
        request: &HistoryOrdersRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, "Fetching history orders");

        let query = QueryParams::from_serializable(request)?;
        self.get(HISTORY_ORDERS_PATH, query, true).await
    }
}
