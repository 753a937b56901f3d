//! ETP(레버리지 토큰) 조회, 생성, 상환.

use super::{check_time_range, validate_positive};
use crate::client::HuobiRestClient;
use crate::query::QueryParams;
use crate::serde_helpers::comma_separated;
use crate::types::{EtpTransactStatus, EtpTransactType, SortOrder};
use huobi_core::{Envelope, HuobiResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use validator::{Validate, ValidationError};

const REFERENCE_PATH: &str = "/v2/etp/reference";
const NAV_PATH: &str = "/market/etp";
const CREATION_PATH: &str = "/v2/etp/creation";
const REDEMPTION_PATH: &str = "/v2/etp/redemption";
const TRANSACTIONS_PATH: &str = "/v2/etp/transactions";
const TRANSACTION_PATH: &str = "/v2/etp/transaction";
const REBALANCE_PATH: &str = "/v2/etp/rebalance";

/// 페이지 조회 기본 개수.
pub const DEFAULT_ETP_LIMIT: u32 = 100;

/// ETP 기준 정보 조회 요청.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EtpReferenceRequest {
    /// ETP 이름 (없으면 전체)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "ETP 이름이 비어 있습니다"))]
    pub etp_name: Option<String>,
}

/// ETP 순자산가치 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EtpNavRequest {
    /// ETP 심볼 (예: "btc3lusdt")
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
}

/// ETP 생성 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEtpRequest {
    #[validate(length(min = 1, message = "ETP 이름이 필요합니다"))]
    pub etp_name: String,
    /// 생성 금액
    #[validate(custom(function = "validate_positive"))]
    pub value: Decimal,
    /// 결제 통화 (예: "usdt")
    #[validate(length(min = 1, message = "통화가 필요합니다"))]
    pub currency: String,
}

/// ETP 상환 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemEtpRequest {
    #[validate(length(min = 1, message = "ETP 이름이 필요합니다"))]
    pub etp_name: String,
    #[validate(length(min = 1, message = "통화가 필요합니다"))]
    pub currency: String,
    /// 상환 수량
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
}

fn validate_transactions(request: &EtpTransactionsRequest) -> Result<(), ValidationError> {
    check_time_range(request.start_time, request.end_time)
}

/// ETP 거래 내역 조회 요청.
///
/// 빈 목록 필터는 전송하지 않으며, 거래소는 이를 "전체"로 해석합니다.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_transactions"))]
pub struct EtpTransactionsRequest {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub etp_names: Vec<String>,
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub currencies: Vec<String>,
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub transact_types: Vec<EtpTransactType>,
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub transact_status: Vec<EtpTransactStatus>,
    /// 시작 시각 (UTC 밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[validate(range(min = 1, max = 500, message = "조회 개수는 1-500 사이여야 합니다"))]
    pub limit: u32,
    /// 조회 시작 거래 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
}

impl Default for EtpTransactionsRequest {
    fn default() -> Self {
        Self {
            etp_names: Vec::new(),
            currencies: Vec::new(),
            transact_types: Vec::new(),
            transact_status: Vec::new(),
            start_time: None,
            end_time: None,
            sort: None,
            limit: DEFAULT_ETP_LIMIT,
            from_id: None,
        }
    }
}

/// ETP 거래 단건 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EtpTransactionRequest {
    #[validate(range(min = 0, message = "거래 ID는 음수일 수 없습니다"))]
    pub transact_id: i64,
}

fn validate_rebalance(request: &EtpRebalanceRequest) -> Result<(), ValidationError> {
    check_time_range(request.start_time, request.end_time)
}

/// ETP 리밸런싱 내역 조회 요청.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rebalance"))]
pub struct EtpRebalanceRequest {
    #[validate(length(min = 1, max = 32, message = "심볼은 1-32자여야 합니다"))]
    pub symbol: String,
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub rebal_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[validate(range(min = 1, max = 500, message = "조회 개수는 1-500 사이여야 합니다"))]
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
}

impl EtpRebalanceRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            rebal_types: Vec::new(),
            start_time: None,
            end_time: None,
            sort: None,
            limit: DEFAULT_ETP_LIMIT,
            from_id: None,
        }
    }
}

impl HuobiRestClient {
    /// ETP 기준 정보 조회.
    pub async fn get_etp_reference(&self, request: &EtpReferenceRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(etp_name = ?request.etp_name, "Fetching ETP reference");

        let query = QueryParams::from_serializable(request)?;
        self.get(REFERENCE_PATH, query, false).await
    }

    /// ETP 순자산가치 조회.
    pub async fn get_etp_nav(&self, request: &EtpNavRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, "Fetching ETP NAV");

        let query = QueryParams::from_serializable(request)?;
        self.get(NAV_PATH, query, false).await
    }

    /// ETP 생성.
    pub async fn create_etp(&self, request: &CreateEtpRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(
            etp_name = %request.etp_name,
            value = %request.value,
            currency = %request.currency,
            "Creating ETP"
        );

        let body = serde_json::to_value(request)?;
        self.post(CREATION_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// ETP 상환.
    pub async fn redeem_etp(&self, request: &RedeemEtpRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        info!(
            etp_name = %request.etp_name,
            amount = %request.amount,
            currency = %request.currency,
            "Redeeming ETP"
        );

        let body = serde_json::to_value(request)?;
        self.post(REDEMPTION_PATH, QueryParams::new(), Some(body), true)
            .await
    }

    /// ETP 거래 내역 조회.
    pub async fn get_etp_transactions(
        &self,
        request: &EtpTransactionsRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(limit = request.limit, "Fetching ETP transactions");

        let query = QueryParams::from_serializable(request)?;
        self.get(TRANSACTIONS_PATH, query, false).await
    }

    /// ETP 거래 단건 조회.
    pub async fn get_etp_transaction(
        &self,
        request: &EtpTransactionRequest,
    ) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(transact_id = request.transact_id, "Fetching ETP transaction");

        let query = QueryParams::from_serializable(request)?;
        self.get(TRANSACTION_PATH, query, false).await
    }

    /// ETP 리밸런싱 내역 조회.
    pub async fn get_etp_rebalance(&self, request: &EtpRebalanceRequest) -> HuobiResult<Envelope> {
        request.validate()?;
        debug!(symbol = %request.symbol, "Fetching ETP rebalance records");

        let query = QueryParams::from_serializable(request)?;
        self.get(REBALANCE_PATH, query, false).await
    }
}
