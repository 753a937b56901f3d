//! Huobi REST 요청 디스패처.
//!
//! 호출 한 건의 흐름:
//!
//! ```text
//! Building → Signing (인증 요청만) → InFlight → Succeeded | TransportFailed | ApplicationRejected
//! ```
//!
//! 재시도는 하지 않습니다. 서명된 요청은 타임스탬프가 만료될 수 있고,
//! 주문 요청은 재전송 시 중복 체결될 수 있으므로 재시도 정책은 호출자가 결정합니다.

use crate::query::QueryParams;
use crate::signature::{
    self, ACCESS_KEY_ID, SIGNATURE, SIGNATURE_METHOD, SIGNATURE_METHOD_VALUE, SIGNATURE_VERSION,
    SIGNATURE_VERSION_VALUE, TIMESTAMP, TIMESTAMP_FORMAT,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
use chrono::Utc;
use huobi_core::{ClientConfig, Credentials, Envelope, HuobiError, HuobiResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn, Instrument};
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// 요청 기술자
// ============================================================================

/// REST 호출 한 건의 기술자.
///
/// 호출마다 새로 만들어지며 저장되지 않습니다.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// 상대 경로 또는 절대 URL
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    /// 서명 필요 여부
    pub auth: bool,
}

impl Request {
    /// 새 요청 생성.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            headers: HeaderMap::new(),
            auth: false,
        }
    }

    /// GET 요청 생성.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST 요청 생성.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// 쿼리 파라미터 설정.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// JSON 본문 설정.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// 추가 헤더 설정.
    ///
    /// `Content-Type`, `Accept`, `User-Agent`는 디스패처가 덮어씁니다.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// 인증 요청으로 표시.
    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// Huobi Spot REST 클라이언트.
///
/// 자격증명은 읽기 전용으로 공유되므로 `clone()`한 클라이언트를 여러 태스크에서
/// 동시에 사용할 수 있습니다.
#[derive(Clone)]
pub struct HuobiRestClient {
    base_url: Url,
    credentials: Option<Arc<Credentials>>,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    user_agent: HeaderValue,
}

impl fmt::Debug for HuobiRestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuobiRestClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HuobiRestClient {
    /// 설정으로 클라이언트 생성.
    ///
    /// # Errors
    /// 설정이 유효하지 않거나 HTTP 클라이언트 생성에 실패하면 에러를 반환합니다.
    pub fn new(config: ClientConfig) -> HuobiResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// 공개 API 전용 클라이언트 생성 (자격증명 없음).
    pub fn public(host: impl Into<String>) -> HuobiResult<Self> {
        Self::new(ClientConfig::new(host))
    }

    /// 환경 변수 설정으로 클라이언트 생성.
    pub fn from_env() -> HuobiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// 지정한 전송 구현으로 클라이언트 생성.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> HuobiResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.host)?;
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| HuobiError::Config(format!("invalid user agent: {}", e)))?;

        Ok(Self {
            base_url,
            credentials: config.credentials().map(Arc::new),
            transport,
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent,
        })
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 자격증명이 설정되어 있는지 확인.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// 요청 대상 URL 결정.
    ///
    /// 절대 URL은 그대로 사용하고, 상대 경로는 기본 URL에 결합합니다.
    /// 경로에 포함된 쿼리는 디스패처가 서명 전에 쿼리 파라미터로 옮깁니다.
    pub fn resolve_url(&self, path: &str) -> HuobiResult<Url> {
        if signature::is_absolute(path) {
            Ok(Url::parse(path)?)
        } else {
            Ok(self.base_url.join(path)?)
        }
    }

    /// 쿼리에 인증 필드와 서명을 추가합니다.
    ///
    /// `AccessKeyId`, `SignatureMethod`, `SignatureVersion`, `Timestamp`를 먼저 넣고
    /// 서명한 뒤 `Signature`를 마지막에 추가합니다.
    pub fn authenticate(
        &self,
        method: &Method,
        path: &str,
        query: &mut QueryParams,
        timestamp: &str,
    ) -> HuobiResult<()> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(HuobiError::MissingCredentials)?;

        query.remove(SIGNATURE);
        query.insert(ACCESS_KEY_ID, credentials.access_key());
        query.insert(SIGNATURE_METHOD, SIGNATURE_METHOD_VALUE);
        query.insert(SIGNATURE_VERSION, SIGNATURE_VERSION_VALUE);
        query.insert(TIMESTAMP, timestamp);

        let signature = signature::sign(
            method,
            path,
            query,
            self.base_url.as_str(),
            credentials.secret_key(),
        )?;
        query.insert(SIGNATURE, signature);

        Ok(())
    }

    /// 메서드에 맞는 헤더 구성.
    fn build_headers(&self, method: &Method, extra: HeaderMap) -> HeaderMap {
        let mut headers = extra;

        if *method == Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        } else {
            headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        headers.insert(USER_AGENT, self.user_agent.clone());

        headers
    }

    /// 요청 실행.
    ///
    /// # Errors
    /// - `MissingCredentials` / `InvalidRequest`: 네트워크 요청 전 실패
    /// - `Network` / `Timeout` / `Http` / `Parse`: 전송 실패
    /// - `Rejected`: 거래소가 `status != "ok"`로 응답 (엔벨로프 포함)
    pub async fn execute(&self, request: Request) -> HuobiResult<Envelope> {
        let span = huobi_core::request_span!(request.method, request.path, request.auth);
        self.execute_inner(request).instrument(span).await
    }

    async fn execute_inner(&self, request: Request) -> HuobiResult<Envelope> {
        let Request {
            method,
            path,
            query,
            body,
            headers,
            auth,
        } = request;

        let mut url = self.resolve_url(&path)?;

        // 경로에 붙어 온 쿼리가 앞, 요청 쿼리가 뒤 (같은 키는 요청 쿼리 값)
        let mut params: QueryParams = url.query_pairs().into_owned().collect();
        for (key, value) in query.iter() {
            params.insert(key, value);
        }
        url.set_query(None);

        if auth {
            let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
            self.authenticate(&method, url.as_str(), &mut params, &timestamp)?;
            debug!("Signed request at {}", timestamp);
        }

        if !params.is_empty() {
            url.set_query(Some(&params.to_query_string()));
        }

        let body = if method == Method::GET {
            if body.is_some() {
                debug!("Dropping body of GET request");
            }
            None
        } else {
            body.map(|value| serde_json::to_vec(&value)).transpose()?
        };

        let transport_request = TransportRequest {
            headers: self.build_headers(&method, headers),
            method,
            url,
            body,
            timeout: self.timeout,
        };

        debug!(
            url_path = transport_request.url.path(),
            "Sending request"
        );

        let response = self.transport.fetch(transport_request).await.map_err(|e| {
            error!("Transport failed: {}", e);
            e
        })?;

        Self::interpret(response)
    }

    /// 응답 본문을 엔벨로프로 해석.
    fn interpret(response: TransportResponse) -> HuobiResult<Envelope> {
        if !response.is_success() {
            error!(status = response.status, "HTTP error response");
            return Err(HuobiError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let envelope = Envelope::from_body(&response.body).map_err(|e| {
            error!("Failed to parse response: {} - Body: {}", e, response.body);
            HuobiError::Parse(e.to_string())
        })?;

        if !envelope.is_ok() {
            warn!(
                err_code = ?envelope.err_code(),
                err_msg = ?envelope.err_msg(),
                "Request rejected by exchange"
            );
            return Err(HuobiError::Rejected(envelope));
        }

        debug!("Request succeeded");
        Ok(envelope)
    }

    /// 임의 메서드 요청.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        body: Option<Value>,
        auth: bool,
    ) -> HuobiResult<Envelope> {
        let mut request = Request::new(method, path).with_query(query);
        request.body = body;
        request.auth = auth;
        self.execute(request).await
    }

    /// GET 요청.
    pub async fn get(&self, path: &str, query: QueryParams, auth: bool) -> HuobiResult<Envelope> {
        self.request(Method::GET, path, query, None, auth).await
    }

    /// POST 요청 (JSON 본문).
    pub async fn post(
        &self,
        path: &str,
        query: QueryParams,
        body: Option<Value>,
        auth: bool,
    ) -> HuobiResult<Envelope> {
        self.request(Method::POST, path, query, body, auth).await
    }
}
