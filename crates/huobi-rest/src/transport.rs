//! HTTP 전송 계층.
//!
//! 디스패처는 `HttpTransport`를 통해서만 네트워크에 접근합니다.
//! 연결 풀링과 TLS는 전송 구현(기본: reqwest)의 책임입니다.

use async_trait::async_trait;
use huobi_core::{HuobiError, HuobiResult};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::error;
use url::Url;

/// 한 번의 HTTP 교환 요청.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// 쿼리까지 포함한 최종 URL
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

/// HTTP 응답.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// 2xx 응답인지 확인.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 전송 추상화.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// HTTP 요청 한 건을 수행합니다.
    ///
    /// 연결 실패와 타임아웃은 `Err`로, 상태 코드와 관계없이 응답을 받았으면 `Ok`로 반환합니다.
    async fn fetch(&self, request: TransportRequest) -> HuobiResult<TransportResponse>;
}

/// reqwest 기반 전송 구현.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 기본 타임아웃을 가진 전송 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `HuobiError::Network`를 반환합니다.
    pub fn new(timeout: Duration) -> HuobiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HuobiError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    /// 이미 구성된 reqwest 클라이언트 사용.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, request: TransportRequest) -> HuobiResult<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(request.timeout);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // 에러 메시지에 서명된 URL이 남지 않도록 URL을 제거
        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            error!("HTTP request failed: {}", e);
            HuobiError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HuobiError::from(e.without_url()))?;

        Ok(TransportResponse { status, body })
    }
}
