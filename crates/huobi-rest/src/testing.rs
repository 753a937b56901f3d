//! 단위 테스트용 전송 구현.

use crate::client::HuobiRestClient;
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use huobi_core::{ClientConfig, HuobiError, HuobiResult};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// 보낸 요청을 기록하고 고정 응답을 돌려주는 전송.
pub struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    status: u16,
    body: String,
    failure: Mutex<Option<HuobiError>>,
}

impl MockTransport {
    pub fn respond(status: u16, body: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            status,
            body: body.to_string(),
            failure: Mutex::new(None),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::respond(200, &body.to_string())
    }

    /// 첫 요청에서 주어진 에러로 실패.
    pub fn fail(error: HuobiError) -> Self {
        let transport = Self::respond(200, "{}");
        *transport.failure.lock().unwrap() = Some(error);
        transport
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// 마지막 요청의 쿼리 값.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.last_request()
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// 마지막 요청의 JSON 본문.
    pub fn body_json(&self) -> Option<Value> {
        self.last_request()
            .body
            .map(|bytes| serde_json::from_slice(&bytes).expect("body is not JSON"))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn fetch(&self, request: TransportRequest) -> HuobiResult<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }

        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// 테스트 자격증명(`access`/`secret`)을 가진 클라이언트.
pub fn client_with(transport: MockTransport) -> (HuobiRestClient, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let config = ClientConfig::default().with_credentials("access", "secret");
    let client = HuobiRestClient::with_transport(config, transport.clone())
        .expect("valid test config");
    (client, transport)
}

/// 자격증명 없는 클라이언트.
pub fn public_client_with(transport: MockTransport) -> (HuobiRestClient, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let client = HuobiRestClient::with_transport(ClientConfig::default(), transport.clone())
        .expect("valid test config");
    (client, transport)
}
