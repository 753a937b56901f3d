//! Huobi Spot 서명 REST 클라이언트.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 서명 엔진: Signature Version 2 (HMAC-SHA256 + base64)
//! - 요청 디스패처: URL 결정, 헤더 구성, 응답 엔벨로프 해석
//! - 엔드포인트: 시세, 주문, ETP, 계좌 이체 호출
//!
//! # 예제
//!
//! ```no_run
//! use huobi_core::ClientConfig;
//! use huobi_rest::{DepthRequest, HuobiRestClient};
//!
//! # async fn run() -> huobi_core::HuobiResult<()> {
//! let client = HuobiRestClient::new(ClientConfig::default())?;
//! let depth = client.get_orderbook(&DepthRequest::new("btcusdt")).await?;
//! println!("{}", depth);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod query;
pub mod serde_helpers;
pub mod signature;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HuobiRestClient, Request};
pub use endpoints::*;
pub use query::QueryParams;
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use types::*;
