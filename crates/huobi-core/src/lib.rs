//! # Huobi Core
//!
//! Huobi Spot REST 클라이언트의 공통 타입을 제공합니다.
//!
//! - 에러 타입 (`HuobiError`)
//! - 응답 엔벨로프 (`Envelope`)
//! - API 자격증명 (`Credentials`)
//! - 클라이언트 설정 (`ClientConfig`)
//! - 로깅 인프라

pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use credentials::Credentials;
pub use envelope::Envelope;
pub use error::*;
pub use logging::*;
