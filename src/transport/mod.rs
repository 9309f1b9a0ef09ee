//! Secret Transport
//!
//! 캐시가 원격에서 return code를 가져올 때 쓰는 경계.
//! 캐시는 트랜스포트 구현을 모릅니다.

pub mod http;

pub use http::HttpTransport;

use crate::error::RevealResult;
use crate::secrets::ScopeKey;
use async_trait::async_trait;

/// scope 하나의 return code를 조회
///
/// `Ok(None)` 또는 빈 문자열은 캐시에서 `missing_value`로 처리됩니다.
#[async_trait]
pub trait SecretTransport: Send + Sync {
    async fn fetch(&self, scope: &ScopeKey) -> RevealResult<Option<String>>;
}
