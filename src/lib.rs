//! Class Hub Return Code Reveal Library
//!
//! 페이지 최초 응답에 포함하지 않은 학생 return code를 필요할 때만 조회해서
//! 보여주고, 아이콘 코드로 바꾸고, 클립보드로 복사하는 로직.
//!
//! - `codec`: 알파벳 ↔ 아이콘/라벨 변환, 입력 정규화, 팔레트
//! - `secrets`: scope별 single-flight 캐시
//! - `reveal`: 요소별 보기/숨기기 상태 머신과 페이지 컨트롤러
//! - `clipboard`: capability 우선, 임시 surface fallback 복사
//! - `transport`: Class Hub HTTP 엔드포인트
//! - `join`: join 폼 return code 입력

pub mod cli;
pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod join;
pub mod logging;
pub mod models;
pub mod reveal;
pub mod secrets;
pub mod transport;

#[cfg(test)]
mod testing;

pub use error::{ErrorReport, RevealError, RevealResult};
pub use reveal::{RevealPage, RevealState, RevealToggle};
pub use secrets::{ScopeKey, SecretCache};
