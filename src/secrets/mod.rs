//! Scoped Secret 모듈
//!
//! return code는 최초 페이지 응답에 포함하지 않고, 사용자가 보기를 눌렀을 때
//! scope별로 한 번만 조회해서 메모리에 보관합니다.
//!
//! - scope: 본인(`Own`) 또는 명단의 학생(`Subject(id)`)
//! - 조회 중인 scope에 대한 추가 요청은 같은 조회 결과를 기다림 (single-flight)
//! - 실패하면 scope는 비워지고 다음 요청에서 다시 조회

pub mod cache;
pub mod scope;

pub use cache::{EntryState, SecretCache};
pub use scope::ScopeKey;
