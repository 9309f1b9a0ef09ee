//! Reveal Error Types
//!
//! return code 조회/표시/복사 경로 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

/// Reveal 에러
///
/// 캐시, 트랜스포트, 클립보드가 공유하는 실패 분류.
/// 하나의 in-flight 조회 결과는 모든 대기자에게 복제되어 전달됨.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Response did not contain a return code")]
    MissingValue,

    #[error("Bad request")]
    BadRequest,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Backend error (status {0})")]
    Backend(u16),

    #[error("Client error (status {0})")]
    Client(u16),

    #[error("Invalid scope: {0}")]
    InvalidScope(&'static str),

    #[error("Clipboard copy failed: {0}")]
    ClipboardCopy(String),
}

impl RevealError {
    /// HTTP 상태 코드를 에러 분류로 변환 (성공 코드는 호출자가 먼저 걸러냄)
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => RevealError::BadRequest,
            401 => RevealError::Unauthorized,
            403 => RevealError::Forbidden,
            404 => RevealError::NotFound,
            429 => RevealError::RateLimited,
            500..=599 => RevealError::Backend(status),
            _ => RevealError::Client(status),
        }
    }

    /// snake_case 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            RevealError::Transport(_) => "transport_failure",
            RevealError::MissingValue => "missing_value",
            RevealError::BadRequest => "bad_request",
            RevealError::Unauthorized => "unauthorized",
            RevealError::Forbidden => "forbidden",
            RevealError::NotFound => "not_found",
            RevealError::RateLimited => "rate_limited",
            RevealError::Backend(_) => "backend_error",
            RevealError::Client(_) => "client_error",
            RevealError::InvalidScope(_) => "invalid_scope",
            RevealError::ClipboardCopy(_) => "client_copy_failure",
        }
    }

    /// 사용자에게 보여줄 짧은 상태 문구
    pub fn user_message(&self) -> &'static str {
        match self {
            RevealError::ClipboardCopy(_) => "Copy failed. Please copy manually.",
            _ => "Could not load return code. Refresh and try again.",
        }
    }
}

pub type RevealResult<T> = Result<T, RevealError>;

/// 직렬화 가능한 에러 리포트 (CLI 출력 / 로그용)
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorReport {
    /// helper 위젯과 같은 형식의 에러 문구
    ///
    /// `Helper error: {code} (request {id}). {message}`
    pub fn helper_text(status: u16, request_id: Option<&str>, message: Option<&str>) -> String {
        let mut text = format!("Helper error: {}", RevealError::from_status(status).code());
        if let Some(id) = request_id.filter(|id| !id.is_empty()) {
            text.push_str(&format!(" (request {})", id));
        }
        if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
            text.push_str(&format!(". {}", message));
        }
        text
    }
}

impl From<RevealError> for ErrorReport {
    fn from(error: RevealError) -> Self {
        let details = match &error {
            RevealError::Transport(reason) | RevealError::ClipboardCopy(reason) => {
                Some(reason.clone())
            }
            RevealError::Backend(status) | RevealError::Client(status) => {
                Some(format!("HTTP {}", status))
            }
            RevealError::InvalidScope(reason) => Some(reason.to_string()),
            _ => None,
        };

        ErrorReport {
            code: error.code().to_string(),
            message: error.user_message().to_string(),
            details,
        }
    }
}
