//! Class Hub 응답 모델
//!
//! return code 엔드포인트와 join/helper 엔드포인트의 JSON 형태

use serde::{Deserialize, Serialize};

/// `GET /student/return-code`, `GET /teach/class/{id}/student/{id}/return-code`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnCodePayload {
    #[serde(default)]
    pub return_code: Option<String>,
}

/// 에러 응답 본문 (`{"error": "...", "message": "...", "request_id": "..."}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}
