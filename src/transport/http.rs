//! Class Hub HTTP 트랜스포트
//!
//! - 본인: `GET {base}/student/return-code`
//! - 명단 학생: `GET {base}/teach/class/{class_id}/student/{student_id}/return-code`
//!
//! 응답: `{"return_code": "ABC234"}`. 세션 쿠키로 인증합니다.

use crate::config::RevealConfig;
use crate::error::{RevealError, RevealResult};
use crate::models::{ErrorBody, ReturnCodePayload};
use crate::secrets::ScopeKey;
use crate::transport::SecretTransport;
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
    class_id: Option<String>,
    session_cookie: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &RevealConfig) -> RevealResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RevealError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            class_id: config.class_id.clone(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    /// scope에 해당하는 엔드포인트 URL
    pub fn endpoint(&self, scope: &ScopeKey) -> RevealResult<Url> {
        let path = match scope {
            ScopeKey::Own => "student/return-code".to_string(),
            ScopeKey::Subject(student_id) => {
                let class_id = self
                    .class_id
                    .as_deref()
                    .ok_or(RevealError::InvalidScope("missing_class_id"))?;
                if student_id.trim().is_empty() {
                    return Err(RevealError::InvalidScope("missing_student_id"));
                }
                format!(
                    "teach/class/{}/student/{}/return-code",
                    urlencoding::encode(class_id),
                    urlencoding::encode(student_id.trim())
                )
            }
        };

        self.base_url
            .join(&path)
            .map_err(|e| RevealError::Transport(format!("Invalid endpoint URL: {}", e)))
    }
}

#[async_trait]
impl SecretTransport for HttpTransport {
    async fn fetch(&self, scope: &ScopeKey) -> RevealResult<Option<String>> {
        let url = self.endpoint(scope)?;

        debug!(%scope, path = url.path(), "[HttpTransport] Requesting return code");

        let mut request = self.http.get(url).header("Accept", "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RevealError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RevealError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default();
            warn!(
                %scope,
                status = status.as_u16(),
                error = error.error.as_deref().unwrap_or(""),
                request_id = error.request_id.as_deref().unwrap_or(""),
                "[HttpTransport] Return code request rejected"
            );
            return Err(RevealError::from_status(status.as_u16()));
        }

        // 본문이 깨졌으면 일부라도 쓰지 않고 버림
        let payload: ReturnCodePayload = serde_json::from_str(&body)
            .map_err(|e| RevealError::Transport(format!("Failed to parse response: {}", e)))?;

        Ok(payload.return_code)
    }
}
