//! Reveal Page - 페이지 최상위 컨트롤러
//!
//! 캐시 하나를 소유하고 각 토글/복사 버튼에 참조로 넘깁니다.
//! 상태 줄(`copy-status`)은 페이지에 하나이며 마지막 결과를 보여줍니다.
//!
//! 요소마다 잠금이 따로 있어서 서로 다른 요소의 클릭은 동시에 진행되고,
//! 같은 요소의 연속 클릭만 순서대로 처리됩니다.

use super::{RevealToggle, StatusMessage, ToggleOptions};
use crate::clipboard::{ClipboardExporter, CopyOutcome};
use crate::secrets::{ScopeKey, SecretCache};
use crate::transport::SecretTransport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

/// 복사 버튼 값 출처
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopySource {
    /// `data-copy-value` 처럼 페이지에 이미 있는 값 (예: 초대 링크)
    Static(String),
    /// `data-copy-secret-target`: 캐시를 통해 조회
    Secret(ScopeKey),
}

#[derive(Debug)]
pub struct RevealPage {
    cache: SecretCache,
    exporter: ClipboardExporter,
    toggles: HashMap<String, Arc<Mutex<RevealToggle>>>,
    status: RwLock<Option<StatusMessage>>,
}

impl RevealPage {
    pub fn new(transport: Arc<dyn SecretTransport>, exporter: ClipboardExporter) -> Self {
        Self {
            cache: SecretCache::new(transport),
            exporter,
            toggles: HashMap::new(),
            status: RwLock::new(None),
        }
    }

    /// 학생 본인 페이지: 본인 코드 토글 하나 (아이콘 표시 포함)
    pub fn student(transport: Arc<dyn SecretTransport>, exporter: ClipboardExporter) -> Self {
        let mut page = Self::new(transport, exporter);
        page.add_toggle(
            "student-return-code",
            ScopeKey::Own,
            ToggleOptions::default().with_glyphs(),
        );
        page
    }

    /// 교사 명단 페이지: 학생별 토글
    pub fn roster<I, S>(
        transport: Arc<dyn SecretTransport>,
        exporter: ClipboardExporter,
        student_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut page = Self::new(transport, exporter);
        for id in student_ids {
            let scope = ScopeKey::subject(id.as_ref());
            page.add_toggle(roster_element_id(id.as_ref()), scope, ToggleOptions::default());
        }
        page
    }

    pub fn add_toggle(
        &mut self,
        element_id: impl Into<String>,
        scope: ScopeKey,
        options: ToggleOptions,
    ) {
        let toggle = RevealToggle::new(scope, options);
        self.toggles.insert(element_id.into(), Arc::new(Mutex::new(toggle)));
    }

    pub fn cache(&self) -> &SecretCache {
        &self.cache
    }

    /// 요소 상태 읽기. 해당 요소의 클릭이 진행 중이면 끝날 때까지 기다림
    pub async fn element(&self, element_id: &str) -> Option<MutexGuard<'_, RevealToggle>> {
        let toggle = self.toggles.get(element_id)?;
        Some(toggle.lock().await)
    }

    pub async fn status(&self) -> Option<StatusMessage> {
        *self.status.read().await
    }

    async fn set_status(&self, status: StatusMessage) -> StatusMessage {
        *self.status.write().await = Some(status);
        status
    }

    /// 토글 클릭. 없는 요소면 None (아무 일도 하지 않음)
    pub async fn toggle(&self, element_id: &str) -> Option<StatusMessage> {
        let toggle = self.toggles.get(element_id)?;
        let status = toggle.lock().await.toggle(&self.cache).await;
        Some(self.set_status(status).await)
    }

    /// 복사 버튼 클릭
    ///
    /// 비밀 값은 캐시로 먼저 확보하고, 성공했을 때만 복사합니다.
    /// 값이 비어 있으면 아무 일도 하지 않습니다.
    pub async fn copy(&self, source: &CopySource) -> Option<StatusMessage> {
        let value = match source {
            CopySource::Static(value) => value.clone(),
            CopySource::Secret(scope) => match self.cache.get(scope).await {
                Ok(value) => value,
                Err(err) => {
                    debug!(%scope, code = err.code(), "[RevealPage] Copy source unavailable");
                    return Some(self.set_status(StatusMessage::LoadFailed).await);
                }
            },
        };
        if value.is_empty() {
            return None;
        }

        let status = match self.exporter.copy(&value).await {
            CopyOutcome::Copied => StatusMessage::Copied,
            CopyOutcome::Failed => StatusMessage::CopyFailed,
        };
        Some(self.set_status(status).await)
    }
}

/// 명단 요소 id (`return-code-{student_id}`)
pub fn roster_element_id(student_id: &str) -> String {
    format!("return-code-{}", student_id.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevealError;
    use crate::reveal::mask;
    use crate::testing::{FakeCapability, FakeSelectionHost, ScriptedTransport};
    use std::time::Duration;

    fn exporter() -> (ClipboardExporter, Arc<FakeCapability>) {
        let capability = FakeCapability::new(false);
        (ClipboardExporter::new(Some(capability.clone()), None), capability)
    }

    #[tokio::test]
    async fn test_student_page_reveal_and_copy() {
        let transport = ScriptedTransport::fixed("K9X2");
        let (exporter, capability) = exporter();
        let page = RevealPage::student(transport.clone(), exporter);

        assert_eq!(page.element("student-return-code").await.unwrap().text(), mask());
        assert_eq!(page.toggle("student-return-code").await, Some(StatusMessage::Shown));
        assert_eq!(
            page.copy(&CopySource::Secret(ScopeKey::Own)).await,
            Some(StatusMessage::Copied)
        );
        assert_eq!(capability.written.lock().unwrap().as_slice(), ["K9X2"]);
        assert_eq!(transport.calls(), 1);

        assert_eq!(page.toggle("student-return-code").await, Some(StatusMessage::Hidden));
        assert_eq!(page.status().await, Some(StatusMessage::Hidden));
        assert_eq!(page.toggle("missing").await, None);
    }

    #[tokio::test]
    async fn test_roster_page_scopes_per_student() {
        let transport = ScriptedTransport::new(Duration::from_millis(2), |scope, _| match scope {
            ScopeKey::Subject(id) => Ok(Some(format!("CODE{}", id))),
            ScopeKey::Own => Err(RevealError::Forbidden),
        });
        let (exporter, _) = exporter();
        let page = RevealPage::roster(transport.clone(), exporter, ["3", "4"]);

        page.toggle(&roster_element_id("3")).await;
        assert_eq!(page.element("return-code-3").await.unwrap().text(), "CODE3");
        assert_eq!(page.element("return-code-4").await.unwrap().text(), mask());
        assert_eq!(page.cache().peek(&ScopeKey::subject("4")).await, None);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_copy_secret_failure_skips_clipboard() {
        let transport = ScriptedTransport::new(Duration::from_millis(1), |_, _| {
            Err(RevealError::Transport("offline".to_string()))
        });
        let (exporter, capability) = exporter();
        let page = RevealPage::student(transport, exporter);

        assert_eq!(
            page.copy(&CopySource::Secret(ScopeKey::Own)).await,
            Some(StatusMessage::LoadFailed)
        );
        assert!(capability.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_copy_static_value() {
        let host = FakeSelectionHost::new(false);
        let exporter = ClipboardExporter::new(None, Some(host.clone()));
        let transport = ScriptedTransport::fixed("unused");
        let page = RevealPage::new(transport.clone(), exporter);

        assert_eq!(page.copy(&CopySource::Static(String::new())).await, None);
        assert_eq!(page.status().await, None);
        assert_eq!(
            page.copy(&CopySource::Static("https://hub/invite/abc".to_string())).await,
            Some(StatusMessage::CopyFailed)
        );
        assert_eq!(
            page.status().await.map(|s| s.text()),
            Some("Copy failed. Please copy manually.")
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_roster_toggles_run_concurrently() {
        let transport = ScriptedTransport::new(Duration::from_millis(20), |scope, _| match scope {
            ScopeKey::Subject(id) => Ok(Some(format!("CODE{}", id))),
            ScopeKey::Own => Err(RevealError::Forbidden),
        });
        let (exporter, _) = exporter();
        let page = RevealPage::roster(transport.clone(), exporter, ["3", "4"]);

        let (first, second) =
            tokio::join!(page.toggle("return-code-3"), page.toggle("return-code-4"));
        assert_eq!(first, Some(StatusMessage::Shown));
        assert_eq!(second, Some(StatusMessage::Shown));
        assert_eq!(transport.calls(), 2);
        assert_eq!(transport.max_in_flight(), 2);
        assert_eq!(page.element("return-code-3").await.unwrap().text(), "CODE3");
        assert_eq!(page.element("return-code-4").await.unwrap().text(), "CODE4");
    }

    #[tokio::test]
    async fn test_same_scope_elements_share_one_fetch() {
        let transport = ScriptedTransport::new(Duration::from_millis(20), |_, _| {
            Ok(Some("HJK7".to_string()))
        });
        let (exporter, _) = exporter();
        let mut page = RevealPage::new(transport.clone(), exporter);
        page.add_toggle("row-7", ScopeKey::subject("7"), ToggleOptions::default());
        page.add_toggle(
            "detail-7",
            ScopeKey::subject(" 7 "),
            ToggleOptions::default().with_glyphs(),
        );

        let (row, detail) = tokio::join!(page.toggle("row-7"), page.toggle("detail-7"));
        assert_eq!(row, Some(StatusMessage::Shown));
        assert_eq!(detail, Some(StatusMessage::Shown));
        assert_eq!(transport.calls(), 1);

        let detail = page.element("detail-7").await.unwrap();
        assert_eq!(detail.text(), "HJK7");
        assert_eq!(detail.icons().map(|icons| icons.hidden), Some(false));
    }

    #[tokio::test]
    async fn test_copy_while_toggle_in_flight() {
        let transport = ScriptedTransport::fixed("K9X2");
        let (exporter, capability) = exporter();
        let page = RevealPage::student(transport.clone(), exporter);

        let (shown, copied) = tokio::join!(
            page.toggle("student-return-code"),
            page.copy(&CopySource::Secret(ScopeKey::Own))
        );
        assert_eq!(shown, Some(StatusMessage::Shown));
        assert_eq!(copied, Some(StatusMessage::Copied));
        assert_eq!(transport.calls(), 1);
        assert_eq!(capability.written.lock().unwrap().as_slice(), ["K9X2"]);
    }
}
