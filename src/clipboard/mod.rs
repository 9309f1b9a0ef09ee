//! Clipboard Exporter
//!
//! 1. 클립보드 capability(`write_text`)가 있으면 먼저 시도
//! 2. 없거나 거부되면 임시 입력 surface를 붙여서 선택+복사 후 바로 제거
//!
//! 결과는 `Copied` / `Failed` 둘 중 하나만 반환하고, 에러를 밖으로 던지지 않습니다.

pub mod system;

pub use system::SystemClipboard;

use crate::error::{RevealError, RevealResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// 비동기 클립보드 쓰기 capability
#[async_trait]
pub trait ClipboardCapability: Send + Sync {
    async fn write_text(&self, value: &str) -> RevealResult<()>;
}

/// 임시 surface handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// 레거시 선택+복사를 위한 호스트 (보이지 않는 입력칸)
pub trait SelectionHost: Send + Sync {
    /// 값을 담은 surface를 붙임
    fn attach(&self, value: &str) -> RevealResult<SurfaceHandle>;
    /// surface 내용을 선택하고 복사 명령 실행
    fn select_and_copy(&self, handle: SurfaceHandle) -> bool;
    fn detach(&self, handle: SurfaceHandle);
}

/// 붙인 surface는 복사 성공/실패와 상관없이 이 guard가 drop될 때 제거
struct TransientSurface<'a> {
    host: &'a dyn SelectionHost,
    handle: SurfaceHandle,
}

impl<'a> TransientSurface<'a> {
    fn attach(host: &'a dyn SelectionHost, value: &str) -> RevealResult<Self> {
        let handle = host.attach(value)?;
        Ok(Self { host, handle })
    }

    fn select_and_copy(&self) -> bool {
        self.host.select_and_copy(self.handle)
    }
}

impl Drop for TransientSurface<'_> {
    fn drop(&mut self) {
        self.host.detach(self.handle);
    }
}

/// 복사 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CopyOutcome::Copied => "Copied to clipboard.",
            CopyOutcome::Failed => "Copy failed. Please copy manually.",
        }
    }
}

#[derive(Clone, Default)]
pub struct ClipboardExporter {
    capability: Option<Arc<dyn ClipboardCapability>>,
    legacy: Option<Arc<dyn SelectionHost>>,
}

impl fmt::Debug for ClipboardExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardExporter")
            .field("capability", &self.capability.is_some())
            .field("legacy", &self.legacy.is_some())
            .finish()
    }
}

impl ClipboardExporter {
    pub fn new(
        capability: Option<Arc<dyn ClipboardCapability>>,
        legacy: Option<Arc<dyn SelectionHost>>,
    ) -> Self {
        Self { capability, legacy }
    }

    /// 값 복사. 절대 실패를 전파하지 않음
    pub async fn copy(&self, value: &str) -> CopyOutcome {
        match self.try_copy(value).await {
            Ok(()) => CopyOutcome::Copied,
            Err(err) => {
                warn!(code = err.code(), "[Clipboard] {}", err);
                CopyOutcome::Failed
            }
        }
    }

    async fn try_copy(&self, value: &str) -> RevealResult<()> {
        if let Some(capability) = &self.capability {
            match capability.write_text(value).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    debug!("[Clipboard] Capability rejected, using fallback: {}", err);
                }
            }
        }

        let host = self.legacy.as_deref().ok_or_else(|| {
            RevealError::ClipboardCopy("no clipboard strategy available".to_string())
        })?;

        let surface = TransientSurface::attach(host, value)?;
        if surface.select_and_copy() {
            Ok(())
        } else {
            Err(RevealError::ClipboardCopy(
                "legacy copy command failed".to_string(),
            ))
        }
    }
}
