//! OS 클립보드 capability
//!
//! 플랫폼 복사 명령(`pbcopy`, `clip`, `wl-copy`, `xclip`)의 stdin으로 값을 넘깁니다.

use super::ClipboardCapability;
use crate::error::{RevealError, RevealResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// 현재 플랫폼 기본 명령. 알 수 없는 플랫폼이면 None
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Self::new("pbcopy", vec![]));
        }
        if cfg!(target_os = "windows") {
            return Some(Self::new("clip", vec![]));
        }
        if cfg!(unix) {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                return Some(Self::new("wl-copy", vec![]));
            }
            if std::env::var_os("DISPLAY").is_some() {
                return Some(Self::new(
                    "xclip",
                    vec!["-selection".to_string(), "clipboard".to_string()],
                ));
            }
        }
        None
    }
}

#[async_trait]
impl ClipboardCapability for SystemClipboard {
    async fn write_text(&self, value: &str) -> RevealResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RevealError::ClipboardCopy(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(value.as_bytes())
                .await
                .map_err(|e| RevealError::ClipboardCopy(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| RevealError::ClipboardCopy(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(RevealError::ClipboardCopy(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}
