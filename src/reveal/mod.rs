//! Reveal Toggle
//!
//! return code 표시 요소 하나의 상태 머신.
//!
//! ```text
//! Masked --보기--> Loading --성공--> Shown --숨기기--> Masked
//!                          --실패--> Error --다시 보기--> Loading
//! ```
//!
//! 상태는 요소가 소유하고, 같은 scope를 보는 다른 요소와 공유하지 않습니다.
//! 공유되는 것은 캐시의 값뿐입니다.

pub mod page;

pub use page::{CopySource, RevealPage};

use crate::codec;
use crate::error::RevealError;
use crate::secrets::{ScopeKey, SecretCache};
use std::fmt;
use tracing::debug;

/// 가림 placeholder 길이. 실제 코드 길이와 무관한 고정값
pub const MASK_WIDTH: usize = 6;
const MASK_CHAR: char = '•';

/// 고정 길이 가림 문자열
pub fn mask() -> String {
    std::iter::repeat(MASK_CHAR).take(MASK_WIDTH).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealState {
    Masked,
    Loading,
    Shown,
    Error(RevealError),
}

/// 페이지 상태 줄에 표시하는 문구
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Shown,
    Hidden,
    LoadFailed,
    Copied,
    CopyFailed,
}

impl StatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            StatusMessage::Shown => "Return code shown.",
            StatusMessage::Hidden => "Return code hidden.",
            StatusMessage::LoadFailed => "Could not load return code. Refresh and try again.",
            StatusMessage::Copied => "Copied to clipboard.",
            StatusMessage::CopyFailed => "Copy failed. Please copy manually.",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// 토글 옵션 (`data-show-label`, `data-hide-label`, 아이콘 표시 여부)
#[derive(Debug, Clone)]
pub struct ToggleOptions {
    pub show_label: String,
    pub hide_label: String,
    pub with_glyphs: bool,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            show_label: "Show return code".to_string(),
            hide_label: "Hide return code".to_string(),
            with_glyphs: false,
        }
    }
}

impl ToggleOptions {
    pub fn with_glyphs(mut self) -> Self {
        self.with_glyphs = true;
        self
    }
}

/// 토글 버튼 표시 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub text: &'static str,
    pub aria_pressed: bool,
    pub aria_label: String,
}

/// 아이콘 코드 표시 영역
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconView {
    pub text: String,
    pub aria_label: Option<String>,
    pub hidden: bool,
}

impl IconView {
    fn hidden() -> Self {
        Self {
            text: String::new(),
            aria_label: None,
            hidden: true,
        }
    }

    fn for_code(code: &str) -> Self {
        Self {
            text: codec::render_glyphs(code, " "),
            aria_label: Some(format!("Icon code: {}", codec::render_labels(code, ", "))),
            hidden: false,
        }
    }
}

/// return code 표시 요소 하나
pub struct RevealToggle {
    scope: ScopeKey,
    options: ToggleOptions,
    state: RevealState,
    text: String,
    icons: Option<IconView>,
}

impl RevealToggle {
    /// 항상 가린 상태로 시작
    pub fn new(scope: ScopeKey, options: ToggleOptions) -> Self {
        let icons = options.with_glyphs.then(IconView::hidden);
        Self {
            scope,
            options,
            state: RevealState::Masked,
            text: mask(),
            icons,
        }
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// 요소에 표시되는 텍스트 (가림 또는 평문)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn icons(&self) -> Option<&IconView> {
        self.icons.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.state == RevealState::Shown
    }

    /// `data-shown` 속성 값
    pub fn data_shown(&self) -> &'static str {
        if self.is_shown() {
            "1"
        } else {
            "0"
        }
    }

    pub fn button(&self) -> ToggleButton {
        if self.is_shown() {
            ToggleButton {
                text: "Hide",
                aria_pressed: true,
                aria_label: self.options.hide_label.clone(),
            }
        } else {
            ToggleButton {
                text: "Show",
                aria_pressed: false,
                aria_label: self.options.show_label.clone(),
            }
        }
    }

    /// 버튼 클릭: 보이는 중이면 숨기고, 아니면 보기
    pub async fn toggle(&mut self, cache: &SecretCache) -> StatusMessage {
        if self.is_shown() {
            self.hide()
        } else {
            self.reveal(cache).await
        }
    }

    /// 보기 (Masked/Error → Loading → Shown | Error)
    pub async fn reveal(&mut self, cache: &SecretCache) -> StatusMessage {
        self.state = RevealState::Loading;

        match cache.get(&self.scope).await {
            Ok(value) => {
                if let Some(icons) = self.icons.as_mut() {
                    *icons = IconView::for_code(&value);
                }
                self.text = value;
                self.state = RevealState::Shown;
                StatusMessage::Shown
            }
            Err(err) => {
                debug!(scope = %self.scope, code = err.code(), "[RevealToggle] Reveal failed");
                // 가린 표시는 그대로 유지
                self.state = RevealState::Error(err);
                StatusMessage::LoadFailed
            }
        }
    }

    /// 숨기기. 캐시는 건드리지 않음
    pub fn hide(&mut self) -> StatusMessage {
        self.text = mask();
        if let Some(icons) = self.icons.as_mut() {
            *icons = IconView::hidden();
        }
        self.state = RevealState::Masked;
        StatusMessage::Hidden
    }
}

impl fmt::Debug for RevealToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealToggle")
            .field("scope", &self.scope)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use std::time::Duration;

    #[test]
    fn test_mask_is_fixed_width() {
        assert_eq!(mask().chars().count(), MASK_WIDTH);
        let toggle = RevealToggle::new(ScopeKey::Own, ToggleOptions::default());
        assert_eq!(toggle.text(), mask());
        assert_eq!(toggle.state(), &RevealState::Masked);
        assert_eq!(toggle.data_shown(), "0");
    }

    #[tokio::test]
    async fn test_mask_ignores_secret_length() {
        for secret in ["K9X2", "ABCDEFGH", "ABCDEFGHJKLM"] {
            let cache = SecretCache::new(ScriptedTransport::fixed(secret));
            let mut toggle = RevealToggle::new(ScopeKey::Own, ToggleOptions::default());

            toggle.reveal(&cache).await;
            assert_eq!(toggle.text(), secret);
            toggle.hide();
            assert_eq!(toggle.text().chars().count(), MASK_WIDTH);
        }
    }

    #[tokio::test]
    async fn test_toggle_round_trip_keeps_cache() {
        let transport = ScriptedTransport::fixed("K9X2");
        let cache = SecretCache::new(transport.clone());
        let mut toggle = RevealToggle::new(ScopeKey::Own, ToggleOptions::default().with_glyphs());
        assert_eq!(toggle.icons().map(|i| i.hidden), Some(true));

        assert_eq!(toggle.toggle(&cache).await, StatusMessage::Shown);
        assert_eq!(toggle.text(), "K9X2");
        assert_eq!(toggle.data_shown(), "1");
        let icons = toggle.icons().unwrap();
        assert_eq!(icons.text, "🐯 ⚽ 🌟 🍎");
        assert_eq!(icons.aria_label.as_deref(), Some("Icon code: Tiger, Ball, Star, Apple"));
        assert_eq!(
            toggle.button(),
            ToggleButton {
                text: "Hide",
                aria_pressed: true,
                aria_label: "Hide return code".to_string(),
            }
        );

        assert_eq!(toggle.toggle(&cache).await, StatusMessage::Hidden);
        assert_eq!(toggle.text(), mask());
        assert_eq!(toggle.icons(), Some(&IconView::hidden()));
        assert!(!toggle.button().aria_pressed);

        assert_eq!(toggle.toggle(&cache).await, StatusMessage::Shown);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_mask_and_allows_retry() {
        let transport = ScriptedTransport::new(Duration::from_millis(1), |_, n| {
            if n == 0 {
                Ok(Some(String::new()))
            } else {
                Ok(Some("ABC234".to_string()))
            }
        });
        let cache = SecretCache::new(transport.clone());
        let mut toggle = RevealToggle::new(ScopeKey::Own, ToggleOptions::default().with_glyphs());

        assert_eq!(toggle.toggle(&cache).await, StatusMessage::LoadFailed);
        assert_eq!(toggle.state(), &RevealState::Error(RevealError::MissingValue));
        assert_eq!(toggle.text(), mask());
        assert_eq!(toggle.icons().map(|i| i.hidden), Some(true));
        assert_eq!(toggle.button().text, "Show");

        assert_eq!(toggle.toggle(&cache).await, StatusMessage::Shown);
        assert_eq!(toggle.text(), "ABC234");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_elements_sharing_scope_keep_own_state() {
        let transport = ScriptedTransport::fixed("K9X2");
        let cache = SecretCache::new(transport.clone());
        let mut first = RevealToggle::new(ScopeKey::subject("7"), ToggleOptions::default());
        let mut second = RevealToggle::new(ScopeKey::subject("7"), ToggleOptions::default());

        first.reveal(&cache).await;
        assert!(first.is_shown());
        assert_eq!(second.text(), mask());

        second.reveal(&cache).await;
        first.hide();
        assert_eq!(first.text(), mask());
        assert_eq!(second.text(), "K9X2");
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_debug_hides_text() {
        let mut toggle = RevealToggle::new(ScopeKey::Own, ToggleOptions::default());
        toggle.text = "K9X2".to_string();
        assert!(!format!("{:?}", toggle).contains("K9X2"));
    }
}
