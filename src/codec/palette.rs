//! 아이콘 팔레트 (화면 입력기)
//!
//! 키보드 없이 아이콘을 눌러 코드를 입력하기 위한 버튼 목록.

use super::alphabet::{AlphabetEntry, ALPHABET};
use std::fmt;
use std::sync::Arc;

type SelectFn = Arc<dyn Fn(char) + Send + Sync>;

/// 팔레트 버튼 하나
#[derive(Clone)]
pub struct PaletteKey {
    entry: &'static AlphabetEntry,
    on_select: SelectFn,
}

impl PaletteKey {
    pub fn code(&self) -> char {
        self.entry.code
    }

    pub fn glyph(&self) -> &'static str {
        self.entry.glyph
    }

    pub fn label(&self) -> &'static str {
        self.entry.label
    }

    /// 스크린리더용 라벨 (`Add Dog`)
    pub fn aria_label(&self) -> String {
        format!("Add {}", self.entry.label)
    }

    /// 툴팁 (`Dog (A)`)
    pub fn title(&self) -> String {
        format!("{} ({})", self.entry.label, self.entry.code)
    }

    /// 버튼 선택 → 콜백에 코드 전달
    pub fn press(&self) {
        (self.on_select)(self.entry.code);
    }
}

impl fmt::Debug for PaletteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteKey")
            .field("code", &self.entry.code)
            .field("label", &self.entry.label)
            .finish()
    }
}

/// 알파벳 순서 그대로의 버튼 목록
#[derive(Debug, Clone)]
pub struct Palette {
    keys: Vec<PaletteKey>,
}

impl Palette {
    pub fn keys(&self) -> &[PaletteKey] {
        &self.keys
    }

    pub fn key(&self, code: char) -> Option<&PaletteKey> {
        self.keys.iter().find(|k| k.code() == code)
    }

    /// 코드로 버튼 누르기. 팔레트에 없는 코드면 false
    pub fn press(&self, code: char) -> bool {
        match self.key(code) {
            Some(key) => {
                key.press();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 팔레트 생성
pub fn build_palette<F>(on_select: F) -> Palette
where
    F: Fn(char) + Send + Sync + 'static,
{
    let on_select: SelectFn = Arc::new(on_select);
    let keys = ALPHABET
        .iter()
        .map(|entry| PaletteKey {
            entry,
            on_select: Arc::clone(&on_select),
        })
        .collect();
    Palette { keys }
}
