//! Return Code 아이콘 코덱
//!
//! return code를 아이콘+라벨 토큰으로 바꾸는 순수 함수 모음.
//! 글을 읽기 어려운 학생도 코드를 확인/입력할 수 있도록 합니다.

pub mod alphabet;
pub mod palette;

pub use alphabet::{AlphabetEntry, ALPHABET};
pub use palette::{build_palette, Palette, PaletteKey};

use rand::Rng;

/// 새로 발급되는 코드 길이
pub const DEFAULT_CODE_LEN: usize = 6;
/// 저장 가능한 최대 코드 길이
pub const MAX_CODE_LEN: usize = 12;

/// 코드 토큰
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Known(&'static AlphabetEntry),
    /// 알파벳에 없는 문자. 아이콘과 라벨 모두 원래 문자
    Unknown(char),
}

impl Token {
    pub fn code(&self) -> char {
        match self {
            Token::Known(entry) => entry.code,
            Token::Unknown(c) => *c,
        }
    }

    pub fn glyph(&self) -> String {
        match self {
            Token::Known(entry) => entry.glyph.to_string(),
            Token::Unknown(c) => c.to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Token::Known(entry) => entry.label.to_string(),
            Token::Unknown(c) => c.to_string(),
        }
    }
}

/// 입력 정규화: 대문자 변환 → 알파벳 외 문자 제거 → `max_len`으로 자름
pub fn normalize(raw: &str, max_len: usize) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| alphabet::contains(*c))
        .take(max_len)
        .collect()
}

/// 문자 하나를 토큰으로
pub fn token_for_char(code: char) -> Token {
    match alphabet::lookup(code) {
        Some(entry) => Token::Known(entry),
        None => Token::Unknown(code),
    }
}

/// 정규화 후 문자별 토큰 목록. 길이 제한은 입력칸이 담당
pub fn tokens_for(raw: &str) -> Vec<Token> {
    normalize(raw, usize::MAX)
        .chars()
        .map(token_for_char)
        .collect()
}

/// 아이콘 문자열 (`🐶 🐱 🍌`)
pub fn render_glyphs(raw: &str, separator: &str) -> String {
    tokens_for(raw)
        .iter()
        .map(Token::glyph)
        .collect::<Vec<_>>()
        .join(separator)
}

/// 라벨 문자열 (`Dog, Cat, Banana`)
pub fn render_labels(raw: &str, separator: &str) -> String {
    tokens_for(raw)
        .iter()
        .map(Token::label)
        .collect::<Vec<_>>()
        .join(separator)
}

/// 알파벳에서 무작위로 뽑은 코드 생성
pub fn generate(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())].code)
        .collect()
}
