//! Return code 알파벳 테이블
//!
//! 헷갈리는 문자(`I`, `O`, `0`, `1`)를 뺀 32개 문자.
//! normalize와 토큰 변환 모두 이 테이블 하나만 참조합니다.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 알파벳 항목 (코드 문자 + 아이콘 + 읽기용 라벨)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphabetEntry {
    pub code: char,
    pub glyph: &'static str,
    pub label: &'static str,
}

const fn entry(code: char, glyph: &'static str, label: &'static str) -> AlphabetEntry {
    AlphabetEntry { code, glyph, label }
}

/// 고정 순서 알파벳 (팔레트 순서이기도 함)
pub static ALPHABET: [AlphabetEntry; 32] = [
    entry('A', "🐶", "Dog"),
    entry('B', "🐱", "Cat"),
    entry('C', "🐰", "Rabbit"),
    entry('D', "🦊", "Fox"),
    entry('E', "🐻", "Bear"),
    entry('F', "🐼", "Panda"),
    entry('G', "🐸", "Frog"),
    entry('H', "🐵", "Monkey"),
    entry('J', "🦁", "Lion"),
    entry('K', "🐯", "Tiger"),
    entry('L', "🐨", "Koala"),
    entry('M', "🐮", "Cow"),
    entry('N', "🐷", "Pig"),
    entry('P', "🐔", "Chicken"),
    entry('Q', "🦆", "Duck"),
    entry('R', "🐧", "Penguin"),
    entry('S', "🐢", "Turtle"),
    entry('T', "🐙", "Octopus"),
    entry('U', "🐳", "Whale"),
    entry('V', "🦋", "Butterfly"),
    entry('W', "🐞", "Ladybug"),
    entry('X', "🌟", "Star"),
    entry('Y', "☀️", "Sun"),
    entry('Z', "🌈", "Rainbow"),
    entry('2', "🍎", "Apple"),
    entry('3', "🍌", "Banana"),
    entry('4', "🍇", "Grapes"),
    entry('5', "🍒", "Cherry"),
    entry('6', "🍉", "Watermelon"),
    entry('7', "🥕", "Carrot"),
    entry('8', "🍪", "Cookie"),
    entry('9', "⚽", "Ball"),
];

static BY_CODE: Lazy<HashMap<char, &'static AlphabetEntry>> =
    Lazy::new(|| ALPHABET.iter().map(|e| (e.code, e)).collect());

/// 코드 문자로 항목 조회
pub fn lookup(code: char) -> Option<&'static AlphabetEntry> {
    BY_CODE.get(&code).copied()
}

/// 알파벳에 포함된 문자인지 여부
pub fn contains(code: char) -> bool {
    BY_CODE.contains_key(&code)
}
