use std::fmt;

/// 어떤 return code를 조회할지 구분하는 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// 로그인한 학생 본인
    Own,
    /// 교사 명단의 학생 (학생 ID)
    Subject(String),
}

impl ScopeKey {
    /// 명단 학생 scope. 앞뒤 공백은 제거
    pub fn subject(id: impl AsRef<str>) -> Self {
        ScopeKey::Subject(id.as_ref().trim().to_string())
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Own => write!(f, "self"),
            ScopeKey::Subject(id) => write!(f, "student:{}", id),
        }
    }
}
