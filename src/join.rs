//! Join Form - return code 입력 코덱
//!
//! 키보드 입력과 아이콘 팔레트 입력을 같은 버퍼로 받습니다.
//! 버퍼는 항상 정규화된 값만 가집니다.

use crate::codec::{self, Palette, MAX_CODE_LEN};
use crate::models::ErrorBody;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// return code 입력칸
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnCodeInput {
    value: String,
}

impl ReturnCodeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 키보드 입력 전체를 정규화해서 반영
    pub fn set_raw(&mut self, raw: &str) {
        self.value = codec::normalize(raw, MAX_CODE_LEN);
    }

    /// 팔레트 선택 한 글자 추가. 가득 찼거나 알파벳이 아니면 false
    pub fn push(&mut self, code: char) -> bool {
        if self.value.chars().count() >= MAX_CODE_LEN {
            return false;
        }
        let normalized = codec::normalize(&code.to_string(), 1);
        if normalized.is_empty() {
            return false;
        }
        self.value.push_str(&normalized);
        true
    }

    pub fn backspace(&mut self) -> Option<char> {
        self.value.pop()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn glyphs(&self) -> String {
        codec::render_glyphs(&self.value, " ")
    }

    pub fn labels(&self) -> String {
        codec::render_labels(&self.value, ", ")
    }
}

/// join 폼: 입력칸 + 팔레트
#[derive(Debug, Clone, Default)]
pub struct JoinForm {
    input: Arc<Mutex<ReturnCodeInput>>,
}

impl JoinForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReturnCodeInput> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 입력칸에 연결된 팔레트
    pub fn palette(&self) -> Palette {
        let input = Arc::clone(&self.input);
        codec::build_palette(move |code| {
            input
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(code);
        })
    }

    pub fn type_text(&self, raw: &str) {
        self.lock().set_raw(raw);
    }

    pub fn backspace(&self) -> Option<char> {
        self.lock().backspace()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// 제출용 값
    pub fn return_code(&self) -> String {
        self.lock().value().to_string()
    }

    pub fn snapshot(&self) -> ReturnCodeInput {
        self.lock().clone()
    }
}

/// join 요청 거부 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRejection {
    InvalidClassCode,
    InvalidReturnCode,
    ClassLocked,
    EnrollmentClosed,
    InviteRequired,
    MissingFields,
    InviteInvalid,
    InviteInactive,
    InviteExpired,
    InviteFull,
    RateLimited,
    SiteRestricted(Option<String>),
    SecurityCheck,
    Server,
    Other,
}

impl JoinRejection {
    /// 응답 상태 코드 + 본문의 `error` 코드로 분류. 에러 코드가 우선
    pub fn from_response(status: u16, body: &ErrorBody) -> Self {
        match body.error.as_deref().unwrap_or("join_failed") {
            "invalid_code" => JoinRejection::InvalidClassCode,
            "invalid_return_code" => JoinRejection::InvalidReturnCode,
            "class_locked" => JoinRejection::ClassLocked,
            "class_enrollment_closed" => JoinRejection::EnrollmentClosed,
            "invite_required" => JoinRejection::InviteRequired,
            "missing_fields" => JoinRejection::MissingFields,
            "invite_invalid" => JoinRejection::InviteInvalid,
            "invite_inactive" => JoinRejection::InviteInactive,
            "invite_expired" => JoinRejection::InviteExpired,
            "invite_seat_cap_reached" => JoinRejection::InviteFull,
            "rate_limited" => JoinRejection::RateLimited,
            "site_mode_restricted" => JoinRejection::SiteRestricted(body.message.clone()),
            _ if status == 403 => JoinRejection::SecurityCheck,
            _ if status >= 500 => JoinRejection::Server,
            _ => JoinRejection::Other,
        }
    }

    pub fn message(&self) -> String {
        let text = match self {
            JoinRejection::InvalidClassCode => "That class code is not recognized.",
            JoinRejection::InvalidReturnCode => "That return code is not valid for this class.",
            JoinRejection::ClassLocked => "This class is locked right now.",
            JoinRejection::EnrollmentClosed => "Enrollment for this class is closed.",
            JoinRejection::InviteRequired => "This class accepts joins by invite link only.",
            JoinRejection::MissingFields => "Please enter a class code and your name.",
            JoinRejection::InviteInvalid => "That invite link is not valid.",
            JoinRejection::InviteInactive => "That invite link is disabled.",
            JoinRejection::InviteExpired => "That invite link has expired.",
            JoinRejection::InviteFull => {
                "This invite is full right now. Ask your teacher for a new invite link."
            }
            JoinRejection::RateLimited => "Too many join attempts. Wait a minute and try again.",
            JoinRejection::SiteRestricted(Some(message)) if !message.trim().is_empty() => {
                return message.trim().to_string();
            }
            JoinRejection::SiteRestricted(_) => "Joining is temporarily unavailable.",
            JoinRejection::SecurityCheck => {
                "Security check blocked the join request. Reload and try again."
            }
            JoinRejection::Server => "Server error while joining. Please try again in a moment.",
            JoinRejection::Other => "Could not join. Try again.",
        };
        text.to_string()
    }
}
