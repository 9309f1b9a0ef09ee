//! Reveal 설정
//!
//! 환경변수에서 읽습니다. 개발 환경에서는 `.env.local`을 먼저 로드합니다.
//!
//! - `CLASSHUB_BASE_URL` (필수): 예) `https://classhub.example.org`
//! - `CLASSHUB_CLASS_ID`: 교사 명단 조회 시 필요
//! - `CLASSHUB_SESSION_COOKIE`: `Cookie` 헤더로 그대로 전송
//! - `CLASSHUB_TIMEOUT_SECS`: 요청 타임아웃 (기본 10초)

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const ENV_BASE_URL: &str = "CLASSHUB_BASE_URL";
pub const ENV_CLASS_ID: &str = "CLASSHUB_CLASS_ID";
pub const ENV_SESSION_COOKIE: &str = "CLASSHUB_SESSION_COOKIE";
pub const ENV_TIMEOUT_SECS: &str = "CLASSHUB_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// 트랜스포트 설정
#[derive(Clone)]
pub struct RevealConfig {
    pub base_url: Url,
    pub class_id: Option<String>,
    pub session_cookie: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for RevealConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealConfig")
            .field("base_url", &self.base_url.as_str())
            .field("class_id", &self.class_id)
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RevealConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            class_id: None,
            session_cookie: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_class_id(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = non_empty(class_id.into());
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = non_empty(cookie.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 구성 (테스트에서 env 없이 사용)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .and_then(non_empty)
            .ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let mut config = Self::new(&base_url)?;

        if let Some(class_id) = lookup(ENV_CLASS_ID) {
            config = config.with_class_id(class_id);
        }
        if let Some(cookie) = lookup(ENV_SESSION_COOKIE) {
            config = config.with_session_cookie(cookie);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).and_then(non_empty) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// 상대 경로 join이 올바르게 되도록 끝에 `/`를 보장
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =====================================
// .env.local 로더
// =====================================

/// 느슨한 로드 대상 키 접두사
const ENV_PREFIX: &str = "CLASSHUB_";
const ENV_FILE: &str = ".env.local";

/// `[export ]CLASSHUB_KEY=value` 한 줄을 키/값으로. 대상이 아니면 None
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let suffix = key.strip_prefix(ENV_PREFIX)?;
    if suffix.is_empty()
        || !suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return None;
    }

    let value = value.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value);
    Some((key, unquoted))
}

/// dotenv 문법이 깨진 파일에서 `CLASSHUB_*` 라인만 골라 로드
///
/// 이미 비어 있지 않은 환경변수는 덮어쓰지 않습니다. 로드한 개수를 반환.
pub fn try_load_env_lenient(path: &Path) -> std::io::Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let pending: Vec<(&str, &str)> = text
        .lines()
        .filter_map(parse_env_line)
        .filter(|(key, _)| non_empty(std::env::var(key).unwrap_or_default()).is_none())
        .collect();

    for (key, value) in &pending {
        std::env::set_var(key, value);
    }
    Ok(pending.len())
}

fn find_upwards(start: PathBuf, filename: &str, max_hops: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_hops + 1)
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

/// `.env.local` 탐색 및 로드. 파일이 없어도 실패하지 않음
///
/// 작업 디렉터리에서 위로 6단계, 실행 파일 위치에서 위로 8단계까지 찾습니다.
pub fn load_env_local() {
    let from_cwd = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_upwards(cwd, ENV_FILE, 6));
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .and_then(|dir| find_upwards(dir, ENV_FILE, 8));

    for path in from_cwd.into_iter().chain(from_exe) {
        if dotenvy::from_path(&path).is_ok() {
            tracing::debug!(path = %path.display(), "[Config] Loaded env file");
            return;
        }
        match try_load_env_lenient(&path) {
            Ok(0) => {}
            Ok(loaded) => {
                tracing::debug!(
                    path = %path.display(),
                    loaded,
                    "[Config] Loaded env file (lenient)"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Config] Env file unreadable");
            }
        }
    }
}
