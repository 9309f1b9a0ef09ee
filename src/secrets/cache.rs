//! Secret Cache - scope별 single-flight return code 캐시
//!
//! - 상태: 없음(absent) → 조회 중(pending) → 확보(resolved)
//! - 조회 중에 들어온 요청은 새 조회를 만들지 않고 같은 결과를 기다림
//! - 실패 시 scope를 비워서 다음 요청이 처음부터 다시 조회
//! - 확보된 값은 만료 없이 뷰가 살아있는 동안 유지, drop 시 zeroize

use crate::error::{RevealError, RevealResult};
use crate::secrets::ScopeKey;
use crate::transport::SecretTransport;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use zeroize::Zeroizing;

type SharedFetch = Shared<BoxFuture<'static, RevealResult<String>>>;

enum Slot {
    /// 진행 중인 조회. 대기자는 모두 이 handle을 clone해서 기다림
    Pending(SharedFetch),
    Resolved(Zeroizing<String>),
}

/// 외부에 보여주는 scope 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Absent,
    Pending,
    Resolved,
}

/// Scoped Secret Cache
///
/// 페이지 컨트롤러가 하나 만들어서 각 요소에 참조로 넘깁니다.
/// `Clone`은 같은 저장소를 공유하는 handle을 만듭니다.
#[derive(Clone)]
pub struct SecretCache {
    transport: Arc<dyn SecretTransport>,
    entries: Arc<Mutex<HashMap<ScopeKey, Slot>>>,
}

impl SecretCache {
    pub fn new(transport: Arc<dyn SecretTransport>) -> Self {
        Self {
            transport,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// return code 가져오기
    ///
    /// 1. 확보된 값이 있으면 바로 반환
    /// 2. 조회 중이면 그 조회에 합류
    /// 3. 없으면 조회를 시작하고 pending으로 등록
    ///
    /// 상태 확인과 pending 등록은 한 번의 lock 안에서 일어납니다.
    pub async fn get(&self, scope: &ScopeKey) -> RevealResult<String> {
        let fetch = {
            let mut entries = self.entries.lock().await;
            match entries.get(scope) {
                Some(Slot::Resolved(value)) => return Ok(value.as_str().to_owned()),
                Some(Slot::Pending(fetch)) => {
                    debug!(%scope, "[SecretCache] Joining in-flight retrieval");
                    fetch.clone()
                }
                None => {
                    let fetch = self.start_fetch(scope.clone());
                    entries.insert(scope.clone(), Slot::Pending(fetch.clone()));
                    fetch
                }
            }
        };

        fetch.await
    }

    /// 조회를 시작하지 않고 확보된 값만 확인
    pub async fn peek(&self, scope: &ScopeKey) -> Option<String> {
        match self.entries.lock().await.get(scope) {
            Some(Slot::Resolved(value)) => Some(value.as_str().to_owned()),
            _ => None,
        }
    }

    pub async fn state(&self, scope: &ScopeKey) -> EntryState {
        match self.entries.lock().await.get(scope) {
            None => EntryState::Absent,
            Some(Slot::Pending(_)) => EntryState::Pending,
            Some(Slot::Resolved(_)) => EntryState::Resolved,
        }
    }

    /// 확보된 scope 수
    pub async fn resolved_count(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|slot| matches!(slot, Slot::Resolved(_)))
            .count()
    }

    /// 조회 task 생성
    ///
    /// 조회는 별도 task에서 끝까지 실행됩니다. 기다리던 요소가 모두 사라져도
    /// 결과는 캐시에 반영됩니다.
    fn start_fetch(&self, scope: ScopeKey) -> SharedFetch {
        let transport = Arc::clone(&self.transport);
        let entries = Arc::clone(&self.entries);
        let task_scope = scope.clone();

        debug!(%scope, "[SecretCache] Retrieval started");

        let handle = tokio::spawn(async move {
            let result = retrieve(transport.as_ref(), &task_scope).await;

            let mut entries = entries.lock().await;
            match &result {
                Ok(value) => {
                    entries.insert(
                        task_scope.clone(),
                        Slot::Resolved(Zeroizing::new(value.clone())),
                    );
                    debug!(scope = %task_scope, "[SecretCache] Retrieval resolved");
                }
                Err(err) => {
                    entries.remove(&task_scope);
                    warn!(
                        scope = %task_scope,
                        code = err.code(),
                        "[SecretCache] Retrieval failed, scope cleared"
                    );
                }
            }
            result
        });

        let entries = Arc::clone(&self.entries);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_err) => {
                    // task가 중단되면 pending이 남지 않도록 정리
                    let mut entries = entries.lock().await;
                    if matches!(entries.get(&scope), Some(Slot::Pending(_))) {
                        entries.remove(&scope);
                    }
                    warn!(%scope, "[SecretCache] Retrieval task aborted: {}", join_err);
                    Err(RevealError::Transport(format!(
                        "retrieval task aborted: {}",
                        join_err
                    )))
                }
            }
        }
        .boxed()
        .shared()
    }
}

/// 트랜스포트 호출 + 응답 정리 (trim, 빈 값은 실패)
async fn retrieve(transport: &dyn SecretTransport, scope: &ScopeKey) -> RevealResult<String> {
    let raw = Zeroizing::new(transport.fetch(scope).await?.unwrap_or_default());
    let value = raw.trim();
    if value.is_empty() {
        return Err(RevealError::MissingValue);
    }
    Ok(value.to_string())
}

impl fmt::Debug for SecretCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 평문은 절대 출력하지 않음
        let mut out = f.debug_struct("SecretCache");
        match self.entries.try_lock() {
            Ok(entries) => {
                let states: Vec<String> = entries
                    .iter()
                    .map(|(scope, slot)| match slot {
                        Slot::Pending(_) => format!("{}=pending", scope),
                        Slot::Resolved(_) => format!("{}=resolved", scope),
                    })
                    .collect();
                out.field("entries", &states);
            }
            Err(_) => {
                out.field("entries", &"<locked>");
            }
        }
        out.finish()
    }
}
