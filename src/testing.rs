//! 테스트용 트랜스포트/클립보드 더블

use crate::clipboard::{ClipboardCapability, SelectionHost, SurfaceHandle};
use crate::error::{RevealError, RevealResult};
use crate::secrets::ScopeKey;
use crate::transport::SecretTransport;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&ScopeKey, usize) -> RevealResult<Option<String>> + Send + Sync>;

/// 호출 횟수와 동시 진행 수를 세고, 지연 후 `respond(scope, n)` 결과를 돌려주는 트랜스포트
pub struct ScriptedTransport {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
    respond: Responder,
}

impl ScriptedTransport {
    pub fn new<F>(delay: Duration, respond: F) -> Arc<Self>
    where
        F: Fn(&ScopeKey, usize) -> RevealResult<Option<String>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay,
            respond: Box::new(respond),
        })
    }

    /// 항상 같은 값을 돌려줌
    pub fn fixed(value: &str) -> Arc<Self> {
        let value = value.to_string();
        Self::new(Duration::from_millis(10), move |_, _| Ok(Some(value.clone())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 동시에 진행된 조회의 최대 개수
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretTransport for ScriptedTransport {
    async fn fetch(&self, scope: &ScopeKey) -> RevealResult<Option<String>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(scope, n)
    }
}

/// `navigator.clipboard` 역할
pub struct FakeCapability {
    pub reject: bool,
    pub written: Mutex<Vec<String>>,
}

impl FakeCapability {
    pub fn new(reject: bool) -> Arc<Self> {
        Arc::new(Self {
            reject,
            written: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ClipboardCapability for FakeCapability {
    async fn write_text(&self, value: &str) -> RevealResult<()> {
        if self.reject {
            return Err(RevealError::ClipboardCopy("permission denied".to_string()));
        }
        self.written.lock().unwrap().push(value.to_string());
        Ok(())
    }
}

/// 임시 입력 surface를 흉내내는 호스트
pub struct FakeSelectionHost {
    pub copy_succeeds: bool,
    pub attached: AtomicUsize,
    pub detached: AtomicUsize,
    pub copied: Mutex<Vec<String>>,
    pub live: Mutex<Vec<(SurfaceHandle, String)>>,
    next: AtomicUsize,
    pub fail_attach: AtomicBool,
}

impl FakeSelectionHost {
    pub fn new(copy_succeeds: bool) -> Arc<Self> {
        Arc::new(Self {
            copy_succeeds,
            attached: AtomicUsize::new(0),
            detached: AtomicUsize::new(0),
            copied: Mutex::new(Vec::new()),
            live: Mutex::new(Vec::new()),
            next: AtomicUsize::new(1),
            fail_attach: AtomicBool::new(false),
        })
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }
}

impl SelectionHost for FakeSelectionHost {
    fn attach(&self, value: &str) -> RevealResult<SurfaceHandle> {
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(RevealError::ClipboardCopy("no document body".to_string()));
        }
        let handle = SurfaceHandle(self.next.fetch_add(1, Ordering::SeqCst) as u64);
        self.attached.fetch_add(1, Ordering::SeqCst);
        self.live.lock().unwrap().push((handle, value.to_string()));
        Ok(handle)
    }

    fn select_and_copy(&self, handle: SurfaceHandle) -> bool {
        if !self.copy_succeeds {
            return false;
        }
        let live = self.live.lock().unwrap();
        match live.iter().find(|(h, _)| *h == handle) {
            Some((_, value)) => {
                self.copied.lock().unwrap().push(value.clone());
                true
            }
            None => false,
        }
    }

    fn detach(&self, handle: SurfaceHandle) {
        self.detached.fetch_add(1, Ordering::SeqCst);
        self.live.lock().unwrap().retain(|(h, _)| *h != handle);
    }
}
