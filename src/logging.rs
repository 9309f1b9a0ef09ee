//! tracing 구독자 설정 (바이너리에서만 호출)

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// `RUST_LOG`가 있으면 그대로, 없으면 `info` (verbose면 `debug`)
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // 이미 설치된 구독자가 있으면 무시
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
