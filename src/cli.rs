//! `classhub-reveal` 명령줄
//!
//! 세션 쿠키로 return code를 조회해서 평문/아이콘/라벨로 출력합니다.

use crate::clipboard::{ClipboardCapability, ClipboardExporter, SystemClipboard};
use crate::config::{load_env_local, RevealConfig};
use crate::error::{ErrorReport, RevealError};
use crate::reveal::{CopySource, RevealPage, RevealState, StatusMessage, ToggleOptions};
use crate::secrets::ScopeKey;
use crate::transport::HttpTransport;
use clap::Parser;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "classhub-reveal", about = "Reveal a Class Hub return code")]
pub struct Args {
    /// 명단 학생 ID (없으면 본인 코드)
    #[arg(long)]
    pub student: Option<String>,

    /// 반 ID (`CLASSHUB_CLASS_ID` 대신)
    #[arg(long)]
    pub class: Option<String>,

    /// 아이콘 라벨도 출력
    #[arg(long)]
    pub labels: bool,

    /// 클립보드로 복사
    #[arg(long)]
    pub copy: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

const ELEMENT_ID: &str = "cli-return-code";

/// 실행 결과 (종료 코드 결정용)
pub async fn run(args: Args) -> Result<(), ErrorReport> {
    load_env_local();

    let mut config = RevealConfig::from_env().map_err(|e| ErrorReport {
        code: "config_error".to_string(),
        message: e.to_string(),
        details: None,
    })?;
    if let Some(class_id) = args.class.as_deref() {
        config = config.with_class_id(class_id);
    }

    let transport = HttpTransport::new(&config)?;
    let capability = SystemClipboard::detect()
        .map(|clipboard| Arc::new(clipboard) as Arc<dyn ClipboardCapability>);
    let exporter = ClipboardExporter::new(capability, None);

    let scope = match args.student.as_deref() {
        Some(id) => ScopeKey::subject(id),
        None => ScopeKey::Own,
    };

    let mut page = RevealPage::new(Arc::new(transport), exporter);
    page.add_toggle(ELEMENT_ID, scope.clone(), ToggleOptions::default().with_glyphs());
    page.toggle(ELEMENT_ID).await;

    {
        let toggle = page
            .element(ELEMENT_ID)
            .await
            .ok_or_else(|| ErrorReport::from(RevealError::InvalidScope("missing_element")))?;
        if let RevealState::Error(err) = toggle.state() {
            return Err(ErrorReport::from(err.clone()));
        }

        println!("{}", toggle.text());
        if let Some(icons) = toggle.icons() {
            println!("{}", icons.text);
            if args.labels {
                if let Some(label) = &icons.aria_label {
                    println!("{}", label);
                }
            }
        }
    }

    if args.copy {
        if let Some(status) = page.copy(&CopySource::Secret(scope)).await {
            eprintln!("{}", status);
            if status == StatusMessage::CopyFailed {
                return Err(ErrorReport::from(RevealError::ClipboardCopy(
                    status.text().to_string(),
                )));
            }
        }
    }

    Ok(())
}
