//! System Clipboard - 系统剪贴板适配器
//!
//! 优先使用外部剪贴板工具（pbcopy / wl-copy / xclip / xsel / clip），
//! 都不可用时向终端输出 OSC 52 转义序列

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{ClipboardError, ClipboardPort};

/// 外部剪贴板工具
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    MacOS,
    Windows,
    Wayland,
    Xclip,
    Xsel,
}

impl ExternalTool {
    fn program(self) -> &'static str {
        match self {
            ExternalTool::MacOS => "pbcopy",
            ExternalTool::Windows => "clip",
            ExternalTool::Wayland => "wl-copy",
            ExternalTool::Xclip => "xclip",
            ExternalTool::Xsel => "xsel",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            ExternalTool::Xclip => &["-selection", "clipboard"],
            ExternalTool::Xsel => &["--clipboard", "--input"],
            _ => &[],
        }
    }
}

/// 剪贴板后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    External(ExternalTool),
    Osc52,
}

/// 系统剪贴板
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    backend: ClipboardBackend,
    max_osc52_payload: usize,
}

impl SystemClipboard {
    /// 常见终端的 OSC 52 负载上限（base64 后字节数）
    pub const DEFAULT_MAX_OSC52_PAYLOAD: usize = 74_994;

    /// 自动探测可用后端
    pub fn detect() -> Self {
        let backend = detect_external_tool()
            .map(ClipboardBackend::External)
            .unwrap_or(ClipboardBackend::Osc52);
        tracing::debug!(backend = ?backend, "Clipboard backend detected");
        Self::with_backend(backend)
    }

    pub fn with_backend(backend: ClipboardBackend) -> Self {
        Self {
            backend,
            max_osc52_payload: Self::DEFAULT_MAX_OSC52_PAYLOAD,
        }
    }

    pub fn with_max_osc52_payload(mut self, max: usize) -> Self {
        self.max_osc52_payload = max;
        self
    }

    pub fn backend(&self) -> ClipboardBackend {
        self.backend
    }

    async fn write_osc52(&self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text);
        let payload_len = sequence.len() - OSC52_FRAME_LEN;
        if payload_len > self.max_osc52_payload {
            return Err(ClipboardError::PayloadTooLarge {
                size: payload_len,
                max: self.max_osc52_payload,
            });
        }

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(sequence.as_bytes())
            .await
            .map_err(|e| ClipboardError::WriteError(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ClipboardError::WriteError(e.to_string()))
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        match self.backend {
            ClipboardBackend::External(tool) => {
                run_command_with_input(tool.program(), tool.args(), text).await
            }
            ClipboardBackend::Osc52 => self.write_osc52(text).await,
        }
    }
}

/// `ESC ] 52 ; c ;` 与结尾 `BEL` 的长度
const OSC52_FRAME_LEN: usize = 8;

/// 生成写入系统剪贴板的 OSC 52 序列
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

fn detect_external_tool() -> Option<ExternalTool> {
    if cfg!(target_os = "macos") && command_exists("pbcopy") {
        return Some(ExternalTool::MacOS);
    }
    if cfg!(target_os = "windows") && command_exists("clip") {
        return Some(ExternalTool::Windows);
    }
    if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
        return Some(ExternalTool::Wayland);
    }
    if env::var_os("DISPLAY").is_some() {
        if command_exists("xclip") {
            return Some(ExternalTool::Xclip);
        }
        if command_exists("xsel") {
            return Some(ExternalTool::Xsel);
        }
    }
    None
}

fn command_exists(cmd: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths)
        .any(|dir| dir.join(cmd).is_file() || dir.join(format!("{cmd}.exe")).is_file())
}

async fn run_command_with_input(
    cmd: &str,
    args: &[&str],
    input: &str,
) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::WriteError(format!("{cmd}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .await
            .map_err(|e| ClipboardError::WriteError(format!("{cmd}: {e}")))?;
    }

    let status = child
        .wait()
        .await
        .map_err(|e| ClipboardError::WriteError(format!("{cmd}: {e}")))?;
    if !status.success() {
        return Err(ClipboardError::WriteError(format!(
            "{cmd} exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hello"), "\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(osc52_sequence("").len(), OSC52_FRAME_LEN);
    }

    #[test]
    fn test_missing_command() {
        assert!(!command_exists("storyform-no-such-clipboard-tool"));
    }

    #[tokio::test]
    async fn test_osc52_rejects_oversized_payload() {
        let clipboard =
            SystemClipboard::with_backend(ClipboardBackend::Osc52).with_max_osc52_payload(8);

        let err = clipboard.write_text("more than six bytes").await.unwrap_err();
        assert!(matches!(err, ClipboardError::PayloadTooLarge { max: 8, .. }));
    }

    #[tokio::test]
    async fn test_failing_external_tool_reports_write_error() {
        let err = run_command_with_input("storyform-no-such-clipboard-tool", &[], "story")
            .await
            .unwrap_err();
        assert!(matches!(err, ClipboardError::WriteError(_)));
    }
}
