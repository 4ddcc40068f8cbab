//! Clipboard Adapters

mod system_clipboard;

pub use system_clipboard::{osc52_sequence, ClipboardBackend, ExternalTool, SystemClipboard};
