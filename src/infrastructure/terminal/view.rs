//! Terminal View - 终端视图
//!
//! 实现 FormViewPort，把表单状态输出到任意 Write（默认 stdout）

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::ports::{FormViewPort, Panel};
use crate::domain::format_story_text;
use crate::domain::story::{FormField, GeneratedStory};

/// 视图当前状态
#[derive(Debug, Default)]
struct ViewState {
    field_errors: HashMap<FormField, String>,
    loading: bool,
    visible_panel: Option<Panel>,
    copy_confirmed: bool,
}

/// 终端视图
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    state: Mutex<ViewState>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            state: Mutex::new(ViewState::default()),
        }
    }

    /// 输出提示文本（不换行）
    pub fn prompt(&self, text: &str) {
        self.write(format_args!("{}", text));
        self.flush();
    }

    pub fn line(&self, text: &str) {
        self.write(format_args!("{}\n", text));
    }

    pub fn field_error(&self, field: FormField) -> Option<String> {
        self.state().field_errors.get(&field).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn visible_panel(&self) -> Option<Panel> {
        self.state().visible_panel
    }

    pub fn is_copy_confirmed(&self) -> bool {
        self.state().copy_confirmed
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, args: fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_fmt(args) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn flush(&self) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.flush() {
            tracing::warn!(error = %e, "Failed to flush terminal");
        }
    }
}

impl<W: Write + Send> FormViewPort for TerminalView<W> {
    fn set_field_error(&self, field: FormField, message: &str) {
        self.state().field_errors.insert(field, message.to_string());
        self.write(format_args!("  ✗ {}: {}\n", field.label(), message));
    }

    fn clear_field_error(&self, field: FormField) {
        self.state().field_errors.remove(&field);
    }

    fn set_loading(&self, loading: bool) {
        self.state().loading = loading;
        if loading {
            self.write(format_args!("⏳ Generating story...\n"));
        }
    }

    fn show_story(&self, story: &GeneratedStory) {
        self.state().visible_panel = Some(Panel::Story);
        self.write(format_args!(
            "\n──── Your story ({} words, {}) ────\n\n{}\n\n",
            story.word_len(),
            story.generated_at().format("%H:%M:%S"),
            format_story_text(story.text())
        ));
    }

    fn show_error(&self, message: &str) {
        self.state().visible_panel = Some(Panel::Error);
        self.write(format_args!("\n⚠ Error: {}\n\n", message));
    }

    fn hide_panel(&self, panel: Panel) {
        let mut state = self.state();
        if state.visible_panel == Some(panel) {
            state.visible_panel = None;
        }
    }

    fn scroll_into_view(&self, _panel: Panel) {
        // 终端输出总在最底部，刷新即可见
        self.flush();
    }

    fn set_copy_confirmation(&self, visible: bool) {
        self.state().copy_confirmed = visible;
        if visible {
            self.write(format_args!("✅ Copied!\n"));
            self.flush();
        }
    }
}

#[cfg(test)]
impl TerminalView<Vec<u8>> {
    pub(crate) fn output(&self) -> String {
        let out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_tracked_per_field() {
        let view = TerminalView::new(Vec::<u8>::new());
        view.set_field_error(FormField::Genre, "Select a genre");
        assert_eq!(view.field_error(FormField::Genre).as_deref(), Some("Select a genre"));
        assert!(view.output().contains("Genre: Select a genre"));

        view.clear_field_error(FormField::Genre);
        assert!(view.field_error(FormField::Genre).is_none());
    }

    #[test]
    fn test_story_panel_formats_paragraphs() {
        let view = TerminalView::new(Vec::<u8>::new());
        view.show_story(&GeneratedStory::new("First.\n\n\n  Second.  "));
        view.scroll_into_view(Panel::Story);

        assert_eq!(view.visible_panel(), Some(Panel::Story));
        assert!(view.output().contains("First.\n\nSecond."));
    }

    #[test]
    fn test_loading_and_copy_flags() {
        let view = TerminalView::new(Vec::<u8>::new());
        view.set_loading(true);
        assert!(view.is_loading());
        view.set_loading(false);
        assert!(!view.is_loading());

        view.set_copy_confirmation(true);
        assert!(view.is_copy_confirmed());
        view.set_copy_confirmation(false);
        assert!(!view.is_copy_confirmed());
        assert_eq!(view.output().matches("Copied!").count(), 1);
    }

    #[test]
    fn test_only_one_panel_visible() {
        let view = TerminalView::new(Vec::<u8>::new());
        view.show_story(&GeneratedStory::new("story"));
        view.hide_panel(Panel::Story);
        view.show_error("Server error: 500");

        assert_eq!(view.visible_panel(), Some(Panel::Error));
        view.hide_panel(Panel::Story);
        assert_eq!(view.visible_panel(), Some(Panel::Error));
        view.hide_panel(Panel::Error);
        assert_eq!(view.visible_panel(), None);
    }
}
