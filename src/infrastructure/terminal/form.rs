//! Terminal Form - 交互式终端表单
//!
//! 逐项提示输入字段（字段不合法时原地重新提示），提交后提供复制、重新生成、退出选项

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::application::{FormController, SubmitError};
use crate::domain::story::{FormField, FormInput, WordCount};

use super::TerminalView;

/// 清空可选字段时输入的标记
const CLEAR_MARKER: &str = "-";

/// 结果之后的用户选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    NewStory,
    Quit,
}

/// 交互式终端表单
pub struct TerminalForm<R, W: Write + Send> {
    controller: Arc<FormController>,
    view: Arc<TerminalView<W>>,
    lines: Lines<R>,
}

impl<R, W> TerminalForm<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    pub fn new(controller: Arc<FormController>, view: Arc<TerminalView<W>>, input: R) -> Self {
        Self {
            controller,
            view,
            lines: input.lines(),
        }
    }

    /// 运行交互会话，输入结束或用户退出时返回
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.view
            .line("Story generator. Press Enter to keep the value shown in [brackets].");
        let mut input = FormInput::default();

        loop {
            if !self.fill(&mut input).await? {
                return Ok(());
            }

            match self.controller.submit(&input).await {
                Ok(_) | Err(SubmitError::Generation(_)) => {}
                Err(SubmitError::Invalid(errors)) => {
                    tracing::debug!(errors = errors.len(), "Form rejected, asking again");
                    continue;
                }
                Err(SubmitError::Busy) => {
                    self.view.line("A story is already being generated, please wait.");
                    continue;
                }
            }

            match self.next_action().await? {
                NextAction::NewStory => continue,
                NextAction::Quit => return Ok(()),
            }
        }
    }

    /// 逐项填写表单，输入流结束时返回 false
    async fn fill(&mut self, input: &mut FormInput) -> std::io::Result<bool> {
        for field in FormField::ALL {
            loop {
                self.view.prompt(&prompt_text(field, input.value(field)));
                let Some(line) = self.lines.next_line().await? else {
                    return Ok(false);
                };

                let value = line.trim();
                if field == FormField::Suggestions && value == CLEAR_MARKER {
                    input.set(field, "");
                } else if !value.is_empty() {
                    input.set(field, value);
                }

                if self.controller.validate_field(input, field) {
                    break;
                }
            }
        }
        Ok(true)
    }

    async fn next_action(&mut self) -> std::io::Result<NextAction> {
        loop {
            self.view.prompt("[c]opy story, [n]ew story, [q]uit: ");
            let Some(line) = self.lines.next_line().await? else {
                return Ok(NextAction::Quit);
            };

            match line.trim().to_ascii_lowercase().as_str() {
                "c" | "copy" => {
                    // 复制失败已在错误面板中显示
                    let _ = self.controller.copy_story().await;
                }
                "" | "n" | "new" => return Ok(NextAction::NewStory),
                "q" | "quit" => return Ok(NextAction::Quit),
                other => self.view.line(&format!("Unknown choice: {}", other)),
            }
        }
    }
}

fn prompt_text(field: FormField, current: &str) -> String {
    let hint = match field {
        FormField::WordCount => format!(" ({}-{})", WordCount::MIN, WordCount::MAX),
        FormField::Suggestions => format!(" (optional, '{}' clears)", CLEAR_MARKER),
        _ => String::new(),
    };
    if current.is_empty() {
        format!("{}{}: ", field.label(), hint)
    } else {
        format!("{}{} [{}]: ", field.label(), hint, current)
    }
}
