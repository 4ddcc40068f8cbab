//! Form Controller - 表单控制器
//!
//! 提交流程状态机:
//! Idle -> Validating -> (Invalid -> Idle) | (Valid -> Submitting -> (Success | Failure) -> Idle)
//!
//! Submitting 期间拒绝再次提交；请求不可取消

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::application::error::SubmitError;
use crate::application::ports::{
    ClipboardError, ClipboardPort, FormViewPort, GenerationError, Panel, StoryGeneratorPort,
};
use crate::application::state::SubmissionState;
use crate::domain::story::{FieldErrors, FormField, FormInput, GeneratedStory, StoryRequest};

/// 复制失败时显示在错误面板中的文本
pub const COPY_FAILED_MESSAGE: &str = "Could not copy the story to the clipboard";

/// 控制器配置
#[derive(Debug, Clone)]
pub struct FormControllerConfig {
    /// 复制成功提示的显示时长
    pub copy_feedback: Duration,
}

impl Default for FormControllerConfig {
    fn default() -> Self {
        Self {
            copy_feedback: Duration::from_millis(2000),
        }
    }
}

/// 复制结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// 尚未生成故事，未写入剪贴板
    NothingToCopy,
}

/// 表单控制器
pub struct FormController {
    generator: Arc<dyn StoryGeneratorPort>,
    view: Arc<dyn FormViewPort>,
    clipboard: Arc<dyn ClipboardPort>,
    state: SubmissionState,
    config: FormControllerConfig,
    copy_epoch: Arc<AtomicU64>,
}

impl FormController {
    pub fn new(
        generator: Arc<dyn StoryGeneratorPort>,
        view: Arc<dyn FormViewPort>,
        clipboard: Arc<dyn ClipboardPort>,
        config: FormControllerConfig,
    ) -> Self {
        Self {
            generator,
            view,
            clipboard,
            state: SubmissionState::new(),
            config,
            copy_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// 校验整个表单
    ///
    /// 失败字段显示错误，通过字段清除之前的错误标记
    pub fn validate(&self, input: &FormInput) -> Result<StoryRequest, FieldErrors> {
        let result = input.validate();
        let errors = result.as_ref().err();

        for field in FormField::VALIDATED {
            match errors.and_then(|e| e.get(field)) {
                Some(error) => self.view.set_field_error(field, error.message()),
                None => self.view.clear_field_error(field),
            }
        }

        if let Some(errors) = errors {
            tracing::debug!(
                failed = ?errors.iter().map(|e| e.field().as_str()).collect::<Vec<_>>(),
                "Form validation failed"
            );
        }

        result
    }

    /// 校验单个字段（输入过程中的实时校验）
    pub fn validate_field(&self, input: &FormInput, field: FormField) -> bool {
        match input.validate_field(field) {
            Ok(()) => {
                self.view.clear_field_error(field);
                true
            }
            Err(error) => {
                self.view.set_field_error(field, error.message());
                false
            }
        }
    }

    /// 提交表单
    ///
    /// 校验 -> 发送请求 -> 渲染结果。无论成功失败，结束后都回到空闲状态
    pub async fn submit(&self, input: &FormInput) -> Result<GeneratedStory, SubmitError> {
        if self.state.is_loading() {
            tracing::warn!("Submit ignored: a story is already being generated");
            return Err(SubmitError::Busy);
        }

        let request = self.validate(input)?;

        let Some(_guard) = self.state.try_begin() else {
            tracing::warn!("Submit ignored: a story is already being generated");
            return Err(SubmitError::Busy);
        };

        let submission_id = Uuid::new_v4();
        self.view.set_loading(true);
        self.view.hide_panel(Panel::Error);

        tracing::info!(
            submission_id = %submission_id,
            word_count = request.word_count.value(),
            genre = %request.genre.as_str(),
            creativity_level = %request.creativity_level.as_str(),
            category = %request.category.as_str(),
            has_suggestions = request.suggestions.is_some(),
            "Submitting story request"
        );

        let started = Instant::now();
        let result = self.generator.generate(&request).await;

        match &result {
            Ok(story) => tracing::info!(
                submission_id = %submission_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                story_len = story.text().len(),
                "Story generated"
            ),
            Err(e) => tracing::error!(
                submission_id = %submission_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Story generation failed"
            ),
        }

        self.render(&result);
        if let Ok(story) = &result {
            self.state.set_current_story(story.clone()).await;
        }

        self.view.set_loading(false);

        result.map_err(SubmitError::from)
    }

    /// 渲染结果
    ///
    /// 成功与失败面板同一时刻只显示一个
    pub fn render(&self, result: &Result<GeneratedStory, GenerationError>) {
        match result {
            Ok(story) => {
                self.view.hide_panel(Panel::Error);
                self.view.show_story(story);
                self.view.scroll_into_view(Panel::Story);
            }
            Err(error) => {
                self.view.hide_panel(Panel::Story);
                self.view.show_error(&error.user_message());
                self.view.scroll_into_view(Panel::Error);
            }
        }
    }

    /// 复制当前故事到剪贴板
    ///
    /// 尚未生成故事时不做任何操作；复制成功后短暂显示提示再恢复
    pub async fn copy_story(&self) -> Result<CopyOutcome, ClipboardError> {
        let Some(story) = self.state.current_story().await else {
            tracing::debug!("Copy ignored: no story generated yet");
            return Ok(CopyOutcome::NothingToCopy);
        };

        if let Err(e) = self.clipboard.write_text(story.text()).await {
            tracing::error!(error = %e, "Failed to copy story to clipboard");
            self.view.show_error(COPY_FAILED_MESSAGE);
            self.view.scroll_into_view(Panel::Error);
            return Err(e);
        }

        tracing::info!(story_len = story.text().len(), "Story copied to clipboard");
        self.view.set_copy_confirmation(true);

        // 连续复制时只由最后一次负责恢复
        let epoch = self.copy_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        let copy_epoch = Arc::clone(&self.copy_epoch);
        let view = Arc::clone(&self.view);
        let delay = self.config.copy_feedback;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if copy_epoch.load(Ordering::Acquire) == epoch {
                view.set_copy_confirmation(false);
            }
        });

        Ok(CopyOutcome::Copied)
    }
}
