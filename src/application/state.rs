//! Submission State - 提交状态
//!
//! 由 FormController 独占持有，不是全局单例

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::domain::story::GeneratedStory;

/// 提交状态
///
/// 不变量:
/// - 同一时刻最多一个提交在进行（is_loading）
/// - current_story 只在生成成功时被覆盖，从不清空
#[derive(Debug, Default)]
pub struct SubmissionState {
    is_loading: AtomicBool,
    current_story: RwLock<Option<GeneratedStory>>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    /// 进入加载状态，已在加载中则返回 None
    pub(crate) fn try_begin(&self) -> Option<LoadingGuard<'_>> {
        self.is_loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard { state: self })
    }

    /// 最近一次成功生成的故事
    pub async fn current_story(&self) -> Option<GeneratedStory> {
        self.current_story.read().await.clone()
    }

    pub(crate) async fn set_current_story(&self, story: GeneratedStory) {
        *self.current_story.write().await = Some(story);
    }
}

/// 加载状态守卫，drop 时退出加载状态
pub(crate) struct LoadingGuard<'a> {
    state: &'a SubmissionState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.is_loading.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_loading_guard() {
        let state = SubmissionState::new();
        assert!(!state.is_loading());

        let guard = state.try_begin();
        assert!(guard.is_some());
        assert!(state.is_loading());
        assert!(state.try_begin().is_none());

        drop(guard);
        assert!(!state.is_loading());
        assert!(state.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_current_story_overwritten() {
        let state = SubmissionState::new();
        assert!(state.current_story().await.is_none());

        state.set_current_story(GeneratedStory::new("first")).await;
        state.set_current_story(GeneratedStory::new("second")).await;
        assert_eq!(state.current_story().await.unwrap().text(), "second");
    }
}
