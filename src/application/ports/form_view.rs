//! Form View Port - 表单视图绑定
//!
//! 控制器只通过该接口读写界面，不关心具体渲染方式（终端、浏览器等）

use crate::domain::story::{FormField, GeneratedStory};

/// 结果面板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// 故事结果面板
    Story,
    /// 全局错误面板
    Error,
}

/// Form View Port
///
/// 所有方法都是同步的，只做界面状态更新
pub trait FormViewPort: Send + Sync {
    /// 在字段旁显示校验错误
    fn set_field_error(&self, field: FormField, message: &str);

    /// 清除字段的校验错误标记
    fn clear_field_error(&self, field: FormField);

    /// 切换加载状态（加载中禁用提交控件）
    fn set_loading(&self, loading: bool);

    /// 在故事面板中显示故事
    fn show_story(&self, story: &GeneratedStory);

    /// 在错误面板中显示错误
    fn show_error(&self, message: &str);

    fn hide_panel(&self, panel: Panel);

    fn scroll_into_view(&self, panel: Panel);

    /// 复制成功提示的显示与恢复
    fn set_copy_confirmation(&self, visible: bool);
}
