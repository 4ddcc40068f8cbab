//! 故事文本排版
//!
//! 按换行拆分段落，去除每段首尾空白，丢弃空段，段落之间空一行

pub fn format_story_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(format_story_text(""), "");
        assert_eq!(format_story_text(" \n\n  \n"), "");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let text = "  Once upon a time.  \n\n\nThe end.\r\n";
        assert_eq!(format_story_text(text), "Once upon a time.\n\nThe end.");
    }

    #[test]
    fn test_single_paragraph_unchanged() {
        assert_eq!(format_story_text("Just one line."), "Just one line.");
    }
}
