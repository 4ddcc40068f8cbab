//! Story Form Context - 表单输入与校验

use serde::Serialize;

use super::{Category, CreativityLevel, FieldError, FieldErrors, Genre, WordCount};

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    WordCount,
    CreativityLevel,
    Genre,
    Category,
    Suggestions,
}

impl FormField {
    /// 全部字段，按表单显示顺序
    pub const ALL: [FormField; 5] = [
        FormField::WordCount,
        FormField::CreativityLevel,
        FormField::Genre,
        FormField::Category,
        FormField::Suggestions,
    ];

    /// 需要校验的字段
    pub const VALIDATED: [FormField; 4] = [
        FormField::WordCount,
        FormField::Genre,
        FormField::CreativityLevel,
        FormField::Category,
    ];

    /// 请求体中的字段名
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::WordCount => "word_count",
            FormField::CreativityLevel => "creativity_level",
            FormField::Genre => "genre",
            FormField::Category => "category",
            FormField::Suggestions => "suggestions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::WordCount => "Word count",
            FormField::CreativityLevel => "Creativity level",
            FormField::Genre => "Genre",
            FormField::Category => "Category",
            FormField::Suggestions => "Suggestions",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 表单原始输入
///
/// 每次提交时从 UI 状态重新读取，请求结束后丢弃
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub word_count: String,
    pub creativity_level: String,
    pub genre: String,
    pub category: String,
    pub suggestions: String,
}

impl FormInput {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::WordCount => &self.word_count,
            FormField::CreativityLevel => &self.creativity_level,
            FormField::Genre => &self.genre,
            FormField::Category => &self.category,
            FormField::Suggestions => &self.suggestions,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::WordCount => self.word_count = value,
            FormField::CreativityLevel => self.creativity_level = value,
            FormField::Genre => self.genre = value,
            FormField::Category => self.category = value,
            FormField::Suggestions => self.suggestions = value,
        }
    }

    /// 校验单个字段
    pub fn validate_field(&self, field: FormField) -> Result<(), FieldError> {
        match field {
            FormField::WordCount => WordCount::parse(&self.word_count).map(drop),
            FormField::CreativityLevel => CreativityLevel::new(&self.creativity_level).map(drop),
            FormField::Genre => Genre::new(&self.genre).map(drop),
            FormField::Category => Category::new(&self.category).map(drop),
            FormField::Suggestions => Ok(()),
        }
    }

    /// 校验整个表单
    ///
    /// 每个字段独立校验，不短路，返回全部失败字段
    pub fn validate(&self) -> Result<StoryRequest, FieldErrors> {
        let word_count = WordCount::parse(&self.word_count);
        let genre = Genre::new(&self.genre);
        let creativity_level = CreativityLevel::new(&self.creativity_level);
        let category = Category::new(&self.category);

        match (word_count, genre, creativity_level, category) {
            (Ok(word_count), Ok(genre), Ok(creativity_level), Ok(category)) => Ok(StoryRequest {
                word_count,
                creativity_level,
                genre,
                category,
                suggestions: normalize_suggestions(&self.suggestions),
            }),
            (word_count, genre, creativity_level, category) => {
                let errors = [
                    word_count.err(),
                    genre.err(),
                    creativity_level.err(),
                    category.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(FieldErrors::new(errors))
            }
        }
    }
}

fn normalize_suggestions(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 校验通过的故事生成请求
///
/// 序列化结果即为发往故事生成服务的 JSON 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryRequest {
    pub word_count: WordCount,
    pub creativity_level: CreativityLevel,
    pub genre: Genre,
    pub category: Category,
    /// 空白建议序列化为 null
    pub suggestions: Option<String>,
}
