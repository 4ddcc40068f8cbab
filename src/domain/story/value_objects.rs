//! Story Form Context - Value Objects

use serde::Serialize;

use super::{FieldError, FormField};

/// 故事字数
///
/// 不变量:
/// - MIN <= value <= MAX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordCount(u32);

impl WordCount {
    pub const MIN: u32 = 50;
    pub const MAX: u32 = 2000;

    pub fn new(value: u32) -> Result<Self, FieldError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Self::out_of_range());
        }
        Ok(Self(value))
    }

    /// 解析表单中的字数输入
    ///
    /// 宽松整数解析：忽略首尾空白，取可选符号之后的前导数字，
    /// 数字之后的内容被忽略（"120 words" -> 120，"12.7" -> 12）。
    /// 没有前导数字视为非数字。
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let value = parse_leading_integer(raw).ok_or_else(Self::out_of_range)?;
        let value = u32::try_from(value).map_err(|_| Self::out_of_range())?;
        Self::new(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    fn out_of_range() -> FieldError {
        FieldError::new(
            FormField::WordCount,
            format!(
                "Word count must be between {} and {}",
                Self::MIN,
                Self::MAX
            ),
        )
    }
}

impl std::fmt::Display for WordCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // 超长数字按溢出处理，必然超出范围
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn required(field: FormField, raw: &str, message: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, message));
    }
    Ok(value.to_string())
}

/// 创意程度（必选）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CreativityLevel(String);

impl CreativityLevel {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        required(FormField::CreativityLevel, raw, "Select a creativity level").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 故事类型（必选）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Genre(String);

impl Genre {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        required(FormField::Genre, raw, "Select a genre").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 故事分类（必选）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        required(FormField::Category, raw, "Select a category").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
