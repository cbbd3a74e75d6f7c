//! 模板替换模块
//!
//! 生成的每个文件都以 `[[TOKEN]]` 形式的占位符书写，最后统一替换为文档字段。
//! 替换只扫描一遍模板，替换值不会被再次展开，因此重复替换不会改变结果。

use crate::epub::config::BookMetadata;
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use std::borrow::Cow;

/// 修改时间的格式
pub const MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 出版日期的格式
pub const PUBLISHED_FORMAT: &str = "%Y-%m-%d";

/// 未设置出版社时使用的名称
pub const ANONYMOUS_PUBLISHER: &str = "Anonymous";

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// 一次生成过程中的占位符替换器
///
/// 同一次生成的所有文件共用同一个时间点。
#[derive(Debug, Clone)]
pub struct Replacements<'a> {
    book: &'a BookMetadata,
    now: DateTime<Utc>,
}

impl<'a> Replacements<'a> {
    /// 以当前时间创建替换器
    pub fn new(book: &'a BookMetadata) -> Self {
        Self::at(book, Utc::now())
    }

    /// 以指定时间创建替换器
    pub fn at(book: &'a BookMetadata, now: DateTime<Utc>) -> Self {
        Self { book, now }
    }

    /// 生成时间点
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// 替换模板中所有可识别的占位符
    ///
    /// 未识别的占位符原样保留；字段缺失时替换为空字符串。
    pub fn apply(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                break;
            };

            let token = &after_open[..end];
            match self.value(token) {
                Some(value) => {
                    result.push_str(&rest[..start]);
                    result.push_str(&value);
                    rest = &after_open[end + CLOSE.len()..];
                }
                None => {
                    // 保留未知的开括号，从其后继续查找
                    result.push_str(&rest[..start + 1]);
                    rest = &rest[start + 1..];
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// 获取占位符对应的值，未知占位符返回None
    fn value(&self, token: &str) -> Option<Cow<'a, str>> {
        let book = self.book;
        let value = match token {
            "EOL" => return Some(Cow::Borrowed("\n")),
            "ID" => text(&book.id),
            "TITLE" => text(&book.title),
            "AUTHOR" | "FILEAS" => text(&book.author),
            "LANGUAGE" => text(&book.language),
            "SERIES" => optional(&book.series),
            "SEQUENCE" => Cow::Owned(book.sequence.map(|n| n.to_string()).unwrap_or_default()),
            "COPYRIGHT" => optional(&book.copyright),
            "PUBLISHER" => text(book.publisher.as_deref().unwrap_or(ANONYMOUS_PUBLISHER)),
            "PUBLISHED" => match &book.published {
                Some(published) => text(published),
                None => Cow::Owned(self.now.format(PUBLISHED_FORMAT).to_string()),
            },
            "YEAR" => Cow::Owned(self.published_year()),
            "MODIFIED" => Cow::Owned(self.now.format(MODIFIED_FORMAT).to_string()),
            "DESCRIPTION" => optional(&book.description),
            "GENRE" => optional(&book.genre),
            "TAGS" => optional(&book.tags),
            "CONTENTS" => text(&book.contents),
            "SOURCE" => optional(&book.source),
            _ => return None,
        };
        Some(value)
    }

    /// 出版年份，未设置或无法识别时使用当前年份
    fn published_year(&self) -> String {
        self.book
            .published
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
            .unwrap_or_else(|| self.now.format("%Y").to_string())
    }
}

fn text(value: &str) -> Cow<'_, str> {
    escape(value)
}

fn optional(value: &Option<String>) -> Cow<'_, str> {
    value.as_deref().map(|v| escape(v)).unwrap_or(Cow::Borrowed(""))
}

/// 以当前时间替换模板的便捷函数
pub fn replace(book: &BookMetadata, template: &str) -> String {
    Replacements::new(book).apply(template)
}
