//! 测试辅助函数

use crate::epub::config::Metadata;
use crate::epub::document::{Document, SectionOptions};
use crate::epub::image::ImageObject;
use crate::epub::replacements::Replacements;
use chrono::{DateTime, TimeZone, Utc};

pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// 示例元数据：id="1"，标题 "Example Book"，封面 "Cover.png"
pub fn sample_metadata() -> Metadata {
    let cover = ImageObject::from_data_uri("Cover.png", PNG_DATA_URI).unwrap();
    Metadata::new("1", "Example Book", "Author", cover)
}

/// 包含一个章节的示例文档
pub fn sample_document() -> Document {
    let mut document = Document::new(sample_metadata()).unwrap();
    document.add_section("Chapter One", "<p>Hi</p>").unwrap();
    document
}

/// 包含前置内容、隐藏章节与正文的文档
pub fn mixed_document(metadata: Metadata) -> Document {
    let mut document = Document::new(metadata).unwrap();
    document.add_section("Chapter One", "<p>1</p>").unwrap();
    document
        .add_section_with("Dedication", "<p>d</p>", SectionOptions::new().front_matter(true))
        .unwrap();
    document
        .add_section_with("Hidden", "<p>h</p>", SectionOptions::new().exclude_from_contents(true))
        .unwrap();
    document
        .add_section_with(
            "Hidden Preface",
            "<p>hp</p>",
            SectionOptions::new().front_matter(true).exclude_from_contents(true),
        )
        .unwrap();
    document.add_section("Chapter Two", "<p>2</p>").unwrap();
    document
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
}

pub fn replacements(document: &Document) -> Replacements<'_> {
    Replacements::at(document.metadata(), fixed_time())
}
