//! 元数据与书籍配置模块
//!
//! 提供构造文档所需的元数据、默认值解析，以及从YAML文件加载整本书的配置。

use crate::epub::document::{Document, SectionOptions};
use crate::epub::error::{EpubError, Result};
use crate::epub::image::ImageObject;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 默认目录页标题
pub const DEFAULT_CONTENTS_TITLE: &str = "Chapters";

/// 构造文档时提供的元数据
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// 书籍标识符
    pub id: String,
    /// 标题
    pub title: String,
    /// 作者
    pub author: String,
    /// 封面图片
    pub cover: Option<ImageObject>,
    /// ISO语言代码
    pub language: Option<String>,
    /// 丛书名
    pub series: Option<String>,
    /// 丛书中的序号（0视为未设置）
    pub sequence: Option<u32>,
    /// 类别
    pub genre: Option<String>,
    /// 逗号分隔的标签
    pub tags: Option<String>,
    /// 版权声明
    pub copyright: Option<String>,
    /// 出版社
    pub publisher: Option<String>,
    /// 出版日期（YYYY-MM-DD）
    pub published: Option<String>,
    /// 简介
    pub description: Option<String>,
    /// 来源链接
    pub source: Option<String>,
    /// 是否生成目录页
    pub show_contents: Option<bool>,
    /// 目录页标题
    pub contents: Option<String>,
    /// 其他图片
    pub images: Vec<ImageObject>,
}

impl Metadata {
    /// 使用必填字段创建元数据
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        cover: ImageObject,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            cover: Some(cover),
            ..Self::default()
        }
    }

    /// 校验必填字段并应用默认值
    ///
    /// 优先级：id/title/author/cover 必填；language 缺省为 "en"；
    /// show_contents 缺省为 true；contents 缺省为 "Chapters"；sequence 为0时视为未设置。
    /// 其他图片的文件名必须有效，且不能与封面或彼此重复。
    ///
    /// # 返回值
    /// * `Result<(BookMetadata, ImageObject, Vec<ImageObject>)>` - 解析后的元数据、封面与其他图片
    pub fn resolve(self) -> Result<(BookMetadata, ImageObject, Vec<ImageObject>)> {
        let id = required(self.id, "id")?;
        let title = required(self.title, "title")?;
        let author = required(self.author, "author")?;

        let cover = self
            .cover
            .filter(ImageObject::is_identifiable)
            .ok_or(EpubError::MissingMetadata("cover"))?;

        cover.check_name()?;
        for (index, image) in self.images.iter().enumerate() {
            image.check_addition(std::iter::once(&cover).chain(&self.images[..index]))?;
        }

        let book = BookMetadata {
            id,
            title,
            author,
            language: optional(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            series: optional(self.series),
            sequence: self.sequence.filter(|n| *n > 0),
            genre: optional(self.genre),
            tags: optional(self.tags),
            copyright: optional(self.copyright),
            publisher: optional(self.publisher),
            published: optional(self.published),
            description: optional(self.description),
            source: optional(self.source),
            show_contents: self.show_contents.unwrap_or(true),
            contents: self
                .contents
                .unwrap_or_else(|| DEFAULT_CONTENTS_TITLE.to_string()),
        };

        Ok((book, cover, self.images))
    }
}

/// 解析完成的书籍元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub id: String,
    pub title: String,
    pub author: String,
    pub language: String,
    pub series: Option<String>,
    /// 丛书序号，0视为未设置，因此总是大于0
    pub sequence: Option<u32>,
    pub genre: Option<String>,
    pub tags: Option<String>,
    pub copyright: Option<String>,
    pub publisher: Option<String>,
    pub published: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub show_contents: bool,
    pub contents: String,
}

impl BookMetadata {
    /// 拆分后的标签列表（去除空白与空项）
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn required(value: String, field: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        Err(EpubError::MissingMetadata(field))
    } else {
        Ok(value)
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// YAML书籍文件中的元数据部分
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub id: String,
    pub title: String,
    pub author: String,
    /// 封面图片路径（相对于书籍文件）
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_contents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    /// 其他图片路径
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// YAML书籍文件中的章节
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub title: String,
    /// 章节内容文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 直接给出的章节内容
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub exclude_from_contents: bool,
    pub front_matter: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// 整本书的配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookConfig {
    pub metadata: MetadataConfig,
    /// 样式表文件路径
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl BookConfig {
    /// 从YAML文件加载书籍配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// 从YAML文本解析书籍配置
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成示例书籍文件
    pub fn generate_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default_config())
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# 书籍配置文件\n# 路径均相对于本文件所在目录\n# 章节可使用 file 引用HTML片段，或使用 content 直接给出内容\n\n{}",
            yaml_content
        );

        fs::write(path, content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))
    }

    /// 示例配置
    pub fn default_config() -> Self {
        Self {
            metadata: MetadataConfig {
                id: "urn:uuid:00000000-0000-0000-0000-000000000000".to_string(),
                title: "Example Book".to_string(),
                author: "Author".to_string(),
                cover: "cover.png".to_string(),
                language: Some(DEFAULT_LANGUAGE.to_string()),
                ..MetadataConfig::default()
            },
            css: Vec::new(),
            sections: vec![SectionConfig {
                title: "Chapter One".to_string(),
                content: Some("<p>Hello.</p>".to_string()),
                ..SectionConfig::default()
            }],
        }
    }

    /// 根据配置构建文档，相对路径基于 `base_dir` 解析
    pub fn into_document<P: AsRef<Path>>(self, base_dir: P) -> Result<Document> {
        let base_dir = base_dir.as_ref();
        let resolve = |path: &str| -> PathBuf { base_dir.join(path) };

        let meta = self.metadata;
        let cover = if meta.cover.trim().is_empty() {
            None
        } else {
            Some(ImageObject::from_file(resolve(&meta.cover))?)
        };
        let images = meta
            .images
            .iter()
            .map(|path| ImageObject::from_file(resolve(path)))
            .collect::<Result<Vec<_>>>()?;

        let metadata = Metadata {
            id: meta.id,
            title: meta.title,
            author: meta.author,
            cover,
            language: meta.language,
            series: meta.series,
            sequence: meta.sequence,
            genre: meta.genre,
            tags: meta.tags,
            copyright: meta.copyright,
            publisher: meta.publisher,
            published: meta.published,
            description: meta.description,
            source: meta.source,
            show_contents: meta.show_contents,
            contents: meta.contents,
            images,
        };

        let mut document = Document::new(metadata)?;

        for css_path in &self.css {
            let css = fs::read_to_string(resolve(css_path))?;
            document.add_css(&css);
        }

        for section in self.sections {
            let content = match (section.content, section.file) {
                (Some(content), _) => content,
                (None, Some(file)) => fs::read_to_string(resolve(&file))?,
                (None, None) => {
                    return Err(EpubError::ConfigError(format!(
                        "章节 {} 缺少 content 或 file",
                        section.title
                    )));
                }
            };

            let mut options = SectionOptions::new()
                .exclude_from_contents(section.exclude_from_contents)
                .front_matter(section.front_matter);
            if let Some(filename) = section.filename {
                options = options.filename(filename);
            }

            document.add_section_with(section.title, content, options)?;
        }

        Ok(document)
    }
}
