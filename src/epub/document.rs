//! 文档模块
//!
//! `Document` 是生成EPUB的聚合根：元数据、按添加顺序排列的章节、图片与样式表。
//! 章节只能追加，不能删除或重排；添加顺序即阅读顺序，也决定默认文件名。

use crate::epub::config::{BookMetadata, Metadata};
use crate::epub::error::{EpubError, Result};
use crate::epub::image::ImageObject;
use crate::epub::media;
use crate::epub::ncx::ContentItem;
use crate::epub::ncx::generator::TOC_FILENAME;
use std::fmt;

/// 章节文件的扩展名
pub const SECTION_EXTENSION: &str = ".xhtml";

/// 自定义目录页生成函数
pub type ContentsGenerator = Box<dyn Fn(&[ContentItem]) -> String + Send + Sync>;

/// 章节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 标题
    pub title: String,
    /// 原始HTML正文
    pub content: String,
    /// 是否从目录与导航中隐藏
    pub exclude_from_contents: bool,
    /// 是否为前置内容（位于目录页之前）
    pub is_front_matter: bool,
    /// 章节在content目录中的文件名
    pub filename: String,
}

/// 添加章节时的可选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionOptions {
    pub exclude_from_contents: bool,
    pub is_front_matter: bool,
    /// 不含扩展名的文件名
    pub filename: Option<String>,
}

impl SectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_from_contents(mut self, exclude: bool) -> Self {
        self.exclude_from_contents = exclude;
        self
    }

    pub fn front_matter(mut self, front_matter: bool) -> Self {
        self.is_front_matter = front_matter;
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// 待生成的电子书文档
pub struct Document {
    metadata: BookMetadata,
    cover: ImageObject,
    images: Vec<ImageObject>,
    sections: Vec<Section>,
    css: String,
    contents_generator: Option<ContentsGenerator>,
}

impl Document {
    /// 创建新文档
    ///
    /// # 参数
    /// * `metadata` - 书籍元数据，id、title、author、cover 为必填项
    ///
    /// # 返回值
    /// * `Result<Document>` - 缺少必填项时返回 `EpubError::MissingMetadata`
    pub fn new(metadata: Metadata) -> Result<Self> {
        let (metadata, cover, images) = metadata.resolve()?;

        Ok(Self {
            metadata,
            cover,
            images,
            sections: Vec::new(),
            css: String::new(),
            contents_generator: None,
        })
    }

    /// 创建使用自定义目录页的文档
    ///
    /// `generator` 接收导航中的条目（前置内容、目录页、正文），返回目录页的HTML。
    pub fn with_contents_generator<F>(metadata: Metadata, generator: F) -> Result<Self>
    where
        F: Fn(&[ContentItem]) -> String + Send + Sync + 'static,
    {
        let mut document = Self::new(metadata)?;
        document.contents_generator = Some(Box::new(generator));
        Ok(document)
    }

    /// 添加章节
    pub fn add_section(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<&Section> {
        self.add_section_with(title, content, SectionOptions::default())
    }

    /// 使用可选项添加章节
    ///
    /// 文件名为指定名称（去除首尾空白）或 `s{N}`，N为当前章节数加一，并追加 `.xhtml`。
    /// 文件名与已有章节或目录页 `toc.xhtml` 重复时返回 `EpubError::DuplicateFilename`；
    /// 指定名称含路径分隔符或 `..` 时返回 `EpubError::InvalidFilename`。出错时文档保持不变。
    pub fn add_section_with(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        options: SectionOptions,
    ) -> Result<&Section> {
        let stem = match options.filename.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                if name.trim().len() != name.len() {
                    log::warn!("章节文件名含首尾空白，已去除: {:?}", name);
                }
                name.trim().to_string()
            }
            _ => format!("s{}", self.sections.len() + 1),
        };
        if stem.contains(['/', '\\']) || stem.contains("..") {
            return Err(EpubError::InvalidFilename(stem));
        }
        let filename = format!("{}{}", stem, SECTION_EXTENSION);

        // 目录页与章节共用content目录
        if filename == TOC_FILENAME || self.sections.iter().any(|s| s.filename == filename) {
            return Err(EpubError::DuplicateFilename(filename));
        }

        log::debug!("添加章节: {}", filename);
        self.sections.push(Section {
            title: title.into(),
            content: content.into(),
            exclude_from_contents: options.exclude_from_contents,
            is_front_matter: options.is_front_matter,
            filename,
        });

        Ok(&self.sections[self.sections.len() - 1])
    }

    /// 追加样式表内容，所有章节共用
    pub fn add_css(&mut self, css: &str) {
        self.css.push_str(css);
    }

    /// 添加图片
    ///
    /// MIME类型无法识别时返回 `EpubError::UnknownImageType`；文件名无效或与封面、
    /// 已有图片重复时分别返回 `EpubError::InvalidImageName` 与 `EpubError::DuplicateImage`。
    pub fn add_image(&mut self, image: ImageObject) -> Result<()> {
        image.check_addition(std::iter::once(&self.cover).chain(&self.images))?;
        self.images.push(image);
        Ok(())
    }

    /// 当前章节数
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    pub fn cover(&self) -> &ImageObject {
        &self.cover
    }

    pub fn images(&self) -> &[ImageObject] {
        &self.images
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn contents_generator(&self) -> Option<&ContentsGenerator> {
        self.contents_generator.as_ref()
    }

    /// 文档语言是否从右到左书写
    pub fn is_rtl(&self) -> bool {
        media::is_rtl_language(&self.metadata.language)
    }

    /// 前置内容章节（带1开始的序号）
    pub fn front_matter(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.numbered_sections().filter(|(_, s)| s.is_front_matter)
    }

    /// 正文章节（带1开始的序号）
    pub fn main_matter(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.numbered_sections().filter(|(_, s)| !s.is_front_matter)
    }

    fn numbered_sections(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections.iter().enumerate().map(|(i, s)| (i + 1, s))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("metadata", &self.metadata)
            .field("cover", &self.cover.name)
            .field("images", &self.images.len())
            .field("sections", &self.sections)
            .field("css", &self.css.len())
            .field("contents_generator", &self.contents_generator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::test_helpers::sample_metadata;

    #[test]
    fn test_new_document() {
        let document = Document::new(sample_metadata()).unwrap();
        assert_eq!(document.section_count(), 0);
        assert_eq!(document.metadata().language, "en");
        assert!(document.metadata().show_contents);
        assert!(document.contents_generator().is_none());
        assert!(!document.is_rtl());
    }

    #[test]
    fn test_missing_cover() {
        let metadata = Metadata {
            cover: None,
            ..sample_metadata()
        };
        let err = Document::new(metadata).unwrap_err();
        assert!(matches!(err, EpubError::MissingMetadata("cover")));
        assert_eq!(err.to_string(), "缺少元数据: cover");
    }

    #[test]
    fn test_auto_numbered_filenames() {
        let mut document = Document::new(sample_metadata()).unwrap();
        document.add_section("One", "<p>1</p>").unwrap();
        document.add_section("Two", "<p>2</p>").unwrap();
        document.add_section("Three", "<p>3</p>").unwrap();

        let names: Vec<&str> = document.sections().iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["s1.xhtml", "s2.xhtml", "s3.xhtml"]);
        assert_eq!(document.section_count(), 3);
    }

    #[test]
    fn test_override_filename() {
        let mut document = Document::new(sample_metadata()).unwrap();
        let section = document
            .add_section_with("Intro", "<p>i</p>", SectionOptions::new().filename("  intro "))
            .unwrap();
        assert_eq!(section.filename, "intro.xhtml");

        let blank = document
            .add_section_with("Blank", "", SectionOptions::new().filename("   "))
            .unwrap();
        assert_eq!(blank.filename, "s2.xhtml");
    }

    #[test]
    fn test_duplicate_filename_is_rejected() {
        let mut document = Document::new(sample_metadata()).unwrap();
        document
            .add_section_with("Second", "", SectionOptions::new().filename("s2"))
            .unwrap();

        let err = document.add_section("Auto", "").unwrap_err();
        assert!(matches!(err, EpubError::DuplicateFilename(ref name) if name == "s2.xhtml"));
        assert_eq!(document.section_count(), 1);

        // 文档仍然可用
        document
            .add_section_with("Third", "", SectionOptions::new().filename("other"))
            .unwrap();
        assert_eq!(document.section_count(), 2);
    }

    #[test]
    fn test_contents_page_filename_is_reserved() {
        let mut document = Document::new(sample_metadata()).unwrap();
        let err = document
            .add_section_with("Intro", "<p>i</p>", SectionOptions::new().filename("toc"))
            .unwrap_err();
        assert!(matches!(err, EpubError::DuplicateFilename(ref name) if name == "toc.xhtml"));
        assert_eq!(document.section_count(), 0);

        document.add_section("One", "<p>1</p>").unwrap();
        let bytes = document.to_bytes().unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_path_like_filenames_are_rejected() {
        let mut document = Document::new(sample_metadata()).unwrap();
        for name in ["../escape", "sub/page", "sub\\page", ".."] {
            let err = document
                .add_section_with("Bad", "", SectionOptions::new().filename(name))
                .unwrap_err();
            assert!(matches!(err, EpubError::InvalidFilename(ref stem) if stem == name));
        }
        assert_eq!(document.section_count(), 0);
    }

    #[test]
    fn test_section_flags() {
        let mut document = Document::new(sample_metadata()).unwrap();
        document
            .add_section_with("Preface", "", SectionOptions::new().front_matter(true))
            .unwrap();
        document
            .add_section_with("Hidden", "", SectionOptions::new().exclude_from_contents(true))
            .unwrap();
        document.add_section("Chapter", "").unwrap();

        let front: Vec<usize> = document.front_matter().map(|(i, _)| i).collect();
        let main: Vec<usize> = document.main_matter().map(|(i, _)| i).collect();
        assert_eq!(front, vec![1]);
        assert_eq!(main, vec![2, 3]);
        assert!(document.sections()[1].exclude_from_contents);
    }

    #[test]
    fn test_add_css_appends() {
        let mut document = Document::new(sample_metadata()).unwrap();
        document.add_css("p { margin: 0; }");
        document.add_css("h1 { color: red; }");
        assert_eq!(document.css(), "p { margin: 0; }h1 { color: red; }");
    }

    #[test]
    fn test_add_image() {
        let mut document = Document::new(sample_metadata()).unwrap();
        document
            .add_image(ImageObject::from_bytes("a.gif", vec![0], Some("image/gif")))
            .unwrap();
        let err = document
            .add_image(ImageObject::from_bytes("b", vec![0], None))
            .unwrap_err();
        assert!(matches!(err, EpubError::UnknownImageType(ref name) if name == "b"));
        assert_eq!(document.images().len(), 1);
    }

    #[test]
    fn test_add_image_rejects_clashing_names() {
        let mut document = Document::new(sample_metadata()).unwrap();

        let err = document
            .add_image(ImageObject::from_bytes("Cover.png", vec![0], Some("image/png")))
            .unwrap_err();
        assert!(matches!(err, EpubError::DuplicateImage(ref name) if name == "Cover.png"));

        document
            .add_image(ImageObject::from_bytes("map.png", vec![0], Some("image/png")))
            .unwrap();
        let err = document
            .add_image(ImageObject::from_bytes("map.png", vec![1], Some("image/png")))
            .unwrap_err();
        assert!(matches!(err, EpubError::DuplicateImage(_)));

        let err = document
            .add_image(ImageObject::from_bytes("", vec![0], Some("image/png")))
            .unwrap_err();
        assert!(matches!(err, EpubError::InvalidImageName(_)));
        assert!(err.is_validation());

        assert_eq!(document.images().len(), 1);
        assert!(document.to_bytes().is_ok());
    }

    #[test]
    fn test_rtl_document() {
        let metadata = Metadata {
            language: Some("HE".to_string()),
            ..sample_metadata()
        };
        let document = Document::new(metadata).unwrap();
        assert!(document.is_rtl());
    }

    #[test]
    fn test_contents_generator() {
        let document =
            Document::with_contents_generator(sample_metadata(), |items| items.len().to_string())
                .unwrap();
        let generator = document.contents_generator().unwrap();
        assert_eq!(generator(&[]), "0");
    }
}
