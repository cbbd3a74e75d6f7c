//! 文件列表模块
//!
//! 将文档展开为归档所需的有序文件列表。列表是生成核心与打包器之间唯一的约定。

use crate::epub::container::{CONTAINER_FOLDER, CONTAINER_FILENAME, container_document};
use crate::epub::document::Document;
use crate::epub::error::{EpubError, Result};
use crate::epub::image::{ImageData, ImageObject};
use crate::epub::markup;
use crate::epub::media::DataUri;
use crate::epub::ncx::{generator::TOC_FILENAME, navigation_document};
use crate::epub::opf::{OPF_FILENAME, package_document};
use crate::epub::replacements::Replacements;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// EPUB的mimetype内容
pub const MIMETYPE: &str = "application/epub+zip";

/// 除mimetype外各文件使用的压缩级别
pub const DEFLATE_LEVEL: i64 = 4;

/// OPF所在目录
pub const OEBPF_FOLDER: &str = "OEBPF";
pub const CSS_FOLDER: &str = "OEBPF/css";
pub const CONTENT_FOLDER: &str = "OEBPF/content";
pub const IMAGES_FOLDER: &str = "OEBPF/images";

/// 压缩方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// 不压缩
    Stored,
    /// deflate压缩及其级别
    Deflated { level: i64 },
}

impl Compression {
    pub fn deflated() -> Self {
        Compression::Deflated {
            level: DEFLATE_LEVEL,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::Stored => f.write_str("STORE"),
            Compression::Deflated { level } => write!(f, "DEFLATE({})", level),
        }
    }
}

/// 文件内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
    /// 尚未解码的内嵌数据，打包时解码
    Inline(DataUri),
}

impl FileContent {
    /// 内容长度（内嵌数据为编码后的长度）
    pub fn len(&self) -> usize {
        match self {
            FileContent::Text(text) => text.len(),
            FileContent::Binary(bytes) => bytes.len(),
            FileContent::Inline(uri) => uri.payload.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// 转换为写入归档的字节
    ///
    /// 内嵌数据在此解码，失败时返回 `EpubError::InvalidDataUri`。
    pub fn to_bytes(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        match self {
            FileContent::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            FileContent::Binary(bytes) => Ok(Cow::Borrowed(bytes)),
            FileContent::Inline(uri) => uri
                .decode()
                .map(Cow::Owned)
                .map_err(|reason| EpubError::InvalidDataUri {
                    name: name.to_string(),
                    reason,
                }),
        }
    }
}

/// 归档中的一个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// 文件名
    pub name: String,
    /// 所在目录（根目录为空字符串）
    pub folder: String,
    /// 压缩方式
    pub compression: Compression,
    /// 内容
    pub content: FileContent,
}

impl FileEntry {
    fn text(name: &str, folder: &str, compression: Compression, content: String) -> Self {
        Self {
            name: name.to_string(),
            folder: folder.to_string(),
            compression,
            content: FileContent::Text(content),
        }
    }

    fn image(image: &ImageObject) -> Self {
        let content = match &image.data {
            ImageData::Inline(uri) => FileContent::Inline(uri.clone()),
            ImageData::Binary { bytes, .. } => FileContent::Binary(bytes.clone()),
        };

        Self {
            name: image.name.clone(),
            folder: IMAGES_FOLDER.to_string(),
            compression: Compression::deflated(),
            content,
        }
    }

    /// 归档内的完整路径
    pub fn path(&self) -> String {
        if self.folder.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.folder, self.name)
        }
    }
}

impl Document {
    /// 获取生成EPUB所需的全部文件
    ///
    /// 顺序固定：mimetype（不压缩，必须位于首位）、container.xml、ebook.opf、
    /// navigation.ncx、cover.xhtml、ebook.css、各章节、toc.xhtml（若启用）、封面图片、其他图片。
    pub fn files_for_epub(&self) -> Vec<FileEntry> {
        self.files_for_epub_at(Utc::now())
    }

    /// 以指定的生成时间获取文件列表
    pub fn files_for_epub_at(&self, now: DateTime<Utc>) -> Vec<FileEntry> {
        let replacements = Replacements::at(self.metadata(), now);
        let deflated = Compression::deflated();
        let mut files = Vec::new();

        files.push(FileEntry::text(
            "mimetype",
            "",
            Compression::Stored,
            MIMETYPE.to_string(),
        ));
        files.push(FileEntry::text(
            CONTAINER_FILENAME,
            CONTAINER_FOLDER,
            deflated,
            container_document(&replacements),
        ));
        files.push(FileEntry::text(
            OPF_FILENAME,
            OEBPF_FOLDER,
            deflated,
            package_document(self, &replacements),
        ));

        // 目录页依赖导航生成的条目
        let navigation = navigation_document(self, &replacements);
        files.push(FileEntry::text(
            "navigation.ncx",
            OEBPF_FOLDER,
            deflated,
            navigation.xml,
        ));
        files.push(FileEntry::text(
            "cover.xhtml",
            OEBPF_FOLDER,
            deflated,
            markup::cover_page(self, &replacements),
        ));
        files.push(FileEntry::text(
            "ebook.css",
            CSS_FOLDER,
            deflated,
            markup::stylesheet(self, &replacements),
        ));

        for section in self.sections() {
            files.push(FileEntry::text(
                &section.filename,
                CONTENT_FOLDER,
                deflated,
                markup::section_page(self, section, &replacements),
            ));
        }

        if self.metadata().show_contents {
            files.push(FileEntry::text(
                TOC_FILENAME,
                CONTENT_FOLDER,
                deflated,
                markup::contents_page(self, &navigation.items, &replacements),
            ));
        }

        files.push(FileEntry::image(self.cover()));
        files.extend(self.images().iter().map(FileEntry::image));

        for file in &files {
            log::debug!("生成文件: {} ({} 字节, {})", file.path(), file.content.len(), file.compression);
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::config::Metadata;
    use crate::epub::test_helpers::{fixed_time, sample_document, sample_metadata};

    fn paths(files: &[FileEntry]) -> Vec<String> {
        files.iter().map(FileEntry::path).collect()
    }

    #[test]
    fn test_file_order_for_single_section() {
        let document = sample_document();
        let files = document.files_for_epub_at(fixed_time());

        assert_eq!(
            paths(&files),
            vec![
                "mimetype",
                "META-INF/container.xml",
                "OEBPF/ebook.opf",
                "OEBPF/navigation.ncx",
                "OEBPF/cover.xhtml",
                "OEBPF/css/ebook.css",
                "OEBPF/content/s1.xhtml",
                "OEBPF/content/toc.xhtml",
                "OEBPF/images/Cover.png",
            ]
        );
    }

    #[test]
    fn test_mimetype_is_first_and_stored() {
        let document = sample_document();
        let files = document.files_for_epub_at(fixed_time());

        let first = &files[0];
        assert_eq!(first.name, "mimetype");
        assert_eq!(first.folder, "");
        assert_eq!(first.compression, Compression::Stored);
        assert_eq!(first.content.as_text(), Some(MIMETYPE));

        assert!(
            files[1..]
                .iter()
                .all(|f| f.compression == Compression::Deflated { level: DEFLATE_LEVEL })
        );
    }

    #[test]
    fn test_section_and_toc_contents() {
        let document = sample_document();
        let files = document.files_for_epub_at(fixed_time());

        let section = files.iter().find(|f| f.name == "s1.xhtml").unwrap();
        let html = section.content.as_text().unwrap();
        assert!(html.contains("<p>Hi</p>"));
        assert!(html.contains("Chapter One"));

        let toc = files.iter().find(|f| f.name == "toc.xhtml").unwrap();
        let html = toc.content.as_text().unwrap();
        assert_eq!(html.matches("<a href=").count(), 1);
        assert!(html.contains("href=\"s1.xhtml\""));
    }

    #[test]
    fn test_no_toc_when_contents_hidden() {
        let metadata = Metadata {
            show_contents: Some(false),
            ..sample_metadata()
        };
        let mut document = Document::new(metadata).unwrap();
        document.add_section("One", "").unwrap();

        let files = document.files_for_epub_at(fixed_time());
        assert!(files.iter().all(|f| f.name != "toc.xhtml"));
        assert_eq!(files.len(), 8);
    }

    #[test]
    fn test_images_follow_cover() {
        let metadata = Metadata {
            images: vec![
                ImageObject::from_bytes("a.png", vec![1, 2, 3], Some("image/png")),
                ImageObject::from_bytes("b.jpg", vec![4], Some("image/jpeg")),
            ],
            ..sample_metadata()
        };
        let document = Document::new(metadata).unwrap();
        let files = document.files_for_epub_at(fixed_time());

        let tail: Vec<String> = paths(&files).into_iter().rev().take(3).collect();
        assert_eq!(
            tail,
            vec!["OEBPF/images/b.jpg", "OEBPF/images/a.png", "OEBPF/images/Cover.png"]
        );

        let cover = files.iter().find(|f| f.name == "Cover.png").unwrap();
        assert!(matches!(cover.content, FileContent::Inline(_)));
        let a = files.iter().find(|f| f.name == "a.png").unwrap();
        assert_eq!(a.content, FileContent::Binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_content_to_bytes() {
        let text = FileContent::Text("abc".to_string());
        assert_eq!(text.to_bytes("a.txt").unwrap().as_ref(), b"abc");

        let inline = FileContent::Inline(DataUri::parse("data:image/gif,GIF%38%39a").unwrap());
        assert_eq!(inline.to_bytes("a.gif").unwrap().as_ref(), b"GIF89a");

        let broken = FileContent::Inline(DataUri::parse("data:image/png;base64,@@@").unwrap());
        let err = broken.to_bytes("b.png").unwrap_err();
        assert!(matches!(err, EpubError::InvalidDataUri { ref name, .. } if name == "b.png"));
    }

    #[test]
    fn test_generation_is_repeatable() {
        let document = sample_document();
        let first = document.files_for_epub_at(fixed_time());
        let second = document.files_for_epub_at(fixed_time());
        assert_eq!(first, second);
    }
}
