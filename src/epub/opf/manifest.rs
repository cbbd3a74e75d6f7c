//! 清单模块
//!
//! 提供EPUB包中文件清单的结构定义与生成。

use crate::epub::document::Document;
use crate::epub::ncx::generator::TOC_FILENAME;
use quick_xml::escape::escape;

/// XHTML文档的媒体类型
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// 清单项信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// 项目ID
    pub id: String,
    /// 文件路径(相对于OPF文件)
    pub href: String,
    /// 媒体类型
    pub media_type: String,
    /// 属性(如nav、cover-image等)
    pub properties: Option<String>,
}

impl ManifestItem {
    /// 创建新的清单项
    pub fn new(id: impl Into<String>, href: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            media_type: media_type.into(),
            properties: None,
        }
    }

    /// 创建带属性的清单项
    pub fn with_properties(
        id: impl Into<String>,
        href: impl Into<String>,
        media_type: impl Into<String>,
        properties: impl Into<String>,
    ) -> Self {
        Self {
            properties: Some(properties.into()),
            ..Self::new(id, href, media_type)
        }
    }

    /// 输出为 `<item>` 元素
    pub fn to_xml(&self) -> String {
        let properties = self
            .properties
            .as_deref()
            .map(|p| format!(" properties=\"{}\"", p))
            .unwrap_or_default();

        format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"{}/>\n",
            self.id,
            escape(self.href.as_str()),
            self.media_type,
            properties
        )
    }
}

/// 生成清单：封面图片、结构文件、每个章节、每张图片
///
/// 图片以其在images目录中的文件名引用，ID为 `img{N}`，N从1开始。
pub fn manifest_items(document: &Document) -> Vec<ManifestItem> {
    let mut items = Vec::new();

    let cover = document.cover();
    if let Some(mime_type) = cover.mime_type() {
        items.push(ManifestItem::with_properties(
            "image_cover",
            format!("images/{}", cover.name),
            mime_type,
            "cover-image",
        ));
    }
    items.push(ManifestItem::new("cover", "cover.xhtml", XHTML_MEDIA_TYPE));
    items.push(ManifestItem::new("ncx", "navigation.ncx", "application/x-dtbncx+xml"));
    if document.metadata().show_contents {
        items.push(ManifestItem::with_properties(
            "toc",
            format!("content/{}", TOC_FILENAME),
            XHTML_MEDIA_TYPE,
            "nav",
        ));
    }
    items.push(ManifestItem::new("css", "css/ebook.css", "text/css"));

    for (index, section) in document.sections().iter().enumerate() {
        items.push(ManifestItem::new(
            format!("s{}", index + 1),
            format!("content/{}", section.filename),
            XHTML_MEDIA_TYPE,
        ));
    }

    for (index, image) in document.images().iter().enumerate() {
        if let Some(mime_type) = image.mime_type() {
            items.push(ManifestItem::new(
                format!("img{}", index + 1),
                format!("images/{}", image.name),
                mime_type,
            ));
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::config::Metadata;
    use crate::epub::image::ImageObject;
    use crate::epub::test_helpers::{sample_document, sample_metadata};

    #[test]
    fn test_manifest_for_single_section() {
        let document = sample_document();
        let items = manifest_items(&document);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["image_cover", "cover", "ncx", "toc", "css", "s1"]);

        let cover = &items[0];
        assert_eq!(cover.href, "images/Cover.png");
        assert_eq!(cover.media_type, "image/png");
        assert_eq!(cover.properties.as_deref(), Some("cover-image"));

        let section = items.last().unwrap();
        assert_eq!(section.href, "content/s1.xhtml");
        assert_eq!(section.media_type, XHTML_MEDIA_TYPE);
    }

    #[test]
    fn test_manifest_images_keyed_by_name() {
        let metadata = Metadata {
            images: vec![
                ImageObject::from_bytes("map.jpg", vec![1], Some("image/jpeg")),
                ImageObject::from_data_uri("logo.gif", "data:image/gif;base64,R0lG").unwrap(),
            ],
            show_contents: Some(false),
            ..sample_metadata()
        };
        let document = crate::epub::document::Document::new(metadata).unwrap();
        let items = manifest_items(&document);

        assert!(items.iter().all(|i| i.id != "toc"));
        let images: Vec<(&str, &str, &str)> = items
            .iter()
            .filter(|i| i.id.starts_with("img"))
            .map(|i| (i.id.as_str(), i.href.as_str(), i.media_type.as_str()))
            .collect();
        assert_eq!(
            images,
            vec![
                ("img1", "images/map.jpg", "image/jpeg"),
                ("img2", "images/logo.gif", "image/gif"),
            ]
        );
    }

    #[test]
    fn test_item_xml() {
        let item = ManifestItem::with_properties("toc", "content/toc.xhtml", XHTML_MEDIA_TYPE, "nav");
        assert_eq!(
            item.to_xml(),
            "    <item id=\"toc\" href=\"content/toc.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n"
        );

        let escaped = ManifestItem::new("img1", "images/a&b.png", "image/png");
        assert!(escaped.to_xml().contains("href=\"images/a&amp;b.png\""));
    }
}
