//! NCX生成器模块
//!
//! 导航顺序：封面、未隐藏的前置内容、目录页（若启用）、未隐藏的正文。
//! 生成结果同时返回目录条目，供目录页使用。

use crate::epub::document::Document;
use crate::epub::ncx::navigation::{ContentItem, ItemType, NavPoint};
use crate::epub::replacements::Replacements;

/// 目录页在content目录中的文件名
pub const TOC_FILENAME: &str = "toc.xhtml";

/// 生成的导航文档
#[derive(Debug, Clone)]
pub struct Navigation {
    /// navigation.ncx 的内容
    pub xml: String,
    /// 按导航顺序排列的导航点
    pub nav_points: Vec<NavPoint>,
    /// 目录条目（不含封面）
    pub items: Vec<ContentItem>,
}

/// 生成NCX导航文档
pub fn navigation_document(document: &Document, replacements: &Replacements) -> Navigation {
    let (nav_points, items) = build_nav_points(document);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n");
    xml.push_str("  <head>\n");
    xml.push_str("    <meta name=\"dtb:uid\" content=\"[[ID]]\"/>\n");
    xml.push_str("    <meta name=\"dtb:generator\" content=\"epubforge\"/>\n");
    xml.push_str("    <meta name=\"dtb:depth\" content=\"1\"/>\n");
    xml.push_str("    <meta name=\"dtb:totalPageCount\" content=\"0\"/>\n");
    xml.push_str("    <meta name=\"dtb:maxPageNumber\" content=\"0\"/>\n");
    xml.push_str("  </head>\n");
    xml.push_str("  <docTitle><text>[[TITLE]]</text></docTitle>\n");
    xml.push_str("  <docAuthor><text>[[AUTHOR]]</text></docAuthor>\n");
    xml.push_str("  <navMap>\n");
    for point in &nav_points {
        xml.push_str(&point.to_xml());
    }
    xml.push_str("  </navMap>\n");
    xml.push_str("</ncx>\n");

    Navigation {
        xml: replacements.apply(&xml),
        nav_points,
        items,
    }
}

fn build_nav_points(document: &Document) -> (Vec<NavPoint>, Vec<ContentItem>) {
    let mut nav_points = Vec::new();
    let mut items = Vec::new();
    let mut play_order = 0u32;
    let mut next_order = || {
        play_order += 1;
        play_order
    };

    nav_points.push(NavPoint::new("cover", next_order(), "cover", "Cover", "cover.xhtml"));

    for (index, section) in document.front_matter() {
        if section.exclude_from_contents {
            continue;
        }
        nav_points.push(NavPoint::new(
            format!("s{}", index),
            next_order(),
            "section",
            section.title.as_str(),
            format!("content/{}", section.filename),
        ));
        items.push(ContentItem::new(
            section.title.as_str(),
            section.filename.as_str(),
            ItemType::Front,
        ));
    }

    let metadata = document.metadata();
    if metadata.show_contents {
        nav_points.push(NavPoint::new(
            "toc",
            next_order(),
            "chapter",
            metadata.contents.as_str(),
            format!("content/{}", TOC_FILENAME),
        ));
        items.push(ContentItem::new(
            metadata.contents.as_str(),
            TOC_FILENAME,
            ItemType::Contents,
        ));
    }

    for (index, section) in document.main_matter() {
        if section.exclude_from_contents {
            continue;
        }
        nav_points.push(NavPoint::new(
            format!("s{}", index),
            next_order(),
            "chapter",
            section.title.as_str(),
            format!("content/{}", section.filename),
        ));
        items.push(ContentItem::new(
            section.title.as_str(),
            section.filename.as_str(),
            ItemType::Main,
        ));
    }

    (nav_points, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::config::Metadata;
    use crate::epub::test_helpers::{mixed_document, replacements, sample_document, sample_metadata};
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    /// 读取NCX中所有navPoint的(id, playOrder)
    fn parse_nav_points(xml: &str) -> Vec<(String, u32)> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut points = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(ref e) if e.local_name().as_ref() == b"navPoint" => {
                    let mut id = String::new();
                    let mut order = 0;
                    for attr in e.attributes() {
                        let attr = attr.unwrap();
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.local_name().as_ref() {
                            b"id" => id = value,
                            b"playOrder" => order = value.parse().unwrap(),
                            _ => {}
                        }
                    }
                    points.push((id, order));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        points
    }

    #[test]
    fn test_single_section_navigation() {
        let document = sample_document();
        let navigation = navigation_document(&document, &replacements(&document));

        let points = parse_nav_points(&navigation.xml);
        assert_eq!(
            points,
            vec![
                ("cover".to_string(), 1),
                ("toc".to_string(), 2),
                ("s1".to_string(), 3),
            ]
        );
        assert!(navigation.xml.contains("<meta name=\"dtb:uid\" content=\"1\"/>"));
        assert!(navigation.xml.contains("<docTitle><text>Example Book</text></docTitle>"));
        assert!(navigation.xml.contains("<text>Chapters</text>"));
    }

    #[test]
    fn test_navigation_order_and_items() {
        let document = mixed_document(sample_metadata());
        let navigation = navigation_document(&document, &replacements(&document));

        let ids: Vec<&str> = navigation.nav_points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["cover", "s2", "toc", "s1", "s5"]);

        let items: Vec<(&str, ItemType)> = navigation
            .items
            .iter()
            .map(|item| (item.link.as_str(), item.item_type))
            .collect();
        assert_eq!(
            items,
            vec![
                ("s2.xhtml", ItemType::Front),
                ("toc.xhtml", ItemType::Contents),
                ("s1.xhtml", ItemType::Main),
                ("s5.xhtml", ItemType::Main),
            ]
        );
    }

    #[test]
    fn test_play_order_is_strictly_increasing() {
        let document = mixed_document(sample_metadata());
        let navigation = navigation_document(&document, &replacements(&document));

        let orders: Vec<u32> = parse_nav_points(&navigation.xml)
            .into_iter()
            .map(|(_, order)| order)
            .collect();
        let expected: Vec<u32> = (1..=orders.len() as u32).collect();
        assert_eq!(orders, expected);
        // 封面 + 1个前置内容 + 目录页 + 2个正文
        assert_eq!(orders.len(), 5);
    }

    #[test]
    fn test_navigation_without_contents() {
        let metadata = Metadata {
            show_contents: Some(false),
            ..sample_metadata()
        };
        let document = mixed_document(metadata);
        let navigation = navigation_document(&document, &replacements(&document));

        assert!(navigation.items.iter().all(|item| item.item_type != ItemType::Contents));
        let points = parse_nav_points(&navigation.xml);
        assert_eq!(points.len(), 4);
        assert!(!navigation.xml.contains("toc.xhtml"));
    }

    #[test]
    fn test_navigation_is_rebuilt_on_every_call() {
        let document = sample_document();
        let r = replacements(&document);
        let first = navigation_document(&document, &r);
        let second = navigation_document(&document, &r);
        assert_eq!(first.items, second.items);
        assert_eq!(second.items.len(), 2);
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut document = sample_document();
        document.add_section("Q & A", "").unwrap();
        let navigation = navigation_document(&document, &replacements(&document));
        assert!(navigation.xml.contains("<text>Q &amp; A</text>"));
        assert_eq!(navigation.items.last().unwrap().title, "Q & A");
    }
}
