//! 元数据模块
//!
//! 生成OPF中的 `<metadata>` 部分。

use crate::epub::config::BookMetadata;
use quick_xml::escape::escape;

/// 标题的占位符模板，按丛书名与序号选择四种格式之一
fn title_template(book: &BookMetadata) -> &'static str {
    match (book.series.is_some(), book.sequence.is_some()) {
        (true, true) => "[[TITLE]] ([[SERIES]] #[[SEQUENCE]])",
        (true, false) => "[[TITLE]] ([[SERIES]])",
        (false, true) => "[[TITLE]] (#[[SEQUENCE]])",
        (false, false) => "[[TITLE]]",
    }
}

/// 带丛书信息的显示标题（未转义）
pub fn display_title(book: &BookMetadata) -> String {
    let series = book.series.as_deref().unwrap_or_default();
    let sequence = book.sequence.map(|n| n.to_string()).unwrap_or_default();

    title_template(book)
        .replace("[[TITLE]]", &book.title)
        .replace("[[SERIES]]", series)
        .replace("[[SEQUENCE]]", &sequence)
}

/// 生成 `<metadata>` 元素（含占位符）
pub fn metadata_block(book: &BookMetadata) -> String {
    let title = title_template(book);

    let mut xml = String::new();
    xml.push_str("  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:opf=\"http://www.idpf.org/2007/opf\">\n");
    xml.push_str("    <dc:identifier id=\"BookId\">[[ID]]</dc:identifier>\n");
    xml.push_str(&format!("    <dc:title id=\"title\">{}</dc:title>\n", title));
    xml.push_str(&format!("    <meta property=\"dcterms:title\" id=\"meta-title\">{}</meta>\n", title));
    xml.push_str("    <dc:language>[[LANGUAGE]]</dc:language>\n");
    xml.push_str("    <meta property=\"dcterms:language\" id=\"meta-language\">[[LANGUAGE]]</meta>\n");
    xml.push_str("    <meta property=\"dcterms:modified\">[[MODIFIED]]</meta>\n");
    xml.push_str("    <dc:creator id=\"creator\">[[AUTHOR]]</dc:creator>\n");
    xml.push_str("    <meta refines=\"#creator\" property=\"file-as\">[[FILEAS]]</meta>\n");
    xml.push_str("    <meta refines=\"#creator\" property=\"role\" scheme=\"marc:relators\">aut</meta>\n");
    xml.push_str("    <dc:publisher>[[PUBLISHER]]</dc:publisher>\n");
    xml.push_str("    <dc:date>[[PUBLISHED]]</dc:date>\n");
    if book.description.is_some() {
        xml.push_str("    <dc:description>[[DESCRIPTION]]</dc:description>\n");
    }
    xml.push_str("    <dc:rights>Copyright &#x00A9; [[YEAR]] by [[PUBLISHER]]</dc:rights>\n");
    if book.copyright.is_some() {
        xml.push_str("    <meta property=\"dcterms:rights\">[[COPYRIGHT]]</meta>\n");
    } else {
        xml.push_str("    <meta property=\"dcterms:rights\">All rights reserved</meta>\n");
    }
    if book.source.is_some() {
        xml.push_str("    <dc:source>[[SOURCE]]</dc:source>\n");
    }
    if book.genre.is_some() {
        xml.push_str("    <dc:subject>[[GENRE]]</dc:subject>\n");
    }
    for tag in book.tag_list() {
        xml.push_str(&format!("    <dc:subject>{}</dc:subject>\n", escape(tag)));
    }
    if book.series.is_some() && book.sequence.is_some() {
        xml.push_str("    <meta name=\"calibre:series\" content=\"[[SERIES]]\"/>\n");
        xml.push_str("    <meta name=\"calibre:series_index\" content=\"[[SEQUENCE]]\"/>\n");
    }
    xml.push_str("    <meta name=\"cover\" content=\"image_cover\"/>\n");
    xml.push_str("    <meta name=\"generator\" content=\"epubforge\"/>\n");
    xml.push_str("    <meta property=\"ibooks:specified-fonts\">true</meta>\n");
    xml.push_str("  </metadata>\n");
    xml
}
