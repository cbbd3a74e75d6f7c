//! OPF生成器模块
//!
//! 组装元数据、清单、脊柱，生成完整的包文件。

use crate::epub::document::Document;
use crate::epub::ncx::generator::TOC_FILENAME;
use crate::epub::opf::manifest::manifest_items;
use crate::epub::opf::metadata::metadata_block;
use crate::epub::opf::spine::{page_progression_direction, spine_items};
use crate::epub::replacements::Replacements;

/// OPF文件名
pub const OPF_FILENAME: &str = "ebook.opf";

/// 生成OPF包文件
pub fn package_document(document: &Document, replacements: &Replacements) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\" unique-identifier=\"BookId\" xml:lang=\"[[LANGUAGE]]\"\n");
    xml.push_str("  prefix=\"ibooks: http://vocabulary.itunes.apple.com/rdf/ibooks/vocabulary-extensions-1.0/\">\n");

    xml.push_str(&metadata_block(document.metadata()));

    xml.push_str("  <manifest>\n");
    for item in manifest_items(document) {
        xml.push_str(&item.to_xml());
    }
    xml.push_str("  </manifest>\n");

    xml.push_str(&format!(
        "  <spine toc=\"ncx\" page-progression-direction=\"{}\">\n",
        page_progression_direction(document)
    ));
    for item in spine_items(document) {
        xml.push_str(&item.to_xml());
    }
    xml.push_str("  </spine>\n");

    if document.metadata().show_contents {
        xml.push_str("  <guide>\n");
        xml.push_str(&format!(
            "    <reference type=\"toc\" title=\"[[CONTENTS]]\" href=\"content/{}\"/>\n",
            TOC_FILENAME
        ));
        xml.push_str("  </guide>\n");
    }

    xml.push_str("</package>\n");

    replacements.apply(&xml)
}
