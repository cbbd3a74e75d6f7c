//! 容器模块
//!
//! 生成 `META-INF/container.xml`，指向归档中的OPF包文件。

use crate::epub::replacements::Replacements;

/// container.xml 所在目录
pub const CONTAINER_FOLDER: &str = "META-INF";

/// 容器描述文件名
pub const CONTAINER_FILENAME: &str = "container.xml";

/// 包文档在归档中的完整路径
pub const ROOTFILE_PATH: &str = "OEBPF/ebook.opf";

/// 包文档的媒体类型
pub const ROOTFILE_MEDIA_TYPE: &str = "application/oebps-package+xml";

/// 生成container.xml内容
///
/// 只包含一个rootfile条目，指向 `OEBPF/ebook.opf`。
pub fn container_document(replacements: &Replacements) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<container version=\"1.0\" xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\">\n",
    );
    xml.push_str("  <rootfiles>\n");
    xml.push_str(&format!(
        "    <rootfile full-path=\"{}\" media-type=\"{}\"/>\n",
        ROOTFILE_PATH, ROOTFILE_MEDIA_TYPE
    ));
    xml.push_str("  </rootfiles>\n");
    xml.push_str("</container>\n");

    replacements.apply(&xml)
}
