//! 脊柱模块
//!
//! 提供EPUB包中阅读顺序（脊柱）的结构定义与生成。

use crate::epub::document::Document;

/// 脊柱项信息(阅读顺序)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    /// 引用的清单项ID
    pub idref: String,
    /// 显式声明的线性阅读标记，None时不输出linear属性（阅读器按yes处理）
    pub linear: Option<bool>,
}

impl SpineItem {
    /// 创建新的脊柱项
    pub fn new(idref: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
            linear: None,
        }
    }

    /// 创建显式声明linear属性的脊柱项
    pub fn with_linear(idref: impl Into<String>, linear: bool) -> Self {
        Self {
            linear: Some(linear),
            ..Self::new(idref)
        }
    }

    /// 输出为 `<itemref>` 元素
    pub fn to_xml(&self) -> String {
        match self.linear {
            Some(linear) => format!(
                "    <itemref idref=\"{}\" linear=\"{}\"/>\n",
                self.idref,
                if linear { "yes" } else { "no" }
            ),
            None => format!("    <itemref idref=\"{}\"/>\n", self.idref),
        }
    }
}

/// 生成脊柱：封面、全部前置内容、目录页（若启用）、全部正文，各自保持添加顺序
///
/// 隐藏的章节不进入导航，但仍在阅读顺序中。
pub fn spine_items(document: &Document) -> Vec<SpineItem> {
    // 封面显式标记为线性，其余沿用默认
    let mut items = vec![SpineItem::with_linear("cover", true)];

    items.extend(
        document
            .front_matter()
            .map(|(index, _)| SpineItem::new(format!("s{}", index))),
    );

    if document.metadata().show_contents {
        items.push(SpineItem::new("toc"));
    }

    items.extend(
        document
            .main_matter()
            .map(|(index, _)| SpineItem::new(format!("s{}", index))),
    );

    items
}

/// 翻页方向
pub fn page_progression_direction(document: &Document) -> &'static str {
    if document.is_rtl() { "rtl" } else { "default" }
}
