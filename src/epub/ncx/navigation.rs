//! NCX导航元素数据结构定义
//!
//! 定义导航点与目录条目。

use quick_xml::escape::escape;
use std::fmt;

/// 目录条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// 前置内容
    Front,
    /// 目录页本身
    Contents,
    /// 正文
    Main,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Front => "front",
            ItemType::Contents => "contents",
            ItemType::Main => "main",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 目录条目，交给自定义目录页生成函数使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// 被链接章节的标题
    pub title: String,
    /// 相对于content目录的链接
    pub link: String,
    /// 条目类型
    pub item_type: ItemType,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            item_type,
        }
    }
}

/// 导航点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPoint {
    /// 唯一标识符
    pub id: String,
    /// 播放顺序，从1开始严格递增
    pub play_order: u32,
    /// CSS类名
    pub class: String,
    /// 导航标签文本
    pub label: String,
    /// 相对于OPF目录的源文件路径
    pub src: String,
}

impl NavPoint {
    /// 创建新的导航点
    pub fn new(
        id: impl Into<String>,
        play_order: u32,
        class: impl Into<String>,
        label: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            play_order,
            class: class.into(),
            label: label.into(),
            src: src.into(),
        }
    }

    /// 输出为 `<navPoint>` 元素
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(&format!(
            "    <navPoint id=\"{}\" playOrder=\"{}\" class=\"{}\">\n",
            escape(self.id.as_str()),
            self.play_order,
            self.class
        ));
        xml.push_str(&format!(
            "      <navLabel><text>{}</text></navLabel>\n",
            escape(self.label.as_str())
        ));
        xml.push_str(&format!(
            "      <content src=\"{}\"/>\n",
            escape(self.src.as_str())
        ));
        xml.push_str("    </navPoint>\n");
        xml
    }
}
