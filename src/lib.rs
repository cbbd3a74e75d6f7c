pub mod epub;

// === 核心API重新导出 ===

/// 待生成的电子书文档（主要接口）
pub use epub::Document;

/// 错误处理
pub use epub::{EpubError, Result};

// === 数据结构 ===

/// 书籍元数据
pub use epub::{BookMetadata, Metadata};

/// 章节
pub use epub::{Section, SectionOptions};

/// 图片资源
pub use epub::{DataUri, ImageData, ImageObject};

/// YAML书籍配置
pub use epub::{BookConfig, MetadataConfig, SectionConfig};

// === 底层组件（高级用法） ===

/// 目录条目与导航
pub use epub::{ContentItem, ContentsGenerator, ItemType, NavPoint, Navigation};

/// OPF组件
pub use epub::{ManifestItem, SpineItem};

/// 模板替换
pub use epub::{Replacements, replace};

/// 文件列表与打包
pub use epub::{ArchivePackager, Compression, FileContent, FileEntry, ZipPackager};

// === 库信息 ===

/// EpubForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// EpubForge库的描述
pub const DESCRIPTION: &str = "一个用于生成EPUB 3电子书的Rust库";

// === 便捷函数 ===

/// 快速创建文档
///
/// 这是 `Document::new` 的便捷包装函数。
///
/// # 参数
/// * `metadata` - 书籍元数据
///
/// # 返回值
/// * `Result<Document>` - 文档实例
///
/// # 示例
///
/// ```rust,no_run
/// use epubforge::{ImageObject, Metadata};
///
/// let cover = ImageObject::from_file("cover.png")?;
/// let mut document = epubforge::create(Metadata::new("1", "书名", "作者", cover))?;
/// document.add_section("第一章", "<p>正文</p>")?;
/// document.create_epub(".", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn create(metadata: Metadata) -> Result<Document> {
    Document::new(metadata)
}
