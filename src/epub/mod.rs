pub mod error;
pub mod media;
pub mod image;
pub mod replacements;
pub mod config;
pub mod document;
pub mod container;
pub mod opf;
pub mod ncx;
pub mod markup;
pub mod files;
pub mod writer;

#[cfg(test)]
mod test_helpers;

// 重新导出错误处理
pub use error::{EpubError, Result};

// 重新导出文档与元数据
pub use config::{BookConfig, BookMetadata, Metadata, MetadataConfig, SectionConfig};
pub use document::{ContentsGenerator, Document, Section, SectionOptions};
pub use image::{ImageData, ImageObject};
pub use media::DataUri;

// 重新导出模板替换
pub use replacements::{Replacements, replace};

// 重新导出导航相关
pub use ncx::{ContentItem, ItemType, NavPoint, Navigation};

// 重新导出OPF相关
pub use opf::{ManifestItem, SpineItem};

// 重新导出文件列表与打包
pub use files::{Compression, FileContent, FileEntry};
pub use writer::{ArchivePackager, ZipPackager};
