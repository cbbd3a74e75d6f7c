//! 打包模块
//!
//! 将文件列表写入zip归档。打包器只依赖 `FileEntry`，与生成逻辑互不相知。

use crate::epub::document::Document;
use crate::epub::error::Result;
use crate::epub::files::{Compression, FileEntry};
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// 归档文件的扩展名
pub const EPUB_EXTENSION: &str = "epub";

/// 将有序文件列表打包为归档字节
pub trait ArchivePackager {
    fn package(&self, files: &[FileEntry]) -> Result<Vec<u8>>;
}

/// 基于zip的打包器
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackager;

impl ZipPackager {
    pub fn new() -> Self {
        Self
    }

    /// 按列表顺序写入任意可定位的输出
    pub fn write_entries<W: Write + Seek>(&self, files: &[FileEntry], writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);

        for file in files {
            let path = file.path();
            let bytes = file.content.to_bytes(&file.name)?;

            log::debug!("写入归档: {} ({})", path, file.compression);
            zip.start_file(path, Self::options(file.compression))?;
            zip.write_all(&bytes)?;
        }

        Ok(zip.finish()?)
    }

    fn options(compression: Compression) -> SimpleFileOptions {
        match compression {
            Compression::Stored => {
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
            }
            Compression::Deflated { level } => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(level)),
        }
    }
}

impl ArchivePackager for ZipPackager {
    fn package(&self, files: &[FileEntry]) -> Result<Vec<u8>> {
        let cursor = self.write_entries(files, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}

impl Document {
    /// 使用指定的打包器生成EPUB
    pub fn package_with(&self, packager: &dyn ArchivePackager) -> Result<Vec<u8>> {
        packager.package(&self.files_for_epub())
    }

    /// 生成EPUB并返回归档字节
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package_with(&ZipPackager)
    }

    /// 生成EPUB并写入输出
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        ZipPackager.write_entries(&self.files_for_epub(), writer)
    }

    /// 在目录中创建EPUB文件
    ///
    /// # 参数
    /// * `folder` - 输出目录，必须已存在
    /// * `name` - 不含扩展名的文件名，缺省时使用书名
    ///
    /// # 返回值
    /// * `Result<PathBuf>` - 写入的文件路径；打包失败时不会创建文件
    pub fn create_epub<P: AsRef<Path>>(&self, folder: P, name: Option<&str>) -> Result<PathBuf> {
        let stem = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.metadata().title.as_str(),
        };
        let path = folder.as_ref().join(epub_filename(stem));

        let bytes = self.to_bytes()?;
        fs::write(&path, &bytes)?;

        log::info!("已生成EPUB: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

/// 由书名或指定名称得到文件名，路径分隔符替换为下划线
fn epub_filename(stem: &str) -> String {
    let safe: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.{}", safe, EPUB_EXTENSION)
}
