//! 图片资源模块
//!
//! 图片在加入文档时即确定其数据形态：内嵌的data URI或二进制数据。

use crate::epub::error::{EpubError, Result};
use crate::epub::media::{self, DataUri};
use std::fs;
use std::path::Path;

/// 图片数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// 内嵌数据，打包时才解码
    Inline(DataUri),
    /// 二进制数据及其声明的MIME类型
    Binary {
        bytes: Vec<u8>,
        mime_type: Option<String>,
    },
}

/// 图片对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageObject {
    /// 图片在images目录中的文件名
    pub name: String,
    /// 图片数据
    pub data: ImageData,
}

impl ImageObject {
    /// 从data URI创建图片
    ///
    /// # 参数
    /// * `name` - 图片文件名
    /// * `uri` - `data:image/png;base64,...` 形式的内嵌数据
    pub fn from_data_uri(name: impl Into<String>, uri: &str) -> Result<Self> {
        let name = name.into();
        let data_uri = DataUri::parse(uri).ok_or_else(|| EpubError::InvalidDataUri {
            name: name.clone(),
            reason: "不是有效的data URI".to_string(),
        })?;

        Ok(Self {
            name,
            data: ImageData::Inline(data_uri),
        })
    }

    /// 从二进制数据创建图片
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            data: ImageData::Binary {
                bytes,
                mime_type: mime_type.map(str::to_string),
            },
        }
    }

    /// 从磁盘读取图片，MIME类型由扩展名推断
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let bytes = fs::read(path)?;
        let mime_type = media::mime_from_extension(&name);

        Ok(Self::from_bytes(name, bytes, mime_type))
    }

    /// 获取图片的MIME类型，无法识别时返回None
    pub fn mime_type(&self) -> Option<&str> {
        match &self.data {
            ImageData::Inline(uri) if !uri.mime_type.is_empty() => Some(&uri.mime_type),
            ImageData::Inline(_) => None,
            ImageData::Binary { mime_type, .. } => {
                mime_type.as_deref().filter(|m| !m.is_empty())
            }
        }
    }

    /// 是否带有可识别的名称与数据
    pub fn is_identifiable(&self) -> bool {
        !self.name.trim().is_empty() && self.mime_type().is_some()
    }

    /// 检查文件名能否作为images目录下的一个文件：非空白，且不含路径分隔符或 `..`
    pub fn check_name(&self) -> Result<()> {
        let name = self.name.as_str();
        if name.trim().is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(EpubError::InvalidImageName(self.name.clone()));
        }
        Ok(())
    }

    /// 检查加入文档的图片：文件名有效、类型可识别，且与封面及已有图片不重名
    pub fn check_addition<'a, I>(&self, existing: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ImageObject>,
    {
        self.check_name()?;
        if self.mime_type().is_none() {
            return Err(EpubError::UnknownImageType(self.name.clone()));
        }
        if existing.into_iter().any(|other| other.name == self.name) {
            return Err(EpubError::DuplicateImage(self.name.clone()));
        }
        Ok(())
    }
}
