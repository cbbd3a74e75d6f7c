use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// Epub生成相关的错误类型
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("缺少元数据: {0}")]
    MissingMetadata(&'static str),

    #[error("无法识别图片类型: {0}")]
    UnknownImageType(String),

    #[error("章节文件名重复: {0}")]
    DuplicateFilename(String),

    #[error("章节文件名无效: {0}")]
    InvalidFilename(String),

    #[error("图片文件名无效: {0:?}")]
    InvalidImageName(String),

    #[error("图片文件名重复: {0}")]
    DuplicateImage(String),

    #[error("图片 {name} 的内嵌数据无效: {reason}")]
    InvalidDataUri { name: String, reason: String },

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

impl EpubError {
    /// 是否为构造阶段的元数据校验错误
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EpubError::MissingMetadata(_)
                | EpubError::UnknownImageType(_)
                | EpubError::InvalidImageName(_)
                | EpubError::DuplicateImage(_)
        )
    }
}
