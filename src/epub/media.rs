//! 媒体类型辅助模块
//!
//! 提供图片MIME类型与扩展名的映射、内嵌数据（data URI）的识别与解码，
//! 以及从右到左书写语言的判断。

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use std::collections::HashSet;

/// 从右到左书写的语言（ISO 639代码）
static RTL_LANGUAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ar",  // Arabic
        "arc", // Aramaic
        "dv",  // Divehi
        "fa",  // Persian
        "ha",  // Hausa
        "he",  // Hebrew
        "khw", // Khowar
        "ks",  // Kashmiri
        "ku",  // Kurdish
        "ps",  // Pashto
        "ur",  // Urdu
        "yi",  // Yiddish
    ]
    .into_iter()
    .collect()
});

/// 判断语言是否从右到左书写（忽略大小写）
pub fn is_rtl_language(iso_code: &str) -> bool {
    RTL_LANGUAGES.contains(iso_code.trim().to_ascii_lowercase().as_str())
}

/// 根据MIME类型获取带点的文件扩展名，未知类型返回空字符串
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/svg+xml" => ".svg",
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/tiff" => ".tiff",
        _ => "",
    }
}

/// 根据文件扩展名推断图片MIME类型
pub fn mime_from_extension(path: &str) -> Option<&'static str> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();

    match extension.as_str() {
        "svg" => Some("image/svg+xml"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// 解析后的data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// 声明的MIME类型（可能为空）
    pub mime_type: String,
    /// 是否为base64编码
    pub base64: bool,
    /// 逗号之后的原始数据
    pub payload: String,
}

impl DataUri {
    /// 解析data URI，格式不符时返回None
    ///
    /// 接受 `data:[type/subtype][;param=value][;base64],<data>` 形式，前后允许空白。
    pub fn parse(input: &str) -> Option<DataUri> {
        let trimmed = input.trim();
        let scheme = trimmed.get(..5)?;
        if !scheme.eq_ignore_ascii_case("data:") {
            return None;
        }

        let (header, payload) = trimmed[5..].split_once(',')?;
        let mut parts = header.split(';');

        let mime_type = parts.next().unwrap_or_default();
        if !mime_type.is_empty() && !is_mime_token(mime_type) {
            return None;
        }

        let mut base64 = false;
        for (index, part) in parts.enumerate() {
            if part.eq_ignore_ascii_case("base64") {
                base64 = true;
            } else if base64 || index > 0 || !is_parameter(part) {
                // base64标记只能出现在最后，且最多一个参数
                return None;
            }
        }

        Some(DataUri {
            mime_type: mime_type.to_ascii_lowercase(),
            base64,
            payload: payload.to_string(),
        })
    }

    /// 解码为原始字节
    pub fn decode(&self) -> std::result::Result<Vec<u8>, String> {
        if self.base64 {
            let compact: String = self
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD.decode(compact).map_err(|e| e.to_string())
        } else {
            Ok(percent_decode_str(&self.payload).collect())
        }
    }
}

/// 判断字符串是否为内嵌数据（data URI）
pub fn is_data_uri(input: &str) -> bool {
    DataUri::parse(input).is_some()
}

/// 从data URI中读取声明的MIME类型，无法识别时返回None
pub fn mime_from_data_uri(input: &str) -> Option<String> {
    DataUri::parse(input)
        .map(|uri| uri.mime_type)
        .filter(|mime| !mime.is_empty())
}

fn is_mime_token(value: &str) -> bool {
    let Some((kind, subtype)) = value.split_once('/') else {
        return false;
    };
    !kind.is_empty()
        && kind.chars().all(|c| c.is_ascii_alphabetic())
        && !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_parameter(value: &str) -> bool {
    match value.split_once('=') {
        Some((key, val)) => !key.is_empty() && !val.is_empty(),
        None => false,
    }
}
