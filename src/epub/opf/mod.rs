//! OPF（Open Packaging Format）生成模块
//!
//! 此模块生成EPUB中的OPF包文件，包括元数据、清单、脊柱三部分。

mod generator;
mod manifest;
mod metadata;
mod spine;

pub use generator::{OPF_FILENAME, package_document};
pub use manifest::{ManifestItem, manifest_items};
pub use metadata::{display_title, metadata_block};
pub use spine::{SpineItem, page_progression_direction, spine_items};
