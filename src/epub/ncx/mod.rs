//! NCX（Navigation Control file for XML）生成模块
//!
//! 此模块生成EPUB中的NCX导航控制文件，并产出目录页所需的条目列表。

pub mod generator;
pub mod navigation;

pub use generator::{Navigation, navigation_document};
pub use navigation::{ContentItem, ItemType, NavPoint};
