//! FloorCAD 文件处理
//!
//! 支持：
//! - 内存场景存储 `Document`（执行场景命令，提供版本化快照）
//! - 基于 JSON 键值文件的模板库
//! - 工程量清单 JSON 导出

pub mod boq_export;
pub mod document;
pub mod error;
pub mod template_store;

pub use boq_export::{export_filename, to_json, write_boq};
pub use document::Document;
pub use error::FileError;
pub use template_store::TemplateStore;
