//! 核心错误定义
//!
//! 所有放置失败都是局部、可恢复的：用户换一个点重试即可。

use crate::entity::EntityId;
use crate::template::TemplateKind;
use thiserror::Error;

/// 放置门窗/柜体时的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("No wall found near ({x:.1}, {y:.1})")]
    NoWallFound { x: f64, y: f64 },

    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateKind),
}

/// 场景存储执行命令时的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Degenerate geometry: zero-length wall")]
    DegenerateGeometry,
}

/// 工程量清单编辑错误
///
/// 编辑界面对 `InvalidNumericInput` 静默处理（输入过程中的临时值），
/// 原值保持不变。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoqError {
    #[error("Invalid numeric input: {0:?}")]
    InvalidNumericInput(String),

    #[error("BOQ item not found: {category}[{index}]")]
    ItemNotFound { category: String, index: usize },
}

/// 模板校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Invalid {kind} template: {reason}")]
    Invalid { kind: TemplateKind, reason: String },
}
