//! 放置模板
//!
//! 每种放置类型对应一个强类型模板记录。模板来源（`TemplateSource`）
//! 按类型查找模板；门窗有内置默认值，柜体和电器必须来自目录选择。

use crate::entity::{FixtureCategory, FixtureKind};
use crate::error::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DOOR_WIDTH: f64 = 80.0;
pub const DEFAULT_DOOR_HEIGHT: f64 = 200.0;
pub const DEFAULT_OPENING_TYPE: &str = "standard";
pub const DEFAULT_SILL_HEIGHT: f64 = 90.0;

/// 模板类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Cabinet,
    Door,
    Window,
    Appliance,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Cabinet,
        TemplateKind::Door,
        TemplateKind::Window,
        TemplateKind::Appliance,
    ];

    /// 存储键名
    pub fn key(&self) -> &'static str {
        match self {
            TemplateKind::Cabinet => "cabinet",
            TemplateKind::Door => "door",
            TemplateKind::Window => "window",
            TemplateKind::Appliance => "appliance",
        }
    }
}

impl From<FixtureCategory> for TemplateKind {
    fn from(category: FixtureCategory) -> Self {
        match category {
            FixtureCategory::Cabinet => TemplateKind::Cabinet,
            FixtureCategory::Appliance => TemplateKind::Appliance,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| format!("Unknown template kind: {}", s))
    }
}

/// 门模板，未设置的字段使用默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoorTemplate {
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(rename = "type")]
    pub door_type: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl DoorTemplate {
    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_DOOR_WIDTH)
    }

    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_DOOR_HEIGHT)
    }

    pub fn door_type(&self) -> &str {
        self.door_type.as_deref().unwrap_or(DEFAULT_OPENING_TYPE)
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        check_optional_dimension(TemplateKind::Door, "width", self.width)?;
        check_optional_dimension(TemplateKind::Door, "height", self.height)?;
        check_price(TemplateKind::Door, self.price)
    }
}

/// 窗模板，在门的默认值之外还带窗台高度
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowTemplate {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub sill_height: Option<f64>,
    #[serde(rename = "type")]
    pub window_type: Option<String>,
    pub frame_thickness: Option<f64>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl WindowTemplate {
    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_DOOR_WIDTH)
    }

    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_DOOR_HEIGHT)
    }

    pub fn sill_height(&self) -> f64 {
        self.sill_height.unwrap_or(DEFAULT_SILL_HEIGHT)
    }

    pub fn window_type(&self) -> &str {
        self.window_type.as_deref().unwrap_or(DEFAULT_OPENING_TYPE)
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        check_optional_dimension(TemplateKind::Window, "width", self.width)?;
        check_optional_dimension(TemplateKind::Window, "height", self.height)?;
        check_optional_dimension(TemplateKind::Window, "frameThickness", self.frame_thickness)?;
        if let Some(sill) = self.sill_height {
            if !sill.is_finite() || sill < 0.0 {
                return Err(invalid(TemplateKind::Window, "sillHeight must be >= 0"));
            }
        }
        check_price(TemplateKind::Window, self.price)
    }
}

/// 柜体/电器模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureTemplate {
    pub kind: FixtureKind,
    #[serde(default)]
    pub name: Option<String>,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl FixtureTemplate {
    pub fn new(kind: FixtureKind, width: f64, height: f64, depth: f64) -> Self {
        Self {
            kind,
            name: None,
            width,
            height,
            depth,
            sub_category: None,
            material: None,
            brand: None,
            price: 0.0,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 显示名称，未设置时使用类型名
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.kind.name().to_string())
    }

    pub fn validate(&self, kind: TemplateKind) -> Result<(), TemplateError> {
        if TemplateKind::from(self.kind.category()) != kind {
            return Err(invalid(
                kind,
                format!("fixture kind {:?} does not belong to this category", self.kind),
            ));
        }
        check_optional_dimension(kind, "width", Some(self.width))?;
        check_optional_dimension(kind, "height", Some(self.height))?;
        check_optional_dimension(kind, "depth", Some(self.depth))?;
        check_price(kind, Some(self.price))
    }
}

/// 任意类型的模板
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Door(DoorTemplate),
    Window(WindowTemplate),
    Cabinet(FixtureTemplate),
    Appliance(FixtureTemplate),
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Template::Door(_) => TemplateKind::Door,
            Template::Window(_) => TemplateKind::Window,
            Template::Cabinet(_) => TemplateKind::Cabinet,
            Template::Appliance(_) => TemplateKind::Appliance,
        }
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        match self {
            Template::Door(t) => t.validate(),
            Template::Window(t) => t.validate(),
            Template::Cabinet(t) => t.validate(TemplateKind::Cabinet),
            Template::Appliance(t) => t.validate(TemplateKind::Appliance),
        }
    }

    /// 内置默认模板；柜体和电器没有内置默认值
    pub fn builtin(kind: TemplateKind) -> Option<Template> {
        match kind {
            TemplateKind::Door => Some(Template::Door(DoorTemplate::default())),
            TemplateKind::Window => Some(Template::Window(WindowTemplate::default())),
            TemplateKind::Cabinet | TemplateKind::Appliance => None,
        }
    }
}

/// 模板来源接口
pub trait TemplateSource {
    /// 按类型加载模板，缺失时返回 None
    fn load_template(&self, kind: TemplateKind) -> Option<Template>;
}

/// 只提供内置默认值的模板来源
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn load_template(&self, kind: TemplateKind) -> Option<Template> {
        Template::builtin(kind)
    }
}

/// 固定单个模板的来源，用于"当前选中的目录项"
#[derive(Debug, Clone)]
pub struct PendingTemplate(pub Template);

impl TemplateSource for PendingTemplate {
    fn load_template(&self, kind: TemplateKind) -> Option<Template> {
        (self.0.kind() == kind).then(|| self.0.clone())
    }
}

fn invalid(kind: TemplateKind, reason: impl Into<String>) -> TemplateError {
    TemplateError::Invalid {
        kind,
        reason: reason.into(),
    }
}

fn check_optional_dimension(
    kind: TemplateKind,
    field: &str,
    value: Option<f64>,
) -> Result<(), TemplateError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(invalid(kind, format!("{} must be a positive number", field)))
        }
        _ => Ok(()),
    }
}

fn check_price(kind: TemplateKind, price: Option<f64>) -> Result<(), TemplateError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(invalid(kind, "price must be >= 0")),
        _ => Ok(()),
    }
}
