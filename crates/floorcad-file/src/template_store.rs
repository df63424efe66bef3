//! 模板库
//!
//! 以 JSON 对象保存，键为模板类型（`cabinet`/`door`/`window`/`appliance`），
//! 值为该类型的模板记录。读取时按类型反序列化并校验，缺失或无效时
//! 退回内置默认值。

use crate::error::FileError;
use floorcad_core::template::{
    DoorTemplate, FixtureTemplate, Template, TemplateKind, TemplateSource, WindowTemplate,
};
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 键值模板库
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    entries: BTreeMap<TemplateKind, Value>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载，文件不存在时返回空库
    pub fn load(path: &Path) -> Result<Self, FileError> {
        if !path.exists() {
            tracing::info!("Template file {} not found, using built-in defaults", path.display());
            return Ok(Self::new());
        }
        let text = fs::read_to_string(path)?;
        let store = Self::from_json(&text)?;
        tracing::info!("Loaded {} template(s) from {}", store.entries.len(), path.display());
        Ok(store)
    }

    /// 从 JSON 文本解析，未知的键被忽略
    pub fn from_json(text: &str) -> Result<Self, FileError> {
        let object: Map<String, Value> = serde_json::from_str(text)?;
        let mut entries = BTreeMap::new();
        for (key, value) in object {
            match key.parse::<TemplateKind>() {
                Ok(kind) => {
                    entries.insert(kind, value);
                }
                Err(e) => tracing::warn!("{}", e),
            }
        }
        Ok(Self { entries })
    }

    pub fn to_json(&self) -> Result<String, FileError> {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(kind, value)| (kind.key().to_string(), value.clone()))
            .collect();
        Ok(serde_json::to_string_pretty(&object)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("Saved {} template(s) to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// 保存模板，先校验
    pub fn set_template(&mut self, template: &Template) -> Result<(), FileError> {
        template.validate()?;
        let value = match template {
            Template::Door(t) => serde_json::to_value(t)?,
            Template::Window(t) => serde_json::to_value(t)?,
            Template::Cabinet(t) | Template::Appliance(t) => serde_json::to_value(t)?,
        };
        self.entries.insert(template.kind(), value);
        Ok(())
    }

    pub fn remove_template(&mut self, kind: TemplateKind) -> bool {
        self.entries.remove(&kind).is_some()
    }

    /// 解析并校验存储的记录
    fn parse_entry(kind: TemplateKind, value: &Value) -> Result<Template, FileError> {
        let template = match kind {
            TemplateKind::Door => Template::Door(from_value::<DoorTemplate>(value)?),
            TemplateKind::Window => Template::Window(from_value::<WindowTemplate>(value)?),
            TemplateKind::Cabinet => Template::Cabinet(from_value::<FixtureTemplate>(value)?),
            TemplateKind::Appliance => Template::Appliance(from_value::<FixtureTemplate>(value)?),
        };
        template.validate()?;
        Ok(template)
    }
}

impl TemplateSource for TemplateStore {
    fn load_template(&self, kind: TemplateKind) -> Option<Template> {
        let Some(value) = self.entries.get(&kind) else {
            return Template::builtin(kind);
        };
        match Self::parse_entry(kind, value) {
            Ok(template) => Some(template),
            Err(e) => {
                tracing::warn!("Ignoring stored {} template: {}", kind, e);
                Template::builtin(kind)
            }
        }
    }
}

fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(value)
}
