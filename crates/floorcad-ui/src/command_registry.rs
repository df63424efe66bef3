//! 命令注册表
//!
//! 把命令行输入（完整命令或快捷键）映射到编辑工具

use crate::action::ActionType;
use std::collections::HashMap;

const TOOLS: [ActionType; 5] = [
    ActionType::DrawWall,
    ActionType::PlaceDoor,
    ActionType::PlaceWindow,
    ActionType::PlaceCabinet,
    ActionType::PlaceAppliance,
];

/// 命令注册表
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// 完整命令 -> ActionType
    main_commands: HashMap<String, ActionType>,
    /// 快捷键/短命令 -> ActionType
    short_commands: HashMap<String, ActionType>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            main_commands: HashMap::new(),
            short_commands: HashMap::new(),
        };
        for tool in TOOLS {
            registry.register(tool);
        }
        registry
    }

    /// 以工具名称为完整命令、工具快捷键为短命令注册
    fn register(&mut self, action: ActionType) {
        self.main_commands.insert(action.name().to_uppercase(), action);
        self.short_commands.insert(action.shortcut().to_uppercase(), action);
    }

    /// 查找命令对应的 ActionType，大小写不敏感
    pub fn lookup(&self, input: &str) -> Option<ActionType> {
        let input_upper = input.trim().to_uppercase();
        self.main_commands
            .get(&input_upper)
            .or_else(|| self.short_commands.get(&input_upper))
            .copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_full_commands() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.lookup("WALL"), Some(ActionType::DrawWall));
        assert_eq!(registry.lookup("wall"), Some(ActionType::DrawWall));
        assert_eq!(registry.lookup(" Cabinet "), Some(ActionType::PlaceCabinet));
        assert_eq!(registry.lookup("LINE"), None);
        assert_eq!(registry.lookup(""), None);
    }

    #[test]
    fn test_every_shortcut_resolves_to_its_tool() {
        let registry = CommandRegistry::new();
        for tool in TOOLS {
            assert_eq!(registry.lookup(tool.shortcut()), Some(tool));
            assert_eq!(registry.lookup(&tool.shortcut().to_lowercase()), Some(tool));
        }
    }
}
