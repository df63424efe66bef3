//! FloorCAD 编辑工具
//!
//! 与界面框架无关的交互层：每个工具是一个状态机（`Action`），
//! 把指针事件转换为场景命令，由 `Editor` 提交给场景存储。

pub mod action;
pub mod actions;
pub mod command_registry;
pub mod room_dialog;
pub mod state;

pub use action::{Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry};
pub use actions::create_action;
pub use command_registry::CommandRegistry;
pub use room_dialog::{RoomInput, RoomInputError};
pub use state::{Editor, EditorEvent};
