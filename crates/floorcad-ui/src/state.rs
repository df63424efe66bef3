//! 编辑器状态管理
//!
//! `Editor` 持有当前工具，把指针事件交给工具处理，
//! 再将产生的命令提交给场景存储。

use crate::action::{Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry};
use crate::actions::create_action;
use crate::command_registry::CommandRegistry;
use crate::room_dialog::{RoomInput, RoomInputError};
use floorcad_core::authoring::WallDefaults;
use floorcad_core::entity::{EntityId, FixturePatch};
use floorcad_core::error::{PlacementError, SceneError};
use floorcad_core::fixture::apply_to_same_type;
use floorcad_core::math::Point2;
use floorcad_core::opening::{OpeningKind, OpeningPlacer};
use floorcad_core::scene::{SceneCommand, SceneSnapshot, SceneStore};
use floorcad_core::snap::SnapConfig;
use floorcad_core::template::TemplateSource;

/// 一次编辑操作的结果
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// 无操作（没有激活的工具，或工具等待更多输入）
    Idle,
    /// 已提交的命令数量
    Committed(usize),
    /// 放置失败，场景未修改
    PlacementFailed(PlacementError),
    /// 场景存储拒绝了命令
    Rejected(SceneError),
    /// 工具已退出
    Cancelled,
}

/// 编辑器
pub struct Editor {
    action: Option<Box<dyn Action>>,
    commands: CommandRegistry,
    snap_config: SnapConfig,
    wall_defaults: WallDefaults,
    /// 正交模式
    pub ortho_mode: bool,
    /// 状态栏消息
    pub status_message: String,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            action: None,
            commands: CommandRegistry::new(),
            snap_config: SnapConfig::default(),
            wall_defaults: WallDefaults::default(),
            ortho_mode: false,
            status_message: String::new(),
        }
    }

    /// 当前工具
    pub fn current_tool(&self) -> Option<ActionType> {
        self.action.as_ref().map(|a| a.action_type())
    }

    /// 切换工具，丢弃前一个工具的中间状态
    pub fn set_tool(&mut self, tool: ActionType) {
        tracing::debug!("Tool changed to {}", tool.name());
        self.action = Some(create_action(tool));
        self.status_message = self.prompt().to_string();
    }

    /// 退出当前工具
    pub fn clear_tool(&mut self) {
        self.action = None;
        self.status_message.clear();
    }

    /// 执行命令行输入，未知命令返回 false
    pub fn run_command(&mut self, input: &str) -> bool {
        match self.commands.lookup(input) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                self.status_message = format!("未知命令: {}", input.trim());
                false
            }
        }
    }

    /// 当前提示文本
    pub fn prompt(&self) -> &str {
        self.action.as_ref().map(|a| a.get_prompt()).unwrap_or("命令:")
    }

    /// 处理鼠标点击
    pub fn click<S: SceneStore>(
        &mut self,
        store: &mut S,
        templates: &dyn TemplateSource,
        point: Point2,
        button: MouseButton,
    ) -> EditorEvent {
        let Some(action) = self.action.as_mut() else {
            return EditorEvent::Idle;
        };

        let snapshot = store.snapshot();
        let mut ctx = ActionContext::new(point, &snapshot, templates);
        ctx.ortho_mode = self.ortho_mode;

        let result = action.on_mouse_click(&ctx, button);
        self.finish(store, result)
    }

    /// 当前鼠标位置下的预览
    pub fn preview(
        &self,
        snapshot: &SceneSnapshot,
        templates: &dyn TemplateSource,
        point: Point2,
    ) -> Vec<PreviewGeometry> {
        let Some(action) = self.action.as_ref() else {
            return Vec::new();
        };
        let mut ctx = ActionContext::new(point, snapshot, templates);
        ctx.ortho_mode = self.ortho_mode;
        action.get_preview(&ctx)
    }

    /// 根据房间对话框输入重建房间边界
    pub fn create_room<S: SceneStore>(
        &mut self,
        store: &mut S,
        input: &RoomInput,
    ) -> Result<EditorEvent, RoomInputError> {
        let commands = input.commands(&self.wall_defaults)?;
        let count = commands.len();
        Ok(match store.apply_all(commands) {
            Ok(()) => EditorEvent::Committed(count),
            Err(e) => EditorEvent::Rejected(e),
        })
    }

    /// 拖动门窗到新位置
    pub fn drag_opening<S: SceneStore>(
        &mut self,
        store: &mut S,
        kind: OpeningKind,
        id: EntityId,
        point: Point2,
    ) -> EditorEvent {
        let placer = OpeningPlacer::new(self.snap_config.clone());
        let snapshot = store.snapshot();
        match placer.move_opening(&snapshot, kind, id, point) {
            Ok(Some(command)) => self.commit(store, vec![command]),
            Ok(None) => EditorEvent::Rejected(SceneError::EntityNotFound(id)),
            Err(e) => self.placement_failed(e),
        }
    }

    /// 把属性修改同步到同类型的其他固定装置
    pub fn apply_to_same_type<S: SceneStore>(
        &mut self,
        store: &mut S,
        source_id: EntityId,
        patch: &FixturePatch,
    ) -> EditorEvent {
        let snapshot = store.snapshot();
        match apply_to_same_type(&snapshot, source_id, patch) {
            Ok(commands) => self.commit(store, commands),
            Err(e) => EditorEvent::Rejected(e),
        }
    }

    fn finish<S: SceneStore>(&mut self, store: &mut S, result: ActionResult) -> EditorEvent {
        match result {
            ActionResult::Continue => {
                self.status_message = self.prompt().to_string();
                EditorEvent::Idle
            }
            ActionResult::Commit(commands) => self.commit(store, commands),
            ActionResult::Failed(e) => self.placement_failed(e),
            ActionResult::Cancel => {
                self.clear_tool();
                EditorEvent::Cancelled
            }
        }
    }

    fn commit<S: SceneStore>(&mut self, store: &mut S, commands: Vec<SceneCommand>) -> EditorEvent {
        let count = commands.len();
        match store.apply_all(commands) {
            Ok(()) => {
                self.status_message = self.prompt().to_string();
                EditorEvent::Committed(count)
            }
            Err(e) => {
                tracing::warn!("Scene store rejected command: {}", e);
                self.status_message = e.to_string();
                EditorEvent::Rejected(e)
            }
        }
    }

    fn placement_failed(&mut self, error: PlacementError) -> EditorEvent {
        self.status_message = error.to_string();
        EditorEvent::PlacementFailed(error)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
