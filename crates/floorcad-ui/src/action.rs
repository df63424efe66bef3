//! Action 系统 - 状态机式的编辑工具
//!
//! 每个工具是一个独立的 Action 实现，读取当前场景快照，
//! 返回要提交的场景命令。Action 本身不修改场景。

use floorcad_core::error::PlacementError;
use floorcad_core::geometry::Segment;
use floorcad_core::math::Point2;
use floorcad_core::scene::{SceneCommand, SceneSnapshot};
use floorcad_core::template::TemplateSource;

/// Action 执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// 继续当前 action
    Continue,
    /// 提交场景命令，action 保持激活
    Commit(Vec<SceneCommand>),
    /// 放置失败（提示用户，不修改场景）
    Failed(PlacementError),
    /// 取消当前 action
    Cancel,
}

/// Action 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    DrawWall,
    PlaceDoor,
    PlaceWindow,
    PlaceCabinet,
    PlaceAppliance,
}

impl ActionType {
    /// 获取 action 的名称
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::DrawWall => "Wall",
            ActionType::PlaceDoor => "Door",
            ActionType::PlaceWindow => "Window",
            ActionType::PlaceCabinet => "Cabinet",
            ActionType::PlaceAppliance => "Appliance",
        }
    }

    /// 获取快捷键
    pub fn shortcut(&self) -> &'static str {
        match self {
            ActionType::DrawWall => "W",
            ActionType::PlaceDoor => "D",
            ActionType::PlaceWindow => "N",
            ActionType::PlaceCabinet => "C",
            ActionType::PlaceAppliance => "A",
        }
    }
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 鼠标在平面中的坐标
    pub mouse_pos: Point2,
    /// 当前场景快照
    pub snapshot: &'a SceneSnapshot,
    /// 当前待放置的模板
    pub templates: &'a dyn TemplateSource,
    /// 正交模式
    pub ortho_mode: bool,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        mouse_pos: Point2,
        snapshot: &'a SceneSnapshot,
        templates: &'a dyn TemplateSource,
    ) -> Self {
        Self {
            mouse_pos,
            snapshot,
            templates,
            ortho_mode: false,
        }
    }
}

/// 预览几何体
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewGeometry {
    /// 正在绘制的墙体
    Wall(Segment),
    /// 吸附后的放置点及朝向（度）
    Placement { position: Point2, rotation: f64 },
    /// 将要吸附的墙体（高亮显示）
    SnapTarget(Segment),
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Action trait - 所有编辑工具的核心接口
pub trait Action: Send {
    /// 获取 action 类型
    fn action_type(&self) -> ActionType;

    /// 获取 action 名称
    fn name(&self) -> &str {
        self.action_type().name()
    }

    /// 重置 action 状态
    fn reset(&mut self);

    /// 鼠标点击事件
    fn on_mouse_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => self.on_coordinate(ctx, ctx.mouse_pos),
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    /// 坐标输入事件（点击或命令行输入）
    fn on_coordinate(&mut self, ctx: &ActionContext, coord: Point2) -> ActionResult;

    /// 获取当前状态的提示文本
    fn get_prompt(&self) -> &str;

    /// 获取预览几何体
    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry>;
}
