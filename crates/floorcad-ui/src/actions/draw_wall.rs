//! 绘制墙体 Action
//!
//! 两次点击确定一段墙体，墙体标签按现有墙数自动编号。

use crate::action::{Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry};
use floorcad_core::authoring::WallDefaults;
use floorcad_core::geometry::Segment;
use floorcad_core::math::Point2;
use floorcad_core::scene::SceneCommand;

/// 墙体绘制状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// 等待第一个点
    Idle,
    /// 等待第二个点
    AwaitingSecondPoint,
}

/// 绘制墙体 Action
pub struct DrawWallAction {
    status: Status,
    start_point: Option<Point2>,
    defaults: WallDefaults,
}

impl DrawWallAction {
    pub fn new() -> Self {
        Self::with_defaults(WallDefaults::default())
    }

    pub fn with_defaults(defaults: WallDefaults) -> Self {
        Self {
            status: Status::Idle,
            start_point: None,
            defaults,
        }
    }

    /// 正交模式下把终点约束到水平或竖直方向
    fn constrain(ctx: &ActionContext, start: Point2, coord: Point2) -> Point2 {
        if !ctx.ortho_mode {
            return coord;
        }
        let delta = coord - start;
        if delta.x.abs() >= delta.y.abs() {
            Point2::new(coord.x, start.y)
        } else {
            Point2::new(start.x, coord.y)
        }
    }
}

impl Default for DrawWallAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawWallAction {
    fn action_type(&self) -> ActionType {
        ActionType::DrawWall
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
        self.start_point = None;
    }

    fn on_mouse_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => self.on_coordinate(ctx, ctx.mouse_pos),
            MouseButton::Right => {
                // 右键：放弃已选起点，再次右键退出
                match self.status {
                    Status::Idle => ActionResult::Cancel,
                    Status::AwaitingSecondPoint => {
                        self.reset();
                        ActionResult::Continue
                    }
                }
            }
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn on_coordinate(&mut self, ctx: &ActionContext, coord: Point2) -> ActionResult {
        match (self.status, self.start_point) {
            (Status::AwaitingSecondPoint, Some(start)) => {
                let end = Self::constrain(ctx, start, coord);
                let label = ctx.snapshot.wall_registry().next_label();
                match self.defaults.wall_between(start, end, label) {
                    Ok(wall) => {
                        tracing::debug!("Wall drawn: {} ({:.1})", wall.label, wall.length());
                        self.reset();
                        ActionResult::Commit(vec![SceneCommand::AddWall(wall)])
                    }
                    Err(_) => {
                        // 零长度墙体：忽略这次点击，继续等待终点
                        tracing::debug!(
                            "Ignoring zero-length wall at ({:.1}, {:.1})",
                            end.x,
                            end.y
                        );
                        ActionResult::Continue
                    }
                }
            }
            _ => {
                self.start_point = Some(coord);
                self.status = Status::AwaitingSecondPoint;
                ActionResult::Continue
            }
        }
    }

    fn get_prompt(&self) -> &str {
        match self.status {
            Status::Idle => "指定墙体起点:",
            Status::AwaitingSecondPoint => "指定墙体终点 [右键放弃起点]:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        match (self.status, self.start_point) {
            (Status::AwaitingSecondPoint, Some(start)) => {
                let end = Self::constrain(ctx, start, ctx.mouse_pos);
                vec![PreviewGeometry::Wall(Segment::new(start, end))]
            }
            _ => Vec::new(),
        }
    }
}
