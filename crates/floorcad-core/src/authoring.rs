//! 墙体绘制
//!
//! - 墙体标签与默认尺寸
//! - 房间边界生成：以原点为中心的矩形，按上、右、下、左顺序生成四面墙
//!
//! 两点画墙的交互状态机在编辑器层（`floorcad-ui`），这里只提供建墙规则。

use crate::entity::Wall;
use crate::error::SceneError;
use crate::math::{mm_to_internal, Point2};
use crate::scene::SceneCommand;
use serde::{Deserialize, Serialize};

/// 前四面墙的固定标签
pub const WALL_LABELS: [&str; 4] = ["Wall A", "Wall B", "Wall C", "Wall D"];

/// 按当前墙体数量生成标签，超出四面后为 `Wall {n+1}`
pub fn wall_label(index: usize) -> String {
    WALL_LABELS
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Wall {}", index + 1))
}

/// 新建墙体的默认尺寸
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDefaults {
    pub height: f64,
    pub thickness: f64,
}

impl Default for WallDefaults {
    fn default() -> Self {
        Self {
            height: 270.0,
            thickness: 10.0,
        }
    }
}

impl WallDefaults {
    /// 两点之间建墙，零长度时返回 `DegenerateGeometry`
    pub fn wall_between(
        &self,
        start: Point2,
        end: Point2,
        label: impl Into<String>,
    ) -> Result<Wall, SceneError> {
        let wall = Wall::new(start, end, self.height, self.thickness, label);
        if wall.is_degenerate() {
            return Err(SceneError::DegenerateGeometry);
        }
        Ok(wall)
    }
}

/// 房间尺寸（内部单位）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub depth: f64,
    pub wall_height: f64,
}

impl RoomDimensions {
    pub fn new(width: f64, depth: f64, wall_height: f64) -> Result<Self, SceneError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(depth) && valid(wall_height)) {
            return Err(SceneError::DegenerateGeometry);
        }
        Ok(Self {
            width,
            depth,
            wall_height,
        })
    }

    /// 从对话框输入的毫米值创建
    pub fn from_millimeters(
        width_mm: f64,
        depth_mm: f64,
        height_mm: f64,
    ) -> Result<Self, SceneError> {
        Self::new(
            mm_to_internal(width_mm),
            mm_to_internal(depth_mm),
            mm_to_internal(height_mm),
        )
    }
}

/// 生成房间边界
///
/// 先清除所有现有墙体，再按上(A)、右(B)、下(C)、左(D)的顺序生成四面墙。
/// 放置引擎的平局规则依赖这一顺序。
pub fn generate_room(room: &RoomDimensions, defaults: &WallDefaults) -> Vec<SceneCommand> {
    let hw = room.width / 2.0;
    let hd = room.depth / 2.0;

    let corners = [
        Point2::new(-hw, -hd),
        Point2::new(hw, -hd),
        Point2::new(hw, hd),
        Point2::new(-hw, hd),
    ];

    let mut commands = Vec::with_capacity(5);
    commands.push(SceneCommand::ClearWalls);

    for i in 0..4 {
        let wall = Wall::new(
            corners[i],
            corners[(i + 1) % 4],
            room.wall_height,
            defaults.thickness,
            wall_label(i),
        );
        commands.push(SceneCommand::AddWall(wall));
    }

    tracing::info!(
        "Generated room boundary {}x{} (height {})",
        room.width,
        room.depth,
        room.wall_height
    );
    commands
}
