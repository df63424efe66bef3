//! 房间生成对话框的输入处理
//!
//! 对话框中的尺寸以毫米输入，在这里一次性换算为内部单位。

use floorcad_core::authoring::{generate_room, RoomDimensions, WallDefaults};
use floorcad_core::error::SceneError;
use floorcad_core::scene::SceneCommand;
use thiserror::Error;

/// 房间对话框输入错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomInputError {
    #[error("{field} 不是有效数字: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("房间尺寸必须为正数")]
    NonPositive(#[from] SceneError),
}

/// 对话框文本框内容（毫米）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInput {
    pub width: String,
    pub depth: String,
    pub height: String,
}

impl Default for RoomInput {
    fn default() -> Self {
        Self::new("3000", "4000", "2700")
    }
}

impl RoomInput {
    pub fn new(
        width: impl Into<String>,
        depth: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            width: width.into(),
            depth: depth.into(),
            height: height.into(),
        }
    }

    /// 解析并换算为内部单位
    pub fn dimensions(&self) -> Result<RoomDimensions, RoomInputError> {
        let width = parse_mm("width", &self.width)?;
        let depth = parse_mm("depth", &self.depth)?;
        let height = parse_mm("height", &self.height)?;
        Ok(RoomDimensions::from_millimeters(width, depth, height)?)
    }

    /// 生成房间边界命令
    pub fn commands(&self, defaults: &WallDefaults) -> Result<Vec<SceneCommand>, RoomInputError> {
        let room = self.dimensions()?;
        tracing::info!(
            "Generating room {:.0} x {:.0} (height {:.0})",
            room.width,
            room.depth,
            room.wall_height
        );
        Ok(generate_room(&room, defaults))
    }
}

fn parse_mm(field: &'static str, value: &str) -> Result<f64, RoomInputError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RoomInputError::NotANumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorcad_core::math::Point2;

    #[test]
    fn test_millimeters_converted_once() {
        let room = RoomInput::default().dimensions().unwrap();
        assert!((room.width - 300.0).abs() < 1e-9);
        assert!((room.depth - 400.0).abs() < 1e-9);
        assert!((room.wall_height - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_commands_build_room() {
        let commands = RoomInput::default().commands(&WallDefaults::default()).unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], SceneCommand::ClearWalls);

        let SceneCommand::AddWall(wall_a) = &commands[1] else {
            panic!("Expected AddWall");
        };
        assert_eq!(wall_a.label, "Wall A");
        assert_eq!(wall_a.start, Point2::new(-150.0, -200.0));
        assert_eq!(wall_a.end, Point2::new(150.0, -200.0));
    }

    #[test]
    fn test_rejects_bad_input() {
        let input = RoomInput::new("3000", "abc", "2700");
        assert_eq!(
            input.dimensions(),
            Err(RoomInputError::NotANumber {
                field: "depth",
                value: "abc".to_string(),
            })
        );

        let input = RoomInput::new("0", "4000", "2700");
        assert!(matches!(input.dimensions(), Err(RoomInputError::NonPositive(_))));

        let input = RoomInput::new("NaN", "4000", "2700");
        assert!(matches!(input.dimensions(), Err(RoomInputError::NotANumber { .. })));
    }
}
