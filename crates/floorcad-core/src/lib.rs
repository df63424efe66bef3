//! FloorCAD 核心引擎
//!
//! 平面布置图的几何计算、墙体捕捉和工程量清单（BOQ）汇总。
//!
//! # 架构设计
//!
//! 核心不持有任何全局场景状态，采用「快照 + 命令」模式：
//! - `SceneSnapshot`: 场景存储在某一版本的只读拷贝
//! - `SceneCommand`: 放置/编辑操作的输出，由外部存储原子地执行
//! - `SceneStore`: 外部场景存储需要实现的接口
//!
//! # 示例
//!
//! ```rust
//! use floorcad_core::prelude::*;
//!
//! // 生成 3000mm x 4000mm 的房间墙体
//! let room = RoomDimensions::from_millimeters(3000.0, 4000.0, 2700.0).unwrap();
//! let commands = generate_room(&room, &WallDefaults::default());
//! assert_eq!(commands.len(), 5); // 清空 + 四面墙
//! ```

pub mod authoring;
pub mod boq;
pub mod entity;
pub mod error;
pub mod fixture;
pub mod geometry;
pub mod math;
pub mod opening;
pub mod scene;
pub mod snap;
pub mod template;
pub mod walls;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::authoring::{generate_room, wall_label, RoomDimensions, WallDefaults};
    pub use crate::boq::{Boq, BoqEngine, BoqItem, BoqPricing, BoqWorkingCopy};
    pub use crate::entity::{
        ApplianceType, CabinetType, Door, EntityId, Fixture, FixtureCategory, FixtureKind,
        FixturePatch, OpeningPatch, Wall, WallPatch, Window,
    };
    pub use crate::error::{BoqError, PlacementError, SceneError, TemplateError};
    pub use crate::fixture::{apply_to_same_type, FixturePlacer};
    pub use crate::geometry::{distance_point_to_segment, project_param, Segment};
    pub use crate::math::{Point2, Vector2, EPSILON};
    pub use crate::opening::{opening_anchor, OpeningKind, OpeningPlacer};
    pub use crate::scene::{SceneCommand, SceneSnapshot, SceneStore};
    pub use crate::snap::{SnapConfig, WallSnap, WallSnapEngine};
    pub use crate::template::{
        BuiltinTemplates, DoorTemplate, FixtureTemplate, PendingTemplate, Template, TemplateKind,
        TemplateSource, WindowTemplate,
    };
    pub use crate::walls::WallRegistry;
}
