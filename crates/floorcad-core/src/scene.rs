//! 场景快照与命令
//!
//! 核心读取外部存储提供的 `SceneSnapshot`，返回 `SceneCommand`，
//! 由存储逐条原子执行。每次放置都重新读取最新快照，核心不跨调用缓存墙体。

use crate::entity::{
    Door, EntityId, Fixture, FixtureCategory, FixturePatch, OpeningPatch, Wall, WallPatch, Window,
};
use crate::error::SceneError;
use crate::walls::WallRegistry;
use serde::{Deserialize, Serialize};

/// 场景在某一版本的只读拷贝
///
/// 所有序列保持插入顺序，最近墙体查询的平局规则依赖这一顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// 每执行一条命令递增
    pub version: u64,
    pub walls: Vec<Wall>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub fixtures: Vec<Fixture>,
}

impl SceneSnapshot {
    /// 墙体只读视图
    pub fn wall_registry(&self) -> WallRegistry<'_> {
        WallRegistry::new(&self.walls)
    }

    pub fn door(&self, id: EntityId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn window(&self, id: EntityId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn fixture(&self, id: EntityId) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    pub fn cabinets(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures_in(FixtureCategory::Cabinet)
    }

    pub fn appliances(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures_in(FixtureCategory::Appliance)
    }

    fn fixtures_in(&self, category: FixtureCategory) -> impl Iterator<Item = &Fixture> {
        self.fixtures
            .iter()
            .filter(move |f| f.category() == category)
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.doors.is_empty()
            && self.windows.is_empty()
            && self.fixtures.is_empty()
    }
}

/// 场景变更命令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneCommand {
    AddWall(Wall),
    UpdateWall { id: EntityId, patch: WallPatch },
    RemoveWall(EntityId),
    /// 清除所有墙体（门窗的级联删除由存储自行决定）
    ClearWalls,

    AddDoor(Door),
    UpdateDoor { id: EntityId, patch: OpeningPatch },
    RemoveDoor(EntityId),

    AddWindow(Window),
    UpdateWindow { id: EntityId, patch: OpeningPatch },
    RemoveWindow(EntityId),

    AddFixture(Fixture),
    UpdateFixture { id: EntityId, patch: FixturePatch },
    RemoveFixture(EntityId),
}

impl SceneCommand {
    /// 命令名称（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            SceneCommand::AddWall(_) => "AddWall",
            SceneCommand::UpdateWall { .. } => "UpdateWall",
            SceneCommand::RemoveWall(_) => "RemoveWall",
            SceneCommand::ClearWalls => "ClearWalls",
            SceneCommand::AddDoor(_) => "AddDoor",
            SceneCommand::UpdateDoor { .. } => "UpdateDoor",
            SceneCommand::RemoveDoor(_) => "RemoveDoor",
            SceneCommand::AddWindow(_) => "AddWindow",
            SceneCommand::UpdateWindow { .. } => "UpdateWindow",
            SceneCommand::RemoveWindow(_) => "RemoveWindow",
            SceneCommand::AddFixture(_) => "AddFixture",
            SceneCommand::UpdateFixture { .. } => "UpdateFixture",
            SceneCommand::RemoveFixture(_) => "RemoveFixture",
        }
    }
}

/// 外部场景存储接口
pub trait SceneStore {
    /// 获取当前场景快照
    fn snapshot(&self) -> SceneSnapshot;

    /// 原子地执行一条命令
    fn apply(&mut self, command: SceneCommand) -> Result<(), SceneError>;

    /// 按顺序执行多条命令，遇到第一个错误即停止
    fn apply_all(&mut self, commands: Vec<SceneCommand>) -> Result<(), SceneError> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ApplianceType, CabinetType, FixtureKind};
    use crate::math::Point2;

    fn fixture(kind: FixtureKind) -> Fixture {
        Fixture {
            id: EntityId::new(),
            kind,
            sub_category: None,
            position: Point2::origin(),
            rotation: 0.0,
            width: 60.0,
            height: 85.0,
            depth: 60.0,
            name: kind.name().to_string(),
            material: None,
            brand: None,
            price: 0.0,
        }
    }

    #[test]
    fn test_fixtures_split_by_category() {
        let snapshot = SceneSnapshot {
            fixtures: vec![
                fixture(FixtureKind::Cabinet(CabinetType::Base)),
                fixture(FixtureKind::Appliance(ApplianceType::Sink)),
                fixture(FixtureKind::Cabinet(CabinetType::Tall)),
            ],
            ..Default::default()
        };

        let cabinets: Vec<EntityId> = snapshot.cabinets().map(|f| f.id).collect();
        assert_eq!(cabinets, [snapshot.fixtures[0].id, snapshot.fixtures[2].id]);

        let appliances: Vec<EntityId> = snapshot.appliances().map(|f| f.id).collect();
        assert_eq!(appliances, [snapshot.fixtures[1].id]);

        assert_eq!(snapshot.fixture(snapshot.fixtures[1].id), Some(&snapshot.fixtures[1]));
        assert!(snapshot.fixture(EntityId::new()).is_none());
        assert!(!snapshot.is_empty());
        assert!(SceneSnapshot::default().is_empty());
    }
}
