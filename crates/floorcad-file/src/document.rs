//! 内存场景存储
//!
//! `Document` 持有墙体、门窗和固定装置，逐条执行 `SceneCommand`，
//! 每执行成功一条命令版本号加一。删除墙体时级联删除挂在该墙上的门窗，
//! 保证门窗引用的墙体始终存在。

use floorcad_core::boq::{Boq, BoqEngine, BoqPricing};
use floorcad_core::entity::{Door, EntityId, Fixture, Wall, Window};
use floorcad_core::error::SceneError;
use floorcad_core::scene::{SceneCommand, SceneSnapshot, SceneStore};
use serde::{Deserialize, Serialize};

/// 文档元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// 项目名称，导出文件名由此生成
    pub title: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: "Untitled Project".to_string(),
        }
    }
}

/// 平面布置文档
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub metadata: DocumentMetadata,
    version: u64,
    walls: Vec<Wall>,
    doors: Vec<Door>,
    windows: Vec<Window>,
    fixtures: Vec<Fixture>,
    boq_engine: BoqEngine,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.metadata.title = title.into();
        doc
    }

    pub fn set_pricing(&mut self, pricing: BoqPricing) {
        self.boq_engine = BoqEngine::new(pricing);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn entity_count(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len() + self.fixtures.len()
    }

    /// 按当前场景生成工程量清单
    pub fn generate_boq(&self) -> Boq {
        self.boq_engine.generate(&self.snapshot())
    }

    fn require_wall(&self, id: EntityId) -> Result<(), SceneError> {
        if self.walls.iter().any(|w| w.id == id) {
            Ok(())
        } else {
            Err(SceneError::EntityNotFound(id))
        }
    }

    /// 删除墙体上的门窗
    fn remove_openings_on(&mut self, wall_id: EntityId) {
        let before = self.doors.len() + self.windows.len();
        self.doors.retain(|d| d.wall_id != wall_id);
        self.windows.retain(|w| w.wall_id != wall_id);
        let removed = before - self.doors.len() - self.windows.len();
        if removed > 0 {
            tracing::info!("Removed {} opening(s) hosted by wall {}", removed, wall_id);
        }
    }

    fn execute(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        match command {
            SceneCommand::AddWall(wall) => {
                if wall.is_degenerate() {
                    return Err(SceneError::DegenerateGeometry);
                }
                self.walls.push(wall);
            }
            SceneCommand::UpdateWall { id, patch } => {
                let wall = find_mut(&mut self.walls, id, |w| w.id)?;
                let mut updated = wall.clone();
                patch.apply(&mut updated);
                if updated.is_degenerate() {
                    return Err(SceneError::DegenerateGeometry);
                }
                *wall = updated;
            }
            SceneCommand::RemoveWall(id) => {
                remove(&mut self.walls, id, |w| w.id)?;
                self.remove_openings_on(id);
            }
            SceneCommand::ClearWalls => {
                self.walls.clear();
                self.doors.clear();
                self.windows.clear();
            }

            SceneCommand::AddDoor(mut door) => {
                self.require_wall(door.wall_id)?;
                door.position = clamp_position(door.position)?;
                self.doors.push(door);
            }
            SceneCommand::UpdateDoor { id, patch } => {
                if let Some(wall_id) = patch.wall_id {
                    self.require_wall(wall_id)?;
                }
                if let Some(position) = patch.position {
                    clamp_position(position)?;
                }
                patch.apply_to_door(find_mut(&mut self.doors, id, |d| d.id)?);
            }
            SceneCommand::RemoveDoor(id) => remove(&mut self.doors, id, |d| d.id)?,

            SceneCommand::AddWindow(mut window) => {
                self.require_wall(window.wall_id)?;
                window.position = clamp_position(window.position)?;
                self.windows.push(window);
            }
            SceneCommand::UpdateWindow { id, patch } => {
                if let Some(wall_id) = patch.wall_id {
                    self.require_wall(wall_id)?;
                }
                if let Some(position) = patch.position {
                    clamp_position(position)?;
                }
                patch.apply_to_window(find_mut(&mut self.windows, id, |w| w.id)?);
            }
            SceneCommand::RemoveWindow(id) => remove(&mut self.windows, id, |w| w.id)?,

            SceneCommand::AddFixture(fixture) => self.fixtures.push(fixture),
            SceneCommand::UpdateFixture { id, patch } => {
                patch.apply(find_mut(&mut self.fixtures, id, |f| f.id)?);
            }
            SceneCommand::RemoveFixture(id) => remove(&mut self.fixtures, id, |f| f.id)?,
        }
        Ok(())
    }
}

impl SceneStore for Document {
    fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            version: self.version,
            walls: self.walls.clone(),
            doors: self.doors.clone(),
            windows: self.windows.clone(),
            fixtures: self.fixtures.clone(),
        }
    }

    fn apply(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        let name = command.name();
        match self.execute(command) {
            Ok(()) => {
                self.version += 1;
                tracing::debug!("Applied {} (version {})", name, self.version);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected {}: {}", name, e);
                Err(e)
            }
        }
    }
}

/// 门窗位置夹到 `[0, 1]`，非有限值视为无效几何
fn clamp_position(position: f64) -> Result<f64, SceneError> {
    if position.is_finite() {
        Ok(position.clamp(0.0, 1.0))
    } else {
        Err(SceneError::DegenerateGeometry)
    }
}

fn find_mut<T>(
    items: &mut [T],
    id: EntityId,
    id_of: impl Fn(&T) -> EntityId,
) -> Result<&mut T, SceneError> {
    items
        .iter_mut()
        .find(|item| id_of(item) == id)
        .ok_or(SceneError::EntityNotFound(id))
}

fn remove<T>(
    items: &mut Vec<T>,
    id: EntityId,
    id_of: impl Fn(&T) -> EntityId,
) -> Result<(), SceneError> {
    let index = items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or(SceneError::EntityNotFound(id))?;
    items.remove(index);
    Ok(())
}
