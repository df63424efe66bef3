//! 门窗放置
//!
//! 把指针位置转换为相对墙体的门窗记录：找到半径内最近的墙体，
//! 以投影参数作为沿墙的归一化位置。

use crate::entity::{Door, EntityId, OpeningPatch, Wall, Window};
use crate::error::PlacementError;
use crate::math::Point2;
use crate::scene::{SceneCommand, SceneSnapshot};
use crate::snap::{SnapConfig, WallSnapEngine};
use crate::template::{Template, TemplateKind, TemplateSource};

/// 门窗类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn template_kind(&self) -> TemplateKind {
        match self {
            OpeningKind::Door => TemplateKind::Door,
            OpeningKind::Window => TemplateKind::Window,
        }
    }
}

/// 门窗放置引擎
#[derive(Debug, Clone, Default)]
pub struct OpeningPlacer {
    snap: WallSnapEngine,
}

impl OpeningPlacer {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            snap: WallSnapEngine::new(config),
        }
    }

    /// 在 `point` 附近的墙上放置门
    pub fn place_door(
        &self,
        snapshot: &SceneSnapshot,
        point: Point2,
        templates: &dyn TemplateSource,
    ) -> Result<SceneCommand, PlacementError> {
        let Some(Template::Door(template)) = templates.load_template(TemplateKind::Door) else {
            return Err(PlacementError::TemplateNotFound(TemplateKind::Door));
        };
        let (wall, position) = self.resolve(snapshot, point)?;

        let door = Door {
            id: EntityId::new(),
            wall_id: wall.id,
            position,
            width: template.width(),
            height: template.height(),
            door_type: template.door_type().to_string(),
            name: template.name.clone(),
            price: template.price,
        };
        tracing::debug!("Door placed on {} at {:.3}", wall.label, position);
        Ok(SceneCommand::AddDoor(door))
    }

    /// 在 `point` 附近的墙上放置窗
    pub fn place_window(
        &self,
        snapshot: &SceneSnapshot,
        point: Point2,
        templates: &dyn TemplateSource,
    ) -> Result<SceneCommand, PlacementError> {
        let Some(Template::Window(template)) = templates.load_template(TemplateKind::Window) else {
            return Err(PlacementError::TemplateNotFound(TemplateKind::Window));
        };
        let (wall, position) = self.resolve(snapshot, point)?;

        let window = Window {
            id: EntityId::new(),
            wall_id: wall.id,
            position,
            width: template.width(),
            height: template.height(),
            sill_height: template.sill_height(),
            window_type: template.window_type().to_string(),
            frame_thickness: template.frame_thickness,
            name: template.name.clone(),
            price: template.price,
        };
        tracing::debug!("Window placed on {} at {:.3}", wall.label, position);
        Ok(SceneCommand::AddWindow(window))
    }

    pub fn place(
        &self,
        kind: OpeningKind,
        snapshot: &SceneSnapshot,
        point: Point2,
        templates: &dyn TemplateSource,
    ) -> Result<SceneCommand, PlacementError> {
        match kind {
            OpeningKind::Door => self.place_door(snapshot, point, templates),
            OpeningKind::Window => self.place_window(snapshot, point, templates),
        }
    }

    /// 拖动已有门窗：重新寻找墙体并更新所属墙和位置
    ///
    /// 门窗不存在时返回 `Ok(None)`。
    pub fn move_opening(
        &self,
        snapshot: &SceneSnapshot,
        kind: OpeningKind,
        id: EntityId,
        point: Point2,
    ) -> Result<Option<SceneCommand>, PlacementError> {
        let exists = match kind {
            OpeningKind::Door => snapshot.door(id).is_some(),
            OpeningKind::Window => snapshot.window(id).is_some(),
        };
        if !exists {
            return Ok(None);
        }

        let (wall, position) = self.resolve(snapshot, point)?;
        let patch = OpeningPatch {
            wall_id: Some(wall.id),
            position: Some(position),
            ..Default::default()
        };

        Ok(Some(match kind {
            OpeningKind::Door => SceneCommand::UpdateDoor { id, patch },
            OpeningKind::Window => SceneCommand::UpdateWindow { id, patch },
        }))
    }

    fn resolve<'a>(
        &self,
        snapshot: &'a SceneSnapshot,
        point: Point2,
    ) -> Result<(&'a Wall, f64), PlacementError> {
        let walls = snapshot.wall_registry();
        let wall = self
            .snap
            .nearest_wall_for_opening(point, &walls)
            .ok_or(PlacementError::NoWallFound {
                x: point.x,
                y: point.y,
            })?;
        Ok((wall, wall.segment().project_param(&point)))
    }
}

/// 门窗中心在平面上的位置
pub fn opening_anchor(wall: &Wall, position: f64) -> Point2 {
    wall.segment().point_at(position.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;
    use crate::template::{BuiltinTemplates, DoorTemplate, PendingTemplate, WindowTemplate};

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64, label: &str) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 270.0, 10.0, label)
    }

    fn snapshot() -> SceneSnapshot {
        SceneSnapshot {
            walls: vec![
                wall(0.0, 0.0, 400.0, 0.0, "Wall A"),
                wall(400.0, 0.0, 400.0, 300.0, "Wall B"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_place_door_on_nearest_wall() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();

        let cmd = placer
            .place_door(&scene, Point2::new(100.0, 30.0), &BuiltinTemplates)
            .unwrap();
        match cmd {
            SceneCommand::AddDoor(door) => {
                assert_eq!(door.wall_id, scene.walls[0].id);
                assert!((door.position - 0.25).abs() < EPSILON);
                assert_eq!(door.width, 80.0);
                assert_eq!(door.height, 200.0);
                assert_eq!(door.door_type, "standard");
            }
            other => panic!("Expected AddDoor, got {:?}", other),
        }
    }

    #[test]
    fn test_position_clamped_past_wall_end() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();

        // 起点外侧 30：位置钳制为 0
        let cmd = placer
            .place_door(&scene, Point2::new(-30.0, 0.0), &BuiltinTemplates)
            .unwrap();
        let SceneCommand::AddDoor(door) = cmd else {
            panic!("Expected AddDoor");
        };
        assert_eq!(door.position, 0.0);
        assert!((0.0..=1.0).contains(&door.position));
    }

    #[test]
    fn test_no_wall_found() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();

        let err = placer
            .place_door(&scene, Point2::new(200.0, 150.0), &BuiltinTemplates)
            .unwrap_err();
        assert_eq!(err, PlacementError::NoWallFound { x: 200.0, y: 150.0 });

        let empty = SceneSnapshot::default();
        assert!(placer
            .place_window(&empty, Point2::new(0.0, 0.0), &BuiltinTemplates)
            .is_err());
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();

        let err = placer
            .place_door(&scene, Point2::new(f64::NAN, 0.0), &BuiltinTemplates)
            .unwrap_err();
        assert!(matches!(err, PlacementError::NoWallFound { .. }));

        let door = Door {
            id: EntityId::new(),
            wall_id: scene.walls[0].id,
            position: 0.5,
            width: 80.0,
            height: 200.0,
            door_type: "standard".to_string(),
            name: None,
            price: None,
        };
        let scene = SceneSnapshot {
            doors: vec![door.clone()],
            ..scene
        };
        assert!(placer
            .move_opening(&scene, OpeningKind::Door, door.id, Point2::new(100.0, f64::INFINITY))
            .is_err());
    }

    #[test]
    fn test_window_template_overrides() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();
        let template = PendingTemplate(Template::Window(WindowTemplate {
            width: Some(120.0),
            sill_height: Some(100.0),
            ..Default::default()
        }));

        let cmd = placer
            .place_window(&scene, Point2::new(420.0, 150.0), &template)
            .unwrap();
        let SceneCommand::AddWindow(window) = cmd else {
            panic!("Expected AddWindow");
        };
        assert_eq!(window.wall_id, scene.walls[1].id);
        assert!((window.position - 0.5).abs() < EPSILON);
        assert_eq!(window.width, 120.0);
        assert_eq!(window.height, 200.0);
        assert_eq!(window.sill_height, 100.0);
    }

    #[test]
    fn test_template_not_found() {
        let scene = snapshot();
        let placer = OpeningPlacer::default();
        let only_doors = PendingTemplate(Template::Door(DoorTemplate::default()));

        let err = placer
            .place_window(&scene, Point2::new(100.0, 0.0), &only_doors)
            .unwrap_err();
        assert_eq!(err, PlacementError::TemplateNotFound(TemplateKind::Window));
    }

    #[test]
    fn test_move_opening() {
        let mut scene = snapshot();
        let placer = OpeningPlacer::default();
        let SceneCommand::AddDoor(door) = placer
            .place_door(&scene, Point2::new(100.0, 0.0), &BuiltinTemplates)
            .unwrap()
        else {
            panic!("Expected AddDoor");
        };
        let door_id = door.id;
        scene.doors.push(door);

        let cmd = placer
            .move_opening(&scene, OpeningKind::Door, door_id, Point2::new(390.0, 75.0))
            .unwrap()
            .unwrap();
        match cmd {
            SceneCommand::UpdateDoor { id, patch } => {
                assert_eq!(id, door_id);
                assert_eq!(patch.wall_id, Some(scene.walls[1].id));
                assert!((patch.position.unwrap() - 0.25).abs() < EPSILON);
            }
            other => panic!("Expected UpdateDoor, got {:?}", other),
        }

        let missing = placer
            .move_opening(&scene, OpeningKind::Window, door_id, Point2::new(100.0, 0.0))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_opening_anchor() {
        let wall = wall(0.0, 0.0, 400.0, 0.0, "Wall A");
        let p = opening_anchor(&wall, 0.25);
        assert!((p.x - 100.0).abs() < EPSILON);
        assert_eq!(opening_anchor(&wall, 2.0), Point2::new(400.0, 0.0));
    }
}
