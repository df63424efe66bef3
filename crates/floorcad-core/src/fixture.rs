//! 柜体与电器放置
//!
//! 指针在墙体 40 单位内时吸附到墙：位置沿墙的外法线偏移，
//! 朝向与墙体方向对齐；否则在原位自由放置（如岛台），旋转为 0。

use crate::entity::{
    ApplianceType, CabinetType, EntityId, Fixture, FixtureCategory, FixtureKind, FixturePatch,
};
use crate::error::{PlacementError, SceneError};
use crate::math::{normalize_degrees, Point2, Vector2};
use crate::scene::{SceneCommand, SceneSnapshot};
use crate::snap::{SnapConfig, WallSnap, WallSnapEngine};
use crate::template::{FixtureTemplate, Template, TemplateKind, TemplateSource};

/// 地柜、高柜离墙距离
pub const BASE_WALL_OFFSET: f64 = 10.0;

/// 吊柜离墙距离
pub const HANGING_WALL_OFFSET: f64 = 5.0;

/// 贴墙方式，决定离墙偏移量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapProfile {
    /// 地柜式
    Base,
    /// 高柜式
    Tall,
    /// 吊柜式
    Wall,
    /// 不偏移
    Flush,
}

impl SnapProfile {
    pub fn for_kind(kind: FixtureKind) -> Self {
        match kind {
            FixtureKind::Cabinet(CabinetType::Base) => SnapProfile::Base,
            FixtureKind::Cabinet(CabinetType::Tall) => SnapProfile::Tall,
            FixtureKind::Cabinet(CabinetType::Wall) => SnapProfile::Wall,
            // 水槽总是嵌在台面里，按地柜方式贴墙
            FixtureKind::Appliance(ApplianceType::Sink) => SnapProfile::Base,
            _ => SnapProfile::Flush,
        }
    }

    pub fn offset(&self) -> f64 {
        match self {
            SnapProfile::Base | SnapProfile::Tall => BASE_WALL_OFFSET,
            SnapProfile::Wall => HANGING_WALL_OFFSET,
            SnapProfile::Flush => 0.0,
        }
    }
}

/// 吸附到墙体后的位置与旋转
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedPlacement {
    pub position: Point2,
    /// 旋转角（度），范围 `[0, 360)`
    pub rotation: f64,
}

/// 根据捕捉结果计算吸附位置
///
/// 位置 = 投影点 + offset * (sin θ, -cos θ)，旋转 = θ(度) + 90。
pub fn snapped_placement(snap: &WallSnap, profile: SnapProfile) -> SnappedPlacement {
    let normal = Vector2::new(snap.angle.sin(), -snap.angle.cos());
    SnappedPlacement {
        position: snap.projected + normal * profile.offset(),
        rotation: normalize_degrees(snap.angle.to_degrees() + 90.0),
    }
}

/// 柜体/电器放置引擎
#[derive(Debug, Clone, Default)]
pub struct FixturePlacer {
    snap: WallSnapEngine,
}

impl FixturePlacer {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            snap: WallSnapEngine::new(config),
        }
    }

    /// 在 `point` 处放置指定类别的固定装置
    pub fn place(
        &self,
        snapshot: &SceneSnapshot,
        point: Point2,
        category: FixtureCategory,
        templates: &dyn TemplateSource,
    ) -> Result<SceneCommand, PlacementError> {
        let kind = TemplateKind::from(category);
        let template = match (category, templates.load_template(kind)) {
            (FixtureCategory::Cabinet, Some(Template::Cabinet(t)))
            | (FixtureCategory::Appliance, Some(Template::Appliance(t))) => t,
            _ => return Err(PlacementError::TemplateNotFound(kind)),
        };

        Ok(SceneCommand::AddFixture(self.build(snapshot, point, &template)))
    }

    /// 按模板生成固定装置记录
    pub fn build(
        &self,
        snapshot: &SceneSnapshot,
        point: Point2,
        template: &FixtureTemplate,
    ) -> Fixture {
        let walls = snapshot.wall_registry();
        let profile = SnapProfile::for_kind(template.kind);

        let (position, rotation) = match self.snap.nearest_wall_for_fixture(point, &walls) {
            Some(snap) => {
                let placed = snapped_placement(&snap, profile);
                tracing::debug!(
                    "{} snapped to wall {} ({:?}, rotation {:.1})",
                    template.kind.name(),
                    snap.wall_id,
                    profile,
                    placed.rotation
                );
                (placed.position, placed.rotation)
            }
            None => {
                tracing::debug!(
                    "{} placed freely at ({:.1}, {:.1})",
                    template.kind.name(),
                    point.x,
                    point.y
                );
                (point, 0.0)
            }
        };

        Fixture {
            id: EntityId::new(),
            kind: template.kind,
            sub_category: template.sub_category.clone(),
            position,
            rotation,
            width: template.width,
            height: template.height,
            depth: template.depth,
            name: template.display_name(),
            material: template.material.clone(),
            brand: template.brand.clone(),
            price: template.price,
        }
    }
}

/// 把属性应用到与 `source_id` 同类型的所有其他固定装置
///
/// 只传播尺寸、材质等共享属性，位置和旋转不传播。
/// 返回的命令数等于同类型数量减一。
pub fn apply_to_same_type(
    snapshot: &SceneSnapshot,
    source_id: EntityId,
    patch: &FixturePatch,
) -> Result<Vec<SceneCommand>, SceneError> {
    let source = snapshot
        .fixture(source_id)
        .ok_or(SceneError::EntityNotFound(source_id))?;
    let shared = patch.shared_properties();

    let commands: Vec<SceneCommand> = snapshot
        .fixtures
        .iter()
        .filter(|f| f.id != source.id && f.kind == source.kind)
        .map(|f| SceneCommand::UpdateFixture {
            id: f.id,
            patch: shared.clone(),
        })
        .collect();

    tracing::debug!(
        "Applying properties of {} to {} other {} fixture(s)",
        source_id,
        commands.len(),
        source.kind.name()
    );
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Wall;
    use crate::math::EPSILON;
    use crate::template::{BuiltinTemplates, PendingTemplate};

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64, label: &str) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 270.0, 10.0, label)
    }

    fn room() -> SceneSnapshot {
        SceneSnapshot {
            walls: vec![
                wall(-150.0, -200.0, 150.0, -200.0, "Wall A"),
                wall(150.0, -200.0, 150.0, 200.0, "Wall B"),
            ],
            ..Default::default()
        }
    }

    fn cabinet(kind: CabinetType) -> FixtureTemplate {
        FixtureTemplate::new(FixtureKind::Cabinet(kind), 60.0, 85.0, 60.0).with_price(320.0)
    }

    fn place(scene: &SceneSnapshot, point: Point2, template: FixtureTemplate) -> Fixture {
        let category = template.kind.category();
        let source = match category {
            FixtureCategory::Cabinet => PendingTemplate(Template::Cabinet(template)),
            FixtureCategory::Appliance => PendingTemplate(Template::Appliance(template)),
        };
        match FixturePlacer::default().place(scene, point, category, &source).unwrap() {
            SceneCommand::AddFixture(f) => f,
            other => panic!("Expected AddFixture, got {:?}", other),
        }
    }

    #[test]
    fn test_base_cabinet_snaps_with_offset() {
        let scene = room();
        let f = place(&scene, Point2::new(0.0, -180.0), cabinet(CabinetType::Base));

        // θ = 0：法线 (0, -1)，偏移 10
        assert!(f.position.x.abs() < EPSILON);
        assert!((f.position.y + 210.0).abs() < EPSILON);
        assert!((f.rotation - 90.0).abs() < EPSILON);
        assert_eq!(f.price, 320.0);
        assert_eq!(f.name, "Base Cabinet");
    }

    #[test]
    fn test_wall_cabinet_offset() {
        let scene = room();
        let f = place(&scene, Point2::new(130.0, 0.0), cabinet(CabinetType::Wall));

        // 墙 B 方向 θ = 90°：法线 (1, 0)，偏移 5
        assert!((f.position.x - 155.0).abs() < EPSILON);
        assert!(f.position.y.abs() < EPSILON);
        assert!((f.rotation - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_flush_appliance_and_sink() {
        let scene = room();
        let fridge = FixtureTemplate::new(
            FixtureKind::Appliance(ApplianceType::Refrigerator),
            70.0,
            180.0,
            65.0,
        );
        let f = place(&scene, Point2::new(0.0, -170.0), fridge);
        assert!((f.position.y + 200.0).abs() < EPSILON);

        let sink =
            FixtureTemplate::new(FixtureKind::Appliance(ApplianceType::Sink), 80.0, 20.0, 50.0);
        let f = place(&scene, Point2::new(0.0, -170.0), sink);
        assert!((f.position.y + 210.0).abs() < EPSILON);
        assert!((f.rotation - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_free_placement() {
        let scene = room();
        let island = cabinet(CabinetType::Island);
        let f = place(&scene, Point2::new(0.0, 0.0), island);
        assert_eq!(f.position, Point2::new(0.0, 0.0));
        assert_eq!(f.rotation, 0.0);

        // 没有墙体时同样自由放置
        let f = place(&SceneSnapshot::default(), Point2::new(5.0, 6.0), cabinet(CabinetType::Base));
        assert_eq!(f.position, Point2::new(5.0, 6.0));
        assert_eq!(f.rotation, 0.0);
    }

    #[test]
    fn test_rotation_normalized() {
        // θ = 180° + 90 = 270；θ = -90° + 90 = 0
        let walls = vec![
            wall(100.0, 0.0, 0.0, 0.0, "Wall A"),
            wall(500.0, 100.0, 500.0, 0.0, "Wall B"),
        ];
        let scene = SceneSnapshot { walls, ..Default::default() };

        let f = place(&scene, Point2::new(50.0, 10.0), cabinet(CabinetType::Base));
        assert!((f.rotation - 270.0).abs() < 1e-9);

        let f = place(&scene, Point2::new(510.0, 50.0), cabinet(CabinetType::Base));
        assert!(f.rotation.abs() < 1e-9 || (f.rotation - 360.0).abs() < 1e-9);
        assert!(f.rotation < 360.0);
    }

    #[test]
    fn test_template_not_found() {
        let err = FixturePlacer::default()
            .place(&room(), Point2::new(0.0, 0.0), FixtureCategory::Cabinet, &BuiltinTemplates)
            .unwrap_err();
        assert_eq!(err, PlacementError::TemplateNotFound(TemplateKind::Cabinet));

        // 模板类别与请求类别不符
        let pending = PendingTemplate(Template::Cabinet(cabinet(CabinetType::Base)));
        let err = FixturePlacer::default()
            .place(&room(), Point2::new(0.0, 0.0), FixtureCategory::Appliance, &pending)
            .unwrap_err();
        assert_eq!(err, PlacementError::TemplateNotFound(TemplateKind::Appliance));
    }

    #[test]
    fn test_apply_to_same_type() {
        let mut scene = room();
        let placer = FixturePlacer::default();
        for x in [-100.0, 0.0, 100.0] {
            let fixture = placer.build(&scene, Point2::new(x, 0.0), &cabinet(CabinetType::Base));
            scene.fixtures.push(fixture);
        }
        let upper = placer.build(&scene, Point2::new(0.0, 50.0), &cabinet(CabinetType::Wall));
        scene.fixtures.push(upper);

        let source = scene.fixtures[0].id;
        let patch = FixturePatch {
            material: Some("walnut".to_string()),
            position: Some(Point2::new(9.0, 9.0)),
            ..Default::default()
        };
        let commands = apply_to_same_type(&scene, source, &patch).unwrap();

        let base_count = scene
            .fixtures
            .iter()
            .filter(|f| f.kind == FixtureKind::Cabinet(CabinetType::Base))
            .count();
        assert_eq!(commands.len(), base_count - 1);

        let wall_cabinet = scene.fixtures[3].id;
        for cmd in &commands {
            let SceneCommand::UpdateFixture { id, patch } = cmd else {
                panic!("Expected UpdateFixture");
            };
            assert_ne!(*id, source);
            assert_ne!(*id, wall_cabinet);
            assert!(patch.position.is_none());
            assert_eq!(patch.material.as_deref(), Some("walnut"));
        }

        let missing = EntityId::new();
        assert_eq!(
            apply_to_same_type(&scene, missing, &patch).unwrap_err(),
            SceneError::EntityNotFound(missing)
        );
    }
}
