//! 墙体捕捉
//!
//! 给定查询点，找出最近的墙体。两种模式共用同一个距离图元：
//! - 门窗模式：捕捉半径 50，只返回墙体
//! - 柜体模式：捕捉半径 40，同时返回投影点、投影参数和距离
//!
//! 扫描按墙体插入顺序线性进行，距离相同时先扫描到的墙体胜出。
//! 房间生成的墙体顺序固定（上、右、下、左），因此放置结果可复现。

use crate::entity::{EntityId, Wall};
use crate::geometry::distance_point_to_segment;
use crate::math::Point2;
use crate::walls::WallRegistry;
use serde::{Deserialize, Serialize};

/// 门窗模式的捕捉半径
pub const OPENING_SNAP_RADIUS: f64 = 50.0;

/// 柜体模式的捕捉半径
pub const FIXTURE_SNAP_RADIUS: f64 = 40.0;

/// 捕捉配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// 门窗吸附到墙体的最大距离
    pub opening_radius: f64,
    /// 柜体/电器吸附到墙体的最大距离
    pub fixture_radius: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            opening_radius: OPENING_SNAP_RADIUS,
            fixture_radius: FIXTURE_SNAP_RADIUS,
        }
    }
}

/// 柜体模式的捕捉结果
#[derive(Debug, Clone, PartialEq)]
pub struct WallSnap {
    pub wall_id: EntityId,
    /// 查询点在墙体线段上的投影
    pub projected: Point2,
    /// 投影参数，范围 `[0, 1]`
    pub t: f64,
    /// 查询点到墙体的距离
    pub distance: f64,
    /// 墙体方向角（弧度）
    pub angle: f64,
}

/// 墙体捕捉引擎
#[derive(Debug, Clone, Default)]
pub struct WallSnapEngine {
    config: SnapConfig,
}

impl WallSnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// 获取配置（可变）
    pub fn config_mut(&mut self) -> &mut SnapConfig {
        &mut self.config
    }

    /// 门窗模式：半径内最近的墙体
    pub fn nearest_wall_for_opening<'a>(
        &self,
        point: Point2,
        walls: &WallRegistry<'a>,
    ) -> Option<&'a Wall> {
        let (wall, distance) = nearest_within(point, walls, self.config.opening_radius)?;
        tracing::debug!("Opening snap: {} at distance {:.2}", wall.label, distance);
        Some(wall)
    }

    /// 柜体模式：半径内最近的墙体及投影信息
    ///
    /// 返回 `None` 时调用方退回自由放置。
    pub fn nearest_wall_for_fixture(
        &self,
        point: Point2,
        walls: &WallRegistry<'_>,
    ) -> Option<WallSnap> {
        let (wall, distance) = nearest_within(point, walls, self.config.fixture_radius)?;
        let segment = wall.segment();
        let t = segment.project_param(&point);

        tracing::debug!("Fixture snap: {} at t={:.3}, distance {:.2}", wall.label, t, distance);

        Some(WallSnap {
            wall_id: wall.id,
            projected: segment.point_at(t),
            t,
            distance,
            angle: segment.direction_angle(),
        })
    }
}

/// 线性扫描，返回距离不超过 `radius` 的最近墙体
///
/// 只有严格更近的墙体才会替换当前结果，所以平局时先扫描到的墙体胜出。
/// 非有限坐标不匹配任何墙体。
fn nearest_within<'a>(
    point: Point2,
    walls: &WallRegistry<'a>,
    radius: f64,
) -> Option<(&'a Wall, f64)> {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return None;
    }

    let mut best: Option<(&'a Wall, f64)> = None;

    for wall in walls.geometric() {
        let distance = distance_point_to_segment(&point, &wall.start, &wall.end);
        // NaN 距离同样被排除
        if !(distance <= radius) {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((wall, distance)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64, label: &str) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 270.0, 10.0, label)
    }

    fn square_room() -> Vec<Wall> {
        // 与房间生成相同的顺序：上、右、下、左
        vec![
            wall(-150.0, -200.0, 150.0, -200.0, "Wall A"),
            wall(150.0, -200.0, 150.0, 200.0, "Wall B"),
            wall(150.0, 200.0, -150.0, 200.0, "Wall C"),
            wall(-150.0, 200.0, -150.0, -200.0, "Wall D"),
        ]
    }

    #[test]
    fn test_opening_snap_radius() {
        let walls = square_room();
        let registry = WallRegistry::new(&walls);
        let engine = WallSnapEngine::default();

        let wall = engine.nearest_wall_for_opening(Point2::new(0.0, -170.0), &registry);
        assert_eq!(wall.map(|w| w.id), Some(walls[0].id));

        // 恰好 50
        let wall = engine.nearest_wall_for_opening(Point2::new(0.0, -150.0), &registry);
        assert_eq!(wall.map(|w| w.id), Some(walls[0].id));

        // 房间中心距离所有墙体都超过 50
        assert!(engine
            .nearest_wall_for_opening(Point2::new(0.0, 0.0), &registry)
            .is_none());
    }

    #[test]
    fn test_first_wall_wins_ties() {
        let walls = square_room();
        let registry = WallRegistry::new(&walls);
        let engine = WallSnapEngine::default();

        // 右上角：到 A 和 B 的距离相同
        let corner = Point2::new(130.0, -180.0);
        let wall = engine.nearest_wall_for_opening(corner, &registry).unwrap();
        assert_eq!(wall.label, "Wall A");

        // 重复调用结果一致
        for _ in 0..5 {
            let again = engine.nearest_wall_for_opening(corner, &registry).unwrap();
            assert_eq!(again.id, wall.id);
        }
    }

    #[test]
    fn test_fixture_snap_metadata() {
        let walls = square_room();
        let registry = WallRegistry::new(&walls);
        let engine = WallSnapEngine::default();

        let snap = engine
            .nearest_wall_for_fixture(Point2::new(75.0, -180.0), &registry)
            .unwrap();
        assert_eq!(snap.wall_id, walls[0].id);
        assert!((snap.t - 0.75).abs() < EPSILON);
        assert!((snap.distance - 20.0).abs() < EPSILON);
        assert!((snap.projected.x - 75.0).abs() < EPSILON);
        assert!((snap.projected.y + 200.0).abs() < EPSILON);
        assert!(snap.angle.abs() < EPSILON);

        // 45 在门窗半径内，但超出柜体半径
        assert!(engine
            .nearest_wall_for_fixture(Point2::new(0.0, -155.0), &registry)
            .is_none());
    }

    #[test]
    fn test_non_finite_point_matches_nothing() {
        let walls = square_room();
        let registry = WallRegistry::new(&walls);
        let engine = WallSnapEngine::default();

        for point in [
            Point2::new(f64::NAN, 0.0),
            Point2::new(0.0, f64::NAN),
            Point2::new(f64::INFINITY, -200.0),
            Point2::new(150.0, f64::NEG_INFINITY),
        ] {
            assert!(engine.nearest_wall_for_opening(point, &registry).is_none());
            assert!(engine.nearest_wall_for_fixture(point, &registry).is_none());
        }
    }

    #[test]
    fn test_degenerate_walls_skipped() {
        let p = Point2::new(0.0, 0.0);
        let walls = vec![Wall::new(p, p, 270.0, 10.0, "Wall A")];
        let registry = WallRegistry::new(&walls);
        let engine = WallSnapEngine::default();

        assert!(engine.nearest_wall_for_opening(p, &registry).is_none());
        assert!(engine.nearest_wall_for_fixture(p, &registry).is_none());
    }

    #[test]
    fn test_custom_config() {
        let walls = square_room();
        let registry = WallRegistry::new(&walls);
        let mut engine = WallSnapEngine::default();
        engine.config_mut().opening_radius = 10.0;

        assert!(engine
            .nearest_wall_for_opening(Point2::new(0.0, -170.0), &registry)
            .is_none());
        assert_eq!(engine.config().fixture_radius, FIXTURE_SNAP_RADIUS);
    }
}
