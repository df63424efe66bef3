//! 放置门窗 Action
//!
//! 单击放置，工具保持激活直到取消。

use crate::action::{Action, ActionContext, ActionResult, ActionType, PreviewGeometry};
use floorcad_core::math::Point2;
use floorcad_core::opening::{opening_anchor, OpeningKind, OpeningPlacer};
use floorcad_core::snap::{SnapConfig, WallSnapEngine};

/// 放置门或窗
pub struct PlaceOpeningAction {
    kind: OpeningKind,
    placer: OpeningPlacer,
    snap: WallSnapEngine,
}

impl PlaceOpeningAction {
    pub fn new(kind: OpeningKind) -> Self {
        Self::with_config(kind, SnapConfig::default())
    }

    pub fn with_config(kind: OpeningKind, config: SnapConfig) -> Self {
        Self {
            kind,
            placer: OpeningPlacer::new(config.clone()),
            snap: WallSnapEngine::new(config),
        }
    }

    pub fn kind(&self) -> OpeningKind {
        self.kind
    }
}

impl Action for PlaceOpeningAction {
    fn action_type(&self) -> ActionType {
        match self.kind {
            OpeningKind::Door => ActionType::PlaceDoor,
            OpeningKind::Window => ActionType::PlaceWindow,
        }
    }

    fn reset(&mut self) {}

    fn on_coordinate(&mut self, ctx: &ActionContext, coord: Point2) -> ActionResult {
        match self.placer.place(self.kind, ctx.snapshot, coord, ctx.templates) {
            Ok(command) => ActionResult::Commit(vec![command]),
            Err(e) => {
                tracing::warn!("{} placement failed: {}", self.name(), e);
                ActionResult::Failed(e)
            }
        }
    }

    fn get_prompt(&self) -> &str {
        match self.kind {
            OpeningKind::Door => "在墙体附近点击放置门:",
            OpeningKind::Window => "在墙体附近点击放置窗:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        let walls = ctx.snapshot.wall_registry();
        let Some(wall) = self.snap.nearest_wall_for_opening(ctx.mouse_pos, &walls) else {
            return Vec::new();
        };
        let segment = wall.segment();
        let anchor = opening_anchor(wall, segment.project_param(&ctx.mouse_pos));
        vec![
            PreviewGeometry::SnapTarget(segment),
            PreviewGeometry::Placement {
                position: anchor,
                rotation: wall.angle().to_degrees(),
            },
        ]
    }
}
