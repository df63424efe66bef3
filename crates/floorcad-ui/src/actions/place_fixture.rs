//! 放置柜体 / 电器 Action

use crate::action::{Action, ActionContext, ActionResult, ActionType, PreviewGeometry};
use floorcad_core::entity::FixtureCategory;
use floorcad_core::fixture::{snapped_placement, FixturePlacer, SnapProfile};
use floorcad_core::math::Point2;
use floorcad_core::snap::{SnapConfig, WallSnapEngine};
use floorcad_core::template::{FixtureTemplate, Template, TemplateKind};

/// 放置固定装置，靠近墙体时自动贴墙
pub struct PlaceFixtureAction {
    category: FixtureCategory,
    placer: FixturePlacer,
    snap: WallSnapEngine,
}

impl PlaceFixtureAction {
    pub fn new(category: FixtureCategory) -> Self {
        Self::with_config(category, SnapConfig::default())
    }

    pub fn with_config(category: FixtureCategory, config: SnapConfig) -> Self {
        Self {
            category,
            placer: FixturePlacer::new(config.clone()),
            snap: WallSnapEngine::new(config),
        }
    }

    /// 当前类别对应的模板
    fn template(&self, ctx: &ActionContext) -> Option<FixtureTemplate> {
        match (self.category, ctx.templates.load_template(TemplateKind::from(self.category))) {
            (FixtureCategory::Cabinet, Some(Template::Cabinet(t)))
            | (FixtureCategory::Appliance, Some(Template::Appliance(t))) => Some(t),
            _ => None,
        }
    }
}

impl Action for PlaceFixtureAction {
    fn action_type(&self) -> ActionType {
        match self.category {
            FixtureCategory::Cabinet => ActionType::PlaceCabinet,
            FixtureCategory::Appliance => ActionType::PlaceAppliance,
        }
    }

    fn reset(&mut self) {}

    fn on_coordinate(&mut self, ctx: &ActionContext, coord: Point2) -> ActionResult {
        match self.placer.place(ctx.snapshot, coord, self.category, ctx.templates) {
            Ok(command) => ActionResult::Commit(vec![command]),
            Err(e) => {
                tracing::warn!("{} placement failed: {}", self.name(), e);
                ActionResult::Failed(e)
            }
        }
    }

    fn get_prompt(&self) -> &str {
        match self.category {
            FixtureCategory::Cabinet => "指定柜体位置（靠近墙体自动贴墙）:",
            FixtureCategory::Appliance => "指定电器位置（靠近墙体自动贴墙）:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        let Some(template) = self.template(ctx) else {
            return Vec::new();
        };
        let walls = ctx.snapshot.wall_registry();
        let (position, rotation) = match self.snap.nearest_wall_for_fixture(ctx.mouse_pos, &walls) {
            Some(snap) => {
                let placed = snapped_placement(&snap, SnapProfile::for_kind(template.kind));
                (placed.position, placed.rotation)
            }
            None => (ctx.mouse_pos, 0.0),
        };
        vec![PreviewGeometry::Placement { position, rotation }]
    }
}
