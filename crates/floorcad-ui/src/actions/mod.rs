//! 具体的 Action 实现

mod draw_wall;
mod place_fixture;
mod place_opening;

pub use draw_wall::DrawWallAction;
pub use place_fixture::PlaceFixtureAction;
pub use place_opening::PlaceOpeningAction;

use crate::action::{Action, ActionType};
use floorcad_core::entity::FixtureCategory;
use floorcad_core::opening::OpeningKind;

/// 创建指定类型的 Action
pub fn create_action(action_type: ActionType) -> Box<dyn Action> {
    match action_type {
        ActionType::DrawWall => Box::new(DrawWallAction::new()),
        ActionType::PlaceDoor => Box::new(PlaceOpeningAction::new(OpeningKind::Door)),
        ActionType::PlaceWindow => Box::new(PlaceOpeningAction::new(OpeningKind::Window)),
        ActionType::PlaceCabinet => Box::new(PlaceFixtureAction::new(FixtureCategory::Cabinet)),
        ActionType::PlaceAppliance => Box::new(PlaceFixtureAction::new(FixtureCategory::Appliance)),
    }
}
