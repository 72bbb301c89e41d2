//! The public operations as named, schema-described tools.
//!
//! Each tool wraps a [`CarbonService`] call: JSON arguments in, a
//! [`ToolResult`] out. [`build_registry`] registers all six.

mod args;
pub mod best_slot;
pub mod get_profile;
pub mod list_regions;
pub mod recommend_best;
pub mod region_forecast;
pub mod registry;
pub mod types;
pub mod update_preferences;

use std::sync::Arc;

pub use best_slot::BestSlotTool;
pub use get_profile::GetProfileTool;
pub use list_regions::ListRegionsTool;
pub use recommend_best::RecommendBestTool;
pub use region_forecast::RegionForecastTool;
pub use registry::ToolRegistry;
pub use types::{Tool, ToolMode, ToolResult};
pub use update_preferences::UpdatePreferencesTool;

use crate::service::CarbonService;

/// Registry with every operation registered, gated by `mode`.
pub fn build_registry(service: &CarbonService, mode: ToolMode) -> ToolRegistry {
    let mut registry = ToolRegistry::new(mode);
    registry.register(Arc::new(GetProfileTool::new(service.clone())));
    registry.register(Arc::new(ListRegionsTool::new(service.clone())));
    registry.register(Arc::new(UpdatePreferencesTool::new(service.clone())));
    registry.register(Arc::new(RegionForecastTool::new(service.clone())));
    registry.register(Arc::new(BestSlotTool::new(service.clone())));
    registry.register(Arc::new(RecommendBestTool::new(service.clone())));
    registry
}
