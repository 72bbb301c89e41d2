//! Update persistent preferences.
//!
//! Mutation tool: hidden in [`ToolMode::ReadOnly`].

use crate::error::Result;
use crate::service::CarbonService;

use super::args::{optional_i64, optional_str};
use super::types::{Tool, ToolMode, ToolResult};

/// Tool performing a partial merge of the preference profile.
///
/// # Arguments (JSON)
///
/// - `regions_allowed` (string, optional): comma-separated regions, e.g. `"SG,EU_WEST"`
/// - `allowed_shift_minutes` (integer, optional): non-negative shift window
pub struct UpdatePreferencesTool {
    service: CarbonService,
}

impl UpdatePreferencesTool {
    /// Create a new `UpdatePreferencesTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for UpdatePreferencesTool {
    fn name(&self) -> &str {
        "update_preferences"
    }

    fn description(&self) -> &str {
        "Update persistent preferences. Omitted fields keep their current value. \
         Use whenever the user states a preference about regions or how far a job may shift. \
         Returns the updated profile."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "regions_allowed": {
                    "type": "string",
                    "description": "Comma-separated regions, e.g. 'SG,EU_WEST'"
                },
                "allowed_shift_minutes": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "How many minutes a job may move from its requested start"
                }
            },
            "required": []
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let regions = optional_str(&args, "regions_allowed")?;
        let shift = optional_i64(&args, "allowed_shift_minutes")?;
        let profile = self.service.update_preferences(regions, shift)?;
        ToolResult::from_serialize(&profile)
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        mode == ToolMode::Full
    }
}
