//! Best slot in one region within an explicit window.

use crate::error::Result;
use crate::service::CarbonService;

use super::args::{required_i64, required_str};
use super::types::{Tool, ToolMode, ToolResult};

/// Tool running the single-region window search.
///
/// # Arguments (JSON)
///
/// - `region` (string, required)
/// - `start_iso` (string, required): requested start, ISO-8601
/// - `window_minutes` (integer, required): non-negative window radius
pub struct BestSlotTool {
    service: CarbonService,
}

impl BestSlotTool {
    /// Create a new `BestSlotTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for BestSlotTool {
    fn name(&self) -> &str {
        "best_slot_in_window"
    }

    fn description(&self) -> &str {
        "Given a region, requested start ISO time and window minutes, return the lowest-carbon \
         slot in the window: {region, ts, intensity, baseline_intensity, shift_minutes}, \
         or {} if the window holds no forecast."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "region": {
                    "type": "string",
                    "description": "Region identifier, e.g. 'SG'"
                },
                "start_iso": {
                    "type": "string",
                    "description": "Requested start time, ISO-8601"
                },
                "window_minutes": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Minutes either side of the start to consider"
                }
            },
            "required": ["region", "start_iso", "window_minutes"]
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let region = required_str(&args, "region")?;
        let start = required_str(&args, "start_iso")?;
        let window = required_i64(&args, "window_minutes")?;
        let rec = self.service.best_slot_in_window(region, start, window)?;
        ToolResult::from_optional(rec.as_ref())
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true
    }
}
