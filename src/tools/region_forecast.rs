//! Raw forecast series for one region.

use crate::error::Result;
use crate::service::CarbonService;

use super::args::required_str;
use super::types::{Tool, ToolMode, ToolResult};

/// Tool returning a region's 15-minute forecast entries.
///
/// # Arguments (JSON)
///
/// - `region` (string, required): region identifier, case-insensitive
pub struct RegionForecastTool {
    service: CarbonService,
}

impl RegionForecastTool {
    /// Create a new `RegionForecastTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for RegionForecastTool {
    fn name(&self) -> &str {
        "get_region_forecast"
    }

    fn description(&self) -> &str {
        "Return 15-min forecast entries [{'ts': ISO, 'g': int}] for a region from the local dataset."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "region": {
                    "type": "string",
                    "description": "Region identifier, e.g. 'SG'"
                }
            },
            "required": ["region"]
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let region = required_str(&args, "region")?;
        ToolResult::from_serialize(&self.service.region_forecast(region))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true
    }
}
