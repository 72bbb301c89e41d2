//! List the regions allowed by the preference profile.

use crate::error::Result;
use crate::service::CarbonService;

use super::types::{Tool, ToolMode, ToolResult};

/// Tool listing the allowed regions in profile order.
pub struct ListRegionsTool {
    service: CarbonService,
}

impl ListRegionsTool {
    /// Create a new `ListRegionsTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for ListRegionsTool {
    fn name(&self) -> &str {
        "list_regions"
    }

    fn description(&self) -> &str {
        "List accessible regions from persistent preferences."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    fn execute(&self, _args: serde_json::Value) -> Result<ToolResult> {
        ToolResult::from_serialize(&self.service.list_regions())
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true
    }
}
