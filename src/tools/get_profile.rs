//! Read the current preference profile.

use crate::error::Result;
use crate::service::CarbonService;

use super::types::{Tool, ToolMode, ToolResult};

/// Tool returning the persisted preference profile.
///
/// # Arguments (JSON)
///
/// None.
pub struct GetProfileTool {
    service: CarbonService,
}

impl GetProfileTool {
    /// Create a new `GetProfileTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for GetProfileTool {
    fn name(&self) -> &str {
        "get_profile"
    }

    fn description(&self) -> &str {
        "Return current persistent preferences: regions_allowed, allowed_shift_minutes."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    fn execute(&self, _args: serde_json::Value) -> Result<ToolResult> {
        ToolResult::from_serialize(&self.service.get_profile())
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::tools::test_support::test_service;

    #[test]
    fn returns_profile_fields() {
        let tool = GetProfileTool::new(test_service());
        let result = tool.execute(serde_json::json!({})).unwrap();
        assert_eq!(result.payload["allowed_shift_minutes"], 60);
        assert_eq!(
            result.payload["regions_allowed"],
            serde_json::json!(["SG", "EU_WEST", "US_WEST"])
        );
    }

    #[test]
    fn allowed_in_every_mode() {
        let tool = GetProfileTool::new(test_service());
        assert!(tool.allowed_in_mode(ToolMode::ReadOnly));
        assert!(tool.allowed_in_mode(ToolMode::Full));
    }
}
