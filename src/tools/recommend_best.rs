//! Profile-driven global recommendation.

use crate::error::Result;
use crate::service::CarbonService;

use super::args::required_str;
use super::types::{Tool, ToolMode, ToolResult};

/// Tool recommending the best (region, time) across all allowed regions.
///
/// # Arguments (JSON)
///
/// - `start_iso` (string, required): requested start, ISO-8601
pub struct RecommendBestTool {
    service: CarbonService,
}

impl RecommendBestTool {
    /// Create a new `RecommendBestTool`.
    pub fn new(service: CarbonService) -> Self {
        Self { service }
    }
}

impl Tool for RecommendBestTool {
    fn name(&self) -> &str {
        "recommend_best"
    }

    fn description(&self) -> &str {
        "Use current persistent preferences to recommend the best (region, time). Looks across \
         all allowed regions and the allowed shift window and returns the globally best pick, \
         or {} when no region has a forecast in the window."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "start_iso": {
                    "type": "string",
                    "description": "Requested start time, ISO-8601"
                }
            },
            "required": ["start_iso"]
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let start = required_str(&args, "start_iso")?;
        let rec = self.service.recommend_best(start)?;
        ToolResult::from_optional(rec.as_ref())
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
    fn recommends_across_regions() {
        let tool = RecommendBestTool::new(test_service());
        let result = tool
            .execute(serde_json::json!({"start_iso": "2025-09-13T10:05:00"}))
            .unwrap();
        assert_eq!(result.payload["region"], "EU_WEST");
        assert_eq!(result.payload["ts"], "2025-09-13T10:00:00Z");
        assert_eq!(result.payload["shift_minutes"], 0);
    }

    #[test]
    fn rejects_unparseable_start() {
        let tool = RecommendBestTool::new(test_service());
        let err = tool
            .execute(serde_json::json!({"start_iso": "tomorrow 10am"}))
            .unwrap_err();
        assert!(err.is_input_error());
    }
}
