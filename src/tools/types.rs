//! Core tool types.
//!
//! Defines the [`Tool`] trait every operation implements, the structured
//! [`ToolResult`] it returns, and the [`ToolMode`] used for gating.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which tools a registry exposes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    /// Only tools that never change persisted state.
    ReadOnly,
    /// All tools, including preference updates.
    #[default]
    Full,
}

/// Structured output of a tool call.
///
/// Tools report problems through `Err`, so a `ToolResult` is always a
/// success; "no recommendation" is the empty object `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// JSON payload returned to the caller.
    pub payload: serde_json::Value,
}

impl ToolResult {
    /// Serialize `value` into a result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CarbonError::Tool`] if `value` cannot be encoded.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(|payload| Self { payload })
            .map_err(|e| crate::CarbonError::Tool(format!("failed to encode tool output: {e}")))
    }

    /// Result for an optional value, `{}` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CarbonError::Tool`] if `value` cannot be encoded.
    pub fn from_optional<T: Serialize>(value: Option<&T>) -> Result<Self> {
        match value {
            Some(v) => Self::from_serialize(v),
            None => Ok(Self {
                payload: serde_json::json!({}),
            }),
        }
    }
}

/// A named operation callable with JSON arguments.
///
/// Tools must be `Send + Sync` so a registry can be shared across tasks.
pub trait Tool: Send + Sync {
    /// Tool name (e.g. `"recommend_best"`).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CarbonError::InvalidInput`] for missing or malformed
    /// arguments.
    fn execute(&self, args: serde_json::Value) -> Result<ToolResult>;

    /// Whether this tool is available in `mode`.
    fn allowed_in_mode(&self, mode: ToolMode) -> bool;
}
