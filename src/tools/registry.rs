//! Name-indexed tool table with mode gating.
//!
//! The mode is fixed when the registry is built: a `read_only` bridge never
//! sees `update_preferences` in its listing and cannot call it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CarbonError, Result};

use super::types::{Tool, ToolMode, ToolResult};

/// Registered tools plus the mode that decides which of them are callable.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    mode: ToolMode,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("mode", &self.mode)
            .finish()
    }
}

impl ToolRegistry {
    /// Empty registry operating in `mode`.
    pub fn new(mode: ToolMode) -> Self {
        Self {
            tools: BTreeMap::new(),
            mode,
        }
    }

    /// Add `tool` under its own name, replacing any previous entry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Mode the registry was built with.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    fn visible(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools
            .values()
            .filter(|tool| tool.allowed_in_mode(self.mode))
    }

    /// Tool named `name`, if registered and allowed in the current mode.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.visible().find(|tool| tool.name() == name).cloned()
    }

    /// Execute `name` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::Tool`] for unknown tools and for tools the
    /// current mode hides; otherwise whatever the tool returns.
    pub fn call(&self, name: &str, args: serde_json::Value) -> Result<ToolResult> {
        let Some(tool) = self.get(name) else {
            return Err(if self.tools.contains_key(name) {
                CarbonError::Tool(format!(
                    "tool {name} is not available in {:?} mode",
                    self.mode
                ))
            } else {
                CarbonError::Tool(format!("unknown tool: {name}"))
            });
        };
        tracing::debug!(tool = name, "executing tool");
        tool.execute(args)
    }

    /// Callable tool names in alphabetical order.
    pub fn list_available(&self) -> Vec<&str> {
        self.visible().map(|tool| tool.name()).collect()
    }

    /// `{name, description, parameters}` for every callable tool, by name.
    pub fn schemas_for_api(&self) -> Vec<serde_json::Value> {
        self.visible()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.schema(),
                })
            })
            .collect()
    }
}
