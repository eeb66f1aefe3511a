use std::collections::HashMap;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

/// Central registry for managing a collection of tools.
///
/// Stores tools by name in a HashMap and provides registration, listing,
/// and calling functionality. Registration happens once at startup; after
/// that the registry is shared read-only (e.g. behind an `Arc`).
///
/// # Examples
///
/// ```no_run
/// use teleport::tools::{Tool, ToolRegistry};
/// use teleport::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
/// # use async_trait::async_trait;
/// # struct MockTool;
/// # #[async_trait] impl Tool for MockTool {
/// #     fn name(&self) -> &str { "mock" }
/// #     fn spec(&self) -> ToolSpec { todo!() }
/// #     async fn call(&self, _: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> { todo!() }
/// # }
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(MockTool));
/// let specs = registry.list();
/// assert_eq!(specs.len(), 1);
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Lists all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|tool| tool.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Calls a tool by name with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolSourceError::NotFound`] if the name is not registered.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
