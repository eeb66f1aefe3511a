mod registry;
pub mod schema;
mod teleport_tool;
mod r#trait;

pub use r#trait::Tool;
pub use registry::ToolRegistry;
pub use teleport_tool::{register_teleport_tools, TeleportTool};
