mod classified;
mod mcp_error;
mod tool_error;

pub use classified::{ClassifiedError, ErrorCategory};
pub use mcp_error::{ErrorCode, McpError};
pub use tool_error::{ToolError, ToolErrorKind};
