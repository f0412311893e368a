pub mod credentials;
pub mod logger;
pub mod tool_executor;
pub mod transport;
pub mod validation;
