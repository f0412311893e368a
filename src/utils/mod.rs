pub mod feature_flags;
pub mod paths;
pub mod phone;
pub mod redact;
pub mod response;
pub mod suggest;
pub mod tool_errors;
