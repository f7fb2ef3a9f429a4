//! API layer - HTTP entry point and tool dispatch.

pub mod error_sanitizer;
pub mod http;
pub mod tools;

pub use tools::ToolDispatcher;
