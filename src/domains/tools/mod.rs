//! Tools domain module.
//!
//! Tools are named, schema-described functions that clients invoke through
//! the execute endpoint.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one module per tool)
//! - `registry.rs` - Static tool registry and dispatch by name
//! - `handlers.rs` - Shared request, descriptor and result types
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new module in `definitions/` with `NAME`, `descriptor()` and
//!    `execute()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `RegisteredTool` entry in `ToolRegistry::new`

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::ToolError;
pub use handlers::*;
pub use registry::{RegisteredTool, ToolRegistry};
