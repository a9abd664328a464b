//! Tools domain module.
//!
//! Every tool is a thin adapter over the Canvas API client: it shapes its
//! typed parameters into a request descriptor, picks an endpoint, and
//! renders the normalized JSON outcome.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one file per Canvas entity
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Define params, execute(), and http_handler() in the matching
//!    `definitions/` file (or a new one)
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a route in `router.rs` using `with_route()`
//! 4. Register it in `registry.rs` for HTTP support
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
