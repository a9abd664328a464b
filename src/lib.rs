//! Canvas LMS MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing
//! Canvas LMS operations as tools, from the student perspective.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server, and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **canvas**: the API client translating request descriptors into
//!     authenticated HTTP calls and normalized JSON outcomes
//!   - **tools**: MCP tool definitions, thin adapters over the client
//!
//! # Example
//!
//! ```rust,no_run
//! use canvas_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
