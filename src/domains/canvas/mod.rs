//! Canvas API domain.
//!
//! This module translates logical request descriptors into authenticated
//! HTTPS calls against the Canvas LMS REST API and normalizes the results
//! into JSON values the tool layer can render.
//!
//! The client is stateless: it holds only immutable credentials and a
//! pooled HTTP client, so any number of tool invocations may share it
//! concurrently.

mod client;
mod error;
mod request;

pub use client::{CanvasClient, Credentials};
pub use error::CanvasError;
pub use request::{Method, Query, QueryValue};
