//! Core library for processon-mcp
//!
//! This crate implements the **Functional Core** of the processon-mcp application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`processon_core`** (this crate): Pure transformation functions with zero I/O
//! - **`processon-mcp`**: HTTP submission, MCP listeners and CLI (the Imperative Shell)
//!
//! All functions in this crate are deterministic for a given identifier
//! generator. Randomness only enters through [`outline::IdGenerator`], so tests
//! can swap in [`outline::SequentialIds`] and compare whole trees.
//!
//! # Module Organization
//!
//! - [`outline`]: Markdown outline to node forest
//! - [`document`]: Forest to ProcessOn mind-map document payload and wire text
//! - [`request`]: Create-endpoint URL and request body
//! - [`response`]: Interpretation of the document-creation endpoint response
//! - [`error`]: Error type shared by the modules above
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use processon_core::document::{encode, DefEncoding};
//! use processon_core::outline::SequentialIds;
//!
//! let def = encode("# Plan\n## Goals\n- ship", DefEncoding::Json, &mut SequentialIds::default())?;
//! assert!(def.contains("\"title\": \"Plan\""));
//! ```

pub mod document;
pub mod error;
pub mod outline;
pub mod request;
pub mod response;

pub use error::MindMapError;
