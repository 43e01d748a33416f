//! Shared types for working with Ravello application designs.
//!
//! [`document`] models the loosely-typed JSON documents the Ravello REST API
//! exchanges; [`luid`] regenerates the locally-unique identifiers that link
//! parts of a design together.

pub mod document;
pub mod luid;

pub use document::{Document, DocumentError, Value};
pub use luid::{LuidAllocator, LuidMap, collect_luids, regenerate_luids};
