//! # juris-schema
//!
//! Input validation and output schema registry for Juris.
//!
//! This crate provides:
//! - [`Fields`]: a coercing reader over raw JSON input that collects
//!   field-level errors instead of failing on the first one
//! - [`InputSchema`]: the trait every action input implements
//! - [`SchemaRegistry`]: JSON Schemas of every action output, used to check
//!   the shape of what the repositories actually returned
//!
//! ## Architecture
//!
//! Entity and response types are defined in `juris-core` with
//! `#[derive(JsonSchema)]`. Input types live next to the actions that use
//! them in `juris-actions` and implement [`InputSchema`] with [`Fields`].

pub mod error;
pub mod fields;
pub mod input;
pub mod registry;

pub use error::SchemaError;
pub use fields::{Fields, present};
pub use input::InputSchema;
pub use registry::SchemaRegistry;
