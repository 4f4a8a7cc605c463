//! # juris-actions
//!
//! The validated tenant action layer of Juris.
//!
//! [`Actions`] owns the storage service and the output schema registry.
//! Each entry point (`create_client`, `list_deadlines`, ...) runs the same
//! pipeline through [`Actions::run_action`] or
//! [`Actions::run_space_action`]: parse the raw input, authenticate the
//! session carried by the [`RequestContext`], resolve the caller's account
//! and space membership, run the handler against tenant-scoped
//! repositories, and validate the result against its registered schema.
//!
//! ```no_run
//! # async fn demo(actions: juris_actions::Actions, token: String) {
//! use juris_actions::RequestContext;
//! use serde_json::json;
//!
//! let ctx = RequestContext::new(Some(token));
//! let result = actions
//!     .list_deadlines(&ctx, &json!({ "space_id": "spc-a3f8b2c1", "status": "OPEN" }))
//!     .await;
//! assert!(result.success);
//! # }
//! ```

pub mod actions;
pub mod context;
pub mod inputs;
pub mod orchestrator;

pub use context::{RequestCache, RequestContext};
pub use orchestrator::{Actions, Caller, SpaceScope, SpaceScoped};
