//! Action entry points, one module per entity.
//!
//! Every action takes the request context and a raw JSON input and returns
//! an `ActionResult`; none of them panics or returns a bare error.

pub mod account;
pub mod client;
pub mod deadline;
pub mod process;
pub mod space;
