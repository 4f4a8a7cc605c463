//! Entity structs for all Juris domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `juris-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON output and output-shape validation.
//!
//! Every tenant-owned entity carries its `space_id` and a nullable
//! `deleted_at`. Soft-deleted rows never leave the repository layer, so
//! `deleted_at` is always `None` on values returned from a default query.

mod account;
mod client;
mod deadline;
mod process;
mod space;

pub use account::Account;
pub use client::Client;
pub use deadline::Deadline;
pub use process::Process;
pub use space::{Space, SpaceMember};
