//! Repository modules.
//!
//! Tenant-owned entities (spaces, clients, processes, deadlines) implement
//! [`ScopedRepository`](crate::ScopedRepository) on a handle borrowed from
//! `JurisService`. Accounts, memberships and sessions add methods to
//! `JurisService` via `impl JurisService` blocks.

pub mod account;
pub mod client;
pub mod deadline;
pub mod member;
pub mod process;
pub mod session;
pub mod space;
