//! # juris-core
//!
//! Core types shared across all Juris crates.
//!
//! This crate provides the foundational types of the legal-practice domain:
//! - Entity structs for accounts, spaces, clients, processes, and deadlines
//! - Status/type enums with their SQL string forms
//! - ID prefix constants
//! - The 20-digit case number type
//! - The action error taxonomy and the uniform `ActionResult` envelope
//! - Paging and insert response shapes

pub mod case_number;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod field_errors;
pub mod identity;
pub mod ids;
pub mod responses;
