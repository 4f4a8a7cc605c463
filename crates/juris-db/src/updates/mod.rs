//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some` fields
//! generate SET clauses in the dynamic UPDATE SQL. Nullable columns use
//! `Option<Option<T>>`: `Some(None)` clears the column.

pub mod account;
pub mod client;
pub mod deadline;
pub mod process;
pub mod space;

use libsql::Value;

/// Column assignments produced by an update struct.
pub type Assignments = Vec<(&'static str, Value)>;

/// Push `column = value` when the field was set.
pub(crate) fn set<V: Into<Value>>(out: &mut Assignments, column: &'static str, field: Option<V>) {
    if let Some(value) = field {
        out.push((column, value.into()));
    }
}

/// Push `column = value | NULL` when a nullable field was set.
pub(crate) fn set_nullable<V: Into<Value>>(
    out: &mut Assignments,
    column: &'static str,
    field: Option<Option<V>>,
) {
    if let Some(value) = field {
        out.push((column, value.map_or(Value::Null, Into::into)));
    }
}
