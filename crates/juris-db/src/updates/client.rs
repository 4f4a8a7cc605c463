//! Client update builder.

use juris_core::enums::{ClientStatus, ClientType};
use serde::Serialize;

use super::{Assignments, set, set_nullable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_type: Option<ClientType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl ClientUpdate {
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        set(&mut out, "name", self.name.clone());
        set_nullable(&mut out, "email", self.email.clone());
        set_nullable(&mut out, "phone", self.phone.clone());
        set(&mut out, "client_type", self.client_type.map(ClientType::as_str));
        set(&mut out, "status", self.status.map(ClientStatus::as_str));
        set(&mut out, "document_number", self.document_number.clone());
        set_nullable(&mut out, "notes", self.notes.clone());
        out
    }
}

pub struct ClientUpdateBuilder(ClientUpdate);

impl ClientUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ClientUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.0.email = Some(email);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.0.phone = Some(phone);
        self
    }

    #[must_use]
    pub const fn client_type(mut self, client_type: ClientType) -> Self {
        self.0.client_type = Some(client_type);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: ClientStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn document_number(mut self, document_number: impl Into<String>) -> Self {
        self.0.document_number = Some(document_number.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> ClientUpdate {
        self.0
    }
}

impl Default for ClientUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_fields_are_assigned() {
        let update = ClientUpdateBuilder::new()
            .name("Acme Ltda")
            .email(None)
            .build();
        let columns: Vec<&str> = update.assignments().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, ["name", "email"]);
        assert!(matches!(update.assignments()[1].1, libsql::Value::Null));
    }

    #[test]
    fn empty_update_has_no_assignments() {
        assert!(ClientUpdate::default().assignments().is_empty());
    }
}
