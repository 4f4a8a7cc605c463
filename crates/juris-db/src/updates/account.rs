//! Account update builder.

use serde::Serialize;

use super::{Assignments, set, set_nullable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
}

impl AccountUpdate {
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        set(&mut out, "name", self.name.clone());
        set(&mut out, "email", self.email.clone());
        set_nullable(&mut out, "phone", self.phone.clone());
        out
    }
}

pub struct AccountUpdateBuilder(AccountUpdate);

impl AccountUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AccountUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.0.phone = Some(phone);
        self
    }

    #[must_use]
    pub fn build(self) -> AccountUpdate {
        self.0
    }
}

impl Default for AccountUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
