use juris_core::enums::{ClientStatus, ClientType};
use juris_core::field_errors::FieldErrors;
use juris_core::ids::PREFIX_SPACE;
use juris_db::repos::client::{ClientFilter, NewClient};
use juris_db::updates::client::ClientUpdate;
use juris_schema::fields::digits_only;
use juris_schema::{Fields, InputSchema, present};
use serde_json::Value;

use super::Paging;
use crate::orchestrator::SpaceScoped;

/// Strip formatting from a document number; at least one digit must remain.
fn document_digits(raw: &str) -> Result<String, String> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        Err("must contain digits".to_string())
    } else {
        Ok(digits)
    }
}

/// Check a digits-only document number against the length its client type
/// requires.
pub(crate) fn check_document(client_type: ClientType, digits: &str) -> Result<(), String> {
    let expected = client_type.document_digits();
    if digits.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "must have {expected} digits for {client_type} clients, got {}",
            digits.len()
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientInput {
    pub space_id: String,
    pub new: NewClient,
}

impl InputSchema for CreateClientInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let name = f.required_string("name");
        let email = f.optional_email("email");
        let phone = f.optional_string("phone");
        let client_type = f.required_enum::<ClientType>("client_type");
        let status = f.optional_enum("status").unwrap_or(ClientStatus::Active);
        let document_number = f.required_with("document_number", document_digits);
        let notes = f.optional_text("notes");
        if let (Some(client_type), Some(digits)) = (client_type, document_number.as_deref())
            && let Err(message) = check_document(client_type, digits)
        {
            f.error("document_number", message);
        }
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            new: NewClient {
                name: present(name, "name")?,
                email,
                phone,
                client_type: present(client_type, "client_type")?,
                status,
                document_number: present(document_number, "document_number")?,
                notes,
            },
        })
    }
}

impl SpaceScoped for CreateClientInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListClientsInput {
    pub space_id: String,
    pub paging: Paging,
    pub filter: ClientFilter,
}

impl InputSchema for ListClientsInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let paging = Paging::read(&mut f);
        let status = f.optional_enum("status");
        let client_type = f.optional_enum("client_type");
        f.finish()?;
        Ok(Self {
            space_id: present(space_id, "space_id")?,
            paging,
            filter: ClientFilter {
                status,
                client_type,
            },
        })
    }
}

impl SpaceScoped for ListClientsInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

/// Partial client update. A new document number is checked against the
/// client's effective type by the action, which knows the stored type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClientInput {
    pub space_id: String,
    pub id: String,
    pub patch: ClientUpdate,
}

impl InputSchema for UpdateClientInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let id = f.required_string("id");
        let name = f.optional_string("name");
        let email = f.nullable_email("email");
        let phone = f.nullable_string("phone");
        let client_type = f.optional_enum("client_type");
        let status = f.optional_enum("status");
        let document_number = f.optional_with("document_number", document_digits);
        let notes = f.nullable_text("notes");
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            id: present(id, "id")?,
            patch: ClientUpdate {
                name,
                email,
                phone,
                client_type,
                status,
                document_number,
                notes,
            },
        })
    }
}

impl SpaceScoped for UpdateClientInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}
