use juris_core::field_errors::FieldErrors;
use juris_db::updates::account::AccountUpdate;
use juris_schema::{Fields, InputSchema};
use serde_json::Value;

/// Patch of the caller's own account. `phone: null` clears the phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAccountInput {
    pub patch: AccountUpdate,
}

impl InputSchema for UpdateAccountInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let name = f.optional_string("name");
        let email = f.optional_email("email");
        let phone = f.nullable_string("phone");
        f.finish()?;
        Ok(Self {
            patch: AccountUpdate { name, email, phone },
        })
    }
}
