use juris_core::case_number::CaseNumber;
use juris_core::enums::ProcessStatus;
use juris_core::field_errors::FieldErrors;
use juris_core::ids::{PREFIX_CLIENT, PREFIX_SPACE};
use juris_db::repos::process::{NewProcess, ProcessFilter};
use juris_db::updates::process::ProcessUpdate;
use juris_schema::{Fields, InputSchema, present};
use serde_json::Value;

use super::Paging;
use crate::orchestrator::SpaceScoped;

/// Accept bare digits or the display form; keep the digits.
fn case_number(raw: &str) -> Result<String, String> {
    CaseNumber::parse(raw)
        .map(CaseNumber::into_digits)
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProcessInput {
    pub space_id: String,
    pub new: NewProcess,
}

impl InputSchema for CreateProcessInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let client_id = f.optional_id("client_id", PREFIX_CLIENT);
        let case_number = f.required_with("case_number", case_number);
        let title = f.required_string("title");
        let status = f.optional_enum("status").unwrap_or(ProcessStatus::Active);
        let court = f.optional_string("court");
        let court_division = f.optional_string("court_division");
        let subject = f.optional_text("subject");
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            new: NewProcess {
                client_id,
                case_number: present(case_number, "case_number")?,
                title: present(title, "title")?,
                status,
                court,
                court_division,
                subject,
            },
        })
    }
}

impl SpaceScoped for CreateProcessInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProcessesInput {
    pub space_id: String,
    pub paging: Paging,
    pub filter: ProcessFilter,
}

impl InputSchema for ListProcessesInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let paging = Paging::read(&mut f);
        let status = f.optional_enum("status");
        let client_id = f.optional_id("client_id", PREFIX_CLIENT);
        f.finish()?;
        Ok(Self {
            space_id: present(space_id, "space_id")?,
            paging,
            filter: ProcessFilter { status, client_id },
        })
    }
}

impl SpaceScoped for ListProcessesInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProcessInput {
    pub space_id: String,
    pub id: String,
    pub patch: ProcessUpdate,
}

impl InputSchema for UpdateProcessInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let id = f.required_string("id");
        let client_id = f.nullable_id("client_id", PREFIX_CLIENT);
        let case_number = f.optional_with("case_number", case_number);
        let title = f.optional_string("title");
        let status = f.optional_enum("status");
        let court = f.nullable_string("court");
        let court_division = f.nullable_string("court_division");
        let subject = f.nullable_text("subject");
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            id: present(id, "id")?,
            patch: ProcessUpdate {
                client_id,
                case_number,
                title,
                status,
                court,
                court_division,
                subject,
            },
        })
    }
}

impl SpaceScoped for UpdateProcessInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn raw(case_number: &str) -> Value {
        json!({
            "space_id": "spc-00000001",
            "case_number": case_number,
            "title": "Acme v. Globex",
        })
    }

    #[rstest]
    #[case("0001234-56.2023.8.26.0100")]
    #[case("00012345620238260100")]
    #[case(" 0001234 56 2023 8 26 0100 ")]
    fn accepts_formatted_and_bare_case_numbers(#[case] input: &str) {
        let parsed = CreateProcessInput::parse(&raw(input)).unwrap();
        assert_eq!(parsed.new.case_number, "00012345620238260100");
    }

    #[rstest]
    #[case("0001234562023826010")]
    #[case("000123456202382601001")]
    #[case("0001234-56.2023.8.26.01AB")]
    fn rejects_case_numbers_without_exactly_twenty_digits(#[case] input: &str) {
        let errors = CreateProcessInput::parse(&raw(input)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("case_number"));
    }

    #[test]
    fn client_id_must_be_a_client_reference() {
        let mut input = raw("00012345620238260100");
        input["client_id"] = json!("prc-00000001");
        let errors = CreateProcessInput::parse(&input).unwrap_err();
        assert!(errors.contains("client_id"));
    }

    #[test]
    fn update_can_unlink_client() {
        let input = UpdateProcessInput::parse(&json!({
            "space_id": "spc-00000001",
            "id": "prc-00000001",
            "client_id": null,
        }))
        .unwrap();
        assert_eq!(input.patch.client_id, Some(None));
        assert_eq!(input.patch.case_number, None);
    }
}
