//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use juris_core::entities::*;
use juris_core::enums::*;
use juris_core::errors::ActionError;
use juris_core::field_errors::FieldErrors;
use juris_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_client() -> Client {
    Client {
        id: "cli-a3f8b2c1".into(),
        space_id: "spc-00000001".into(),
        name: "Acme".into(),
        email: Some("a@b.com".into()),
        phone: None,
        client_type: ClientType::Company,
        status: ClientStatus::Active,
        document_number: "12345678000190".into(),
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

roundtrip_and_validate!(
    account_roundtrip,
    Account,
    Account {
        id: "acc-a3f8b2c1".into(),
        auth_user_id: "user_123".into(),
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: Some("+55 11 99999-0000".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
);

roundtrip_and_validate!(
    space_roundtrip,
    Space,
    Space {
        id: "spc-a3f8b2c1".into(),
        name: "Silva & Associados".into(),
        description: None,
        space_type: SpaceType::Firm,
        created_by: "acc-a3f8b2c1".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
);

roundtrip_and_validate!(
    member_roundtrip,
    SpaceMember,
    SpaceMember {
        id: "mbr-a3f8b2c1".into(),
        space_id: "spc-a3f8b2c1".into(),
        account_id: "acc-a3f8b2c1".into(),
        role: MemberRole::Owner,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(client_roundtrip, Client, sample_client());

roundtrip_and_validate!(
    process_roundtrip,
    Process,
    Process {
        id: "prc-a3f8b2c1".into(),
        space_id: "spc-00000001".into(),
        client_id: Some("cli-a3f8b2c1".into()),
        case_number: "00012345620238260100".into(),
        title: "Acme v. Globex".into(),
        status: ProcessStatus::Active,
        court: Some("TJSP".into()),
        court_division: Some("2a Vara Civel".into()),
        subject: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
);

roundtrip_and_validate!(
    deadline_roundtrip,
    Deadline,
    Deadline {
        id: "ddl-a3f8b2c1".into(),
        space_id: "spc-00000001".into(),
        process_id: "prc-a3f8b2c1".into(),
        title: "File appeal".into(),
        description: None,
        due_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        priority: DeadlinePriority::High,
        status: DeadlineStatus::Open,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
);

roundtrip_and_validate!(
    client_page_roundtrip,
    Page<Client>,
    Page {
        items: vec![sample_client()],
        total: 1,
        limit: 20,
        offset: 0,
    }
);

roundtrip_and_validate!(
    ok_result_roundtrip,
    ActionResult<EntityRef>,
    ActionResult::ok(EntityRef::new("cli-a3f8b2c1"))
);

roundtrip_and_validate!(
    failed_result_roundtrip,
    ActionResult<EntityRef>,
    ActionResult::fail(&ActionError::Validation(FieldErrors::single(
        "case_number",
        "must have exactly 20 digits"
    )))
);

#[test]
fn process_formats_case_number_for_display() {
    let process = Process {
        id: "prc-1".into(),
        space_id: "spc-1".into(),
        client_id: None,
        case_number: "00012345620238260100".into(),
        title: "t".into(),
        status: ProcessStatus::Active,
        court: None,
        court_division: None,
        subject: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    };
    assert_eq!(process.formatted_case_number(), "0001234-56.2023.8.26.0100");
}

#[test]
fn overdue_only_when_open_and_past_due() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let mut deadline = Deadline {
        id: "ddl-1".into(),
        space_id: "spc-1".into(),
        process_id: "prc-1".into(),
        title: "Reply".into(),
        description: None,
        due_date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
        priority: DeadlinePriority::Medium,
        status: DeadlineStatus::Open,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    };
    assert!(deadline.is_overdue(today));
    deadline.status = DeadlineStatus::Done;
    assert!(!deadline.is_overdue(today));
}
