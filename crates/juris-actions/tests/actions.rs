//! End-to-end action pipeline over an in-memory database.

use chrono::TimeDelta;
use juris_actions::{Actions, Caller, RequestContext};
use juris_config::GeneralConfig;
use juris_core::enums::MemberRole;
use juris_core::errors::{
    ActionError, ErrorKind, INTERNAL_ERROR_MESSAGE, OUTPUT_VALIDATION_MESSAGE,
};
use juris_core::responses::{ActionResult, EntityRef};
use juris_db::{JurisDb, JurisService};
use juris_schema::registry::names;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const CASE_NUMBER: &str = "0001234-56.2023.8.26.0100";

async fn actions() -> Actions {
    let db = JurisDb::open_local(":memory:").await.unwrap();
    Actions::new(JurisService::from_db(db, GeneralConfig::default()))
}

/// Provision an account for `user` and return a context carrying a fresh
/// session for it.
async fn login(actions: &Actions, user: &str) -> RequestContext {
    let svc = actions.service();
    svc.ensure_account(user, user, &format!("{user}@example.com"))
        .await
        .unwrap();
    let (token, _) = svc.create_session(user, TimeDelta::hours(1)).await.unwrap();
    RequestContext::new(Some(token))
}

fn id_of(result: ActionResult<EntityRef>) -> String {
    assert!(result.success, "action failed: {:?}", result.error);
    result.data.unwrap().id
}

async fn new_space(actions: &Actions, ctx: &RequestContext, name: &str) -> String {
    id_of(
        actions
            .create_space(ctx, &json!({ "name": name, "space_type": "FIRM" }))
            .await,
    )
}

async fn new_client(actions: &Actions, ctx: &RequestContext, space_id: &str, doc: &str) -> String {
    id_of(
        actions
            .create_client(
                ctx,
                &json!({
                    "space_id": space_id,
                    "name": "Acme Ltda",
                    "client_type": "company",
                    "document_number": doc,
                }),
            )
            .await,
    )
}

async fn new_process(actions: &Actions, ctx: &RequestContext, space_id: &str, client_id: &str) -> String {
    id_of(
        actions
            .create_process(
                ctx,
                &json!({
                    "space_id": space_id,
                    "client_id": client_id,
                    "case_number": CASE_NUMBER,
                    "title": "Acme v. Globex",
                }),
            )
            .await,
    )
}

async fn new_deadline(
    actions: &Actions,
    ctx: &RequestContext,
    space_id: &str,
    process_id: &str,
    priority: &str,
    status: &str,
) -> String {
    id_of(
        actions
            .create_deadline(
                ctx,
                &json!({
                    "space_id": space_id,
                    "process_id": process_id,
                    "title": "Reply",
                    "due_date": "2026-11-02",
                    "priority": priority,
                    "status": status,
                }),
            )
            .await,
    )
}

fn kind<T>(result: &ActionResult<T>) -> Option<ErrorKind> {
    result.error_kind()
}

#[tokio::test]
async fn anonymous_requests_are_rejected_before_any_lookup() {
    let actions = actions().await;
    let result = actions
        .list_clients(&RequestContext::anonymous(), &json!({ "space_id": "spc-a3f8b2c1" }))
        .await;
    assert!(!result.success);
    assert_eq!(kind(&result), Some(ErrorKind::Authentication));
    assert!(result.data.is_none());
}

#[tokio::test]
async fn unknown_session_token_is_unauthenticated() {
    let actions = actions().await;
    let ctx = RequestContext::new(Some("not-a-real-token".to_string()));
    let result = actions.get_current_account(&ctx, &Value::Null).await;
    assert_eq!(kind(&result), Some(ErrorKind::Authentication));
}

#[tokio::test]
async fn validation_runs_before_authentication() {
    let actions = actions().await;
    let result = actions
        .create_client(
            &RequestContext::anonymous(),
            &json!({ "space_id": "spc-a3f8b2c1", "client_type": "company" }),
        )
        .await;
    assert_eq!(kind(&result), Some(ErrorKind::Validation));
    let fields = result.error.unwrap().fields.unwrap();
    assert!(fields.contains("name"));
    assert!(fields.contains("document_number"));
}

#[tokio::test]
async fn current_account_is_resolved_from_the_session() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let account = actions
        .get_current_account(&ctx, &Value::Null)
        .await
        .into_result()
        .unwrap();
    assert_eq!(account.auth_user_id, "user_ana");

    let updated = actions
        .update_current_account(&ctx, &json!({ "name": "Ana Souza" }))
        .await;
    assert!(updated.success);
    assert_eq!(updated.message.as_deref(), Some("Account updated"));
}

#[tokio::test]
async fn acme_client_is_invisible_from_another_space() {
    let actions = actions().await;
    let ana = login(&actions, "user_ana").await;
    let bruno = login(&actions, "user_bruno").await;
    let ana_space = new_space(&actions, &ana, "Ana Advocacia").await;
    let bruno_space = new_space(&actions, &bruno, "Bruno Advocacia").await;
    let acme = new_client(&actions, &ana, &ana_space, "12.345.678/0001-95").await;

    // Bruno addressing Ana's space is refused outright.
    let denied = actions
        .get_client(&bruno, &json!({ "space_id": ana_space, "id": acme }))
        .await;
    assert_eq!(kind(&denied), Some(ErrorKind::Authorization));

    // Addressing Acme through Bruno's own space finds nothing.
    let hidden = actions
        .get_client(&bruno, &json!({ "space_id": bruno_space, "id": acme }))
        .await;
    assert_eq!(kind(&hidden), Some(ErrorKind::NotFound));

    let listing = actions
        .list_clients(&bruno, &json!({ "space_id": bruno_space, "search": "acme" }))
        .await
        .into_result()
        .unwrap();
    assert_eq!(listing.total, 0);

    let found = actions
        .get_client(&ana, &json!({ "space_id": ana_space, "id": acme }))
        .await
        .into_result()
        .unwrap();
    assert_eq!(found.document_number, "12345678000195");
}

#[tokio::test]
async fn missing_space_is_not_found_rather_than_forbidden() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let result = actions
        .list_processes(&ctx, &json!({ "space_id": "spc-deadbeef" }))
        .await;
    assert_eq!(kind(&result), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn open_high_filter_returns_matching_deadlines() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let client = new_client(&actions, &ctx, &space, "12345678000195").await;
    let process = new_process(&actions, &ctx, &space, &client).await;

    new_deadline(&actions, &ctx, &space, &process, "HIGH", "OPEN").await;
    new_deadline(&actions, &ctx, &space, &process, "high", "open").await;
    new_deadline(&actions, &ctx, &space, &process, "LOW", "OPEN").await;
    new_deadline(&actions, &ctx, &space, &process, "HIGH", "DONE").await;

    let page = actions
        .list_deadlines(
            &ctx,
            &json!({ "space_id": space, "status": "OPEN", "priority": "HIGH" }),
        )
        .await
        .into_result()
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn malformed_case_numbers_are_rejected() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;

    for case_number in ["0001234562023826010", "000123456202382601001"] {
        let result = actions
            .create_process(
                &ctx,
                &json!({ "space_id": space, "case_number": case_number, "title": "X" }),
            )
            .await;
        assert_eq!(kind(&result), Some(ErrorKind::Validation), "{case_number}");
        assert!(result.error.unwrap().fields.unwrap().contains("case_number"));
    }
}

#[tokio::test]
async fn deleting_twice_reports_not_found() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let client = new_client(&actions, &ctx, &space, "12345678000195").await;
    let input = json!({ "space_id": space, "id": client });

    let first = actions.delete_client(&ctx, &input).await;
    assert!(first.success);
    assert_eq!(first.message.as_deref(), Some("Client deleted"));

    let second = actions.delete_client(&ctx, &input).await;
    assert_eq!(kind(&second), Some(ErrorKind::NotFound));
    assert_eq!(kind(&actions.get_client(&ctx, &input).await), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn deleting_a_process_hides_its_deadlines() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let client = new_client(&actions, &ctx, &space, "12345678000195").await;
    let process = new_process(&actions, &ctx, &space, &client).await;
    new_deadline(&actions, &ctx, &space, &process, "HIGH", "OPEN").await;

    let deleted = actions
        .delete_process(&ctx, &json!({ "space_id": space, "id": process }))
        .await;
    assert!(deleted.success);

    let page = actions
        .list_deadlines(&ctx, &json!({ "space_id": space }))
        .await
        .into_result()
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn members_cannot_manage_the_space() {
    let actions = actions().await;
    let ana = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ana, "Ana Advocacia").await;

    let carla = login(&actions, "user_carla").await;
    let carla_account = actions
        .service()
        .find_account_by_auth_user("user_carla")
        .await
        .unwrap()
        .unwrap();
    actions
        .service()
        .add_member(&space, &carla_account.id, MemberRole::Member)
        .await
        .unwrap();

    // Members read and write the space's records...
    new_client(&actions, &carla, &space, "12345678000195").await;
    let members = actions
        .list_space_members(&carla, &json!({ "id": space }))
        .await
        .into_result()
        .unwrap();
    assert_eq!(members.len(), 2);

    // ...but not the space itself.
    let rename = actions
        .update_space(&carla, &json!({ "id": space, "name": "Carla Advocacia" }))
        .await;
    assert_eq!(kind(&rename), Some(ErrorKind::Authorization));
    let delete = actions.delete_space(&carla, &json!({ "id": space })).await;
    assert_eq!(kind(&delete), Some(ErrorKind::Authorization));

    let deleted = actions.delete_space(&ana, &json!({ "id": space })).await;
    assert!(deleted.success);
    let after = actions.get_space(&ana, &json!({ "id": space })).await;
    assert_eq!(kind(&after), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn document_numbers_are_unique_within_a_space() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let other = new_space(&actions, &ctx, "Ana Consultoria").await;
    new_client(&actions, &ctx, &space, "12345678000195").await;

    let duplicate = actions
        .create_client(
            &ctx,
            &json!({
                "space_id": space,
                "name": "Acme Copy",
                "client_type": "company",
                "document_number": "12.345.678/0001-95",
            }),
        )
        .await;
    assert_eq!(kind(&duplicate), Some(ErrorKind::Validation));

    // The same document is free in another space.
    new_client(&actions, &ctx, &other, "12345678000195").await;
}

#[tokio::test]
async fn changing_client_type_rechecks_the_document_length() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let client = new_client(&actions, &ctx, &space, "12345678000195").await;

    let result = actions
        .update_client(
            &ctx,
            &json!({ "space_id": space, "id": client, "client_type": "individual" }),
        )
        .await;
    assert_eq!(kind(&result), Some(ErrorKind::Validation));

    let result = actions
        .update_client(
            &ctx,
            &json!({
                "space_id": space,
                "id": client,
                "client_type": "individual",
                "document_number": "123.456.789-09",
            }),
        )
        .await;
    assert!(result.success, "{:?}", result.error);
}

#[tokio::test]
async fn deadline_status_transitions_are_enforced() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    let client = new_client(&actions, &ctx, &space, "12345678000195").await;
    let process = new_process(&actions, &ctx, &space, &client).await;
    let deadline = new_deadline(&actions, &ctx, &space, &process, "HIGH", "OPEN").await;
    let update = |status: &str| json!({ "space_id": space, "id": deadline, "status": status });

    assert!(actions.update_deadline(&ctx, &update("done")).await.success);
    let blocked = actions.update_deadline(&ctx, &update("canceled")).await;
    assert_eq!(kind(&blocked), Some(ErrorKind::Validation));
    assert!(blocked.error.unwrap().fields.unwrap().contains("status"));
    assert!(actions.update_deadline(&ctx, &update("open")).await.success);
    assert!(actions.update_deadline(&ctx, &update("canceled")).await.success);
}

#[tokio::test]
async fn references_must_stay_inside_the_space() {
    let actions = actions().await;
    let ana = login(&actions, "user_ana").await;
    let bruno = login(&actions, "user_bruno").await;
    let ana_space = new_space(&actions, &ana, "Ana Advocacia").await;
    let bruno_space = new_space(&actions, &bruno, "Bruno Advocacia").await;
    let acme = new_client(&actions, &ana, &ana_space, "12345678000195").await;
    let process = new_process(&actions, &ana, &ana_space, &acme).await;

    let foreign_client = actions
        .create_process(
            &bruno,
            &json!({
                "space_id": bruno_space,
                "client_id": acme,
                "case_number": CASE_NUMBER,
                "title": "Stolen",
            }),
        )
        .await;
    assert_eq!(kind(&foreign_client), Some(ErrorKind::Validation));

    let foreign_process = actions
        .create_deadline(
            &bruno,
            &json!({
                "space_id": bruno_space,
                "process_id": process,
                "title": "Stolen",
                "due_date": "2026-11-02",
            }),
        )
        .await;
    assert_eq!(kind(&foreign_process), Some(ErrorKind::Validation));
}

#[tokio::test]
async fn revoked_session_no_longer_authenticates() {
    let actions = actions().await;
    let svc = actions.service();
    svc.ensure_account("user_ana", "Ana", "ana@example.com")
        .await
        .unwrap();
    let (token, _) = svc
        .create_session("user_ana", TimeDelta::hours(1))
        .await
        .unwrap();
    assert!(svc.revoke_session(&token).await.unwrap());

    let ctx = RequestContext::new(Some(token));
    let result = actions.list_spaces(&ctx, &json!({})).await;
    assert_eq!(kind(&result), Some(ErrorKind::Authentication));
}

#[tokio::test]
async fn client_search_ignores_case_of_accented_names() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    id_of(
        actions
            .create_client(
                &ctx,
                &json!({
                    "space_id": space,
                    "name": "Álvaro Souza",
                    "client_type": "individual",
                    "document_number": "123.456.789-09",
                }),
            )
            .await,
    );

    for term in ["Álvaro", "álvaro", "ÁLVARO"] {
        let page = actions
            .list_clients(&ctx, &json!({ "space_id": space, "search": term }))
            .await
            .into_result()
            .unwrap();
        assert_eq!(page.total, 1, "term {term}");
        assert_eq!(page.items[0].name, "Álvaro Souza");
    }
}

#[tokio::test]
async fn output_not_matching_its_schema_is_an_internal_error() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;

    let result: ActionResult<EntityRef> = actions
        .run_action(&ctx, names::CLIENT, &Value::Null, |_: Caller, (): ()| async {
            Ok::<_, ActionError>(EntityRef::new("cli-a3f8b2c1"))
        })
        .await;

    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(kind(&result), Some(ErrorKind::Internal));
    assert_eq!(result.error.unwrap().message, OUTPUT_VALIDATION_MESSAGE);
}

#[tokio::test]
async fn storage_failures_surface_as_a_generic_internal_error() {
    let actions = actions().await;
    let ctx = login(&actions, "user_ana").await;
    let space = new_space(&actions, &ctx, "Ana Advocacia").await;
    actions
        .service()
        .db()
        .conn()
        .execute("DROP TABLE deadlines", ())
        .await
        .unwrap();

    let result = actions
        .list_deadlines(&ctx, &json!({ "space_id": space }))
        .await;

    assert_eq!(kind(&result), Some(ErrorKind::Internal));
    let error = result.error.unwrap();
    assert_eq!(error.message, INTERNAL_ERROR_MESSAGE);
    assert!(error.fields.is_none());
    assert!(!error.message.contains("deadlines"));
}

