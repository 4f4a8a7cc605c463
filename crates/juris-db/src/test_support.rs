pub(crate) mod helpers {
    use juris_config::GeneralConfig;

    use crate::repos::space::NewSpace;
    use crate::{JurisDb, JurisService, ScopedRepository};
    use juris_core::enums::SpaceType;

    pub(crate) async fn test_service() -> JurisService {
        let db = JurisDb::open_local(":memory:").await.unwrap();
        JurisService::from_db(db, GeneralConfig::default())
    }

    /// Create (or fetch) the account for `auth_user_id`, returning its ID.
    pub(crate) async fn seed_account(svc: &JurisService, auth_user_id: &str) -> String {
        svc.ensure_account(auth_user_id, "Test User", &format!("{auth_user_id}@example.com"))
            .await
            .unwrap()
            .id
    }

    /// Create a firm space owned by `auth_user_id`'s account, returning its ID.
    pub(crate) async fn seed_space(svc: &JurisService, auth_user_id: &str) -> String {
        let account = seed_account(svc, auth_user_id).await;
        svc.spaces()
            .insert(
                &account,
                NewSpace {
                    name: format!("Space of {auth_user_id}"),
                    description: None,
                    space_type: SpaceType::Firm,
                },
            )
            .await
            .unwrap()
            .id
    }
}
