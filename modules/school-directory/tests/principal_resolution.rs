#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Full pipeline: credential resolution through [`CachingPrincipalSource`]
//! down to filtered directory queries.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::Database;

use rowscope_auth::{AuthError, CachingPrincipalSource, Credentials, PrincipalSource};
use rowscope_core::PrincipalContext;
use school_directory::seed::{init_schema, seed_demo_data};
use school_directory::{DirectoryRepository, data_privilege_settings};

/// Static account table standing in for a real user store.
struct DemoAccounts;

#[async_trait]
impl PrincipalSource for DemoAccounts {
    async fn resolve_principal(
        &self,
        credentials: &Credentials,
    ) -> Result<PrincipalContext, AuthError> {
        if credentials.secret != "000000" {
            return Err(AuthError::InvalidCredentials {
                account: credentials.account.clone(),
            });
        }
        match credentials.account.as_str() {
            "admin" => Ok(PrincipalContext::builder().account("admin").build()),
            "beijing-clerk" => Ok(PrincipalContext::builder()
                .account("beijing-clerk")
                .add_grant("city", "Beijing")
                .add_grant("school", "Beijing No.1 High School")
                .build()),
            other => Err(AuthError::PrincipalUnresolved {
                account: other.to_owned(),
            }),
        }
    }
}

async fn setup_repo() -> DirectoryRepository {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    init_schema(&conn).await.expect("create schema");
    seed_demo_data(&conn).await.expect("seed demo rows");
    let registry = Arc::new(data_privilege_settings().expect("build registry"));
    DirectoryRepository::new(conn, registry)
}

#[tokio::test]
async fn resolved_grants_drive_the_query_filter() {
    let repo = setup_repo().await;
    let source = CachingPrincipalSource::new(DemoAccounts);

    source
        .resolve_principal(&Credentials::new("beijing-clerk", "000000"))
        .await
        .unwrap();
    let clerk = source.principal_or_anonymous("beijing-clerk").await;

    let cities = repo.list_cities(&clerk).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].name, "Beijing");

    let schools = repo.list_schools_in_granted_cities(&clerk).await.unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].school_name, "Beijing No.1 High School");
}

#[tokio::test]
async fn admin_without_grant_entries_sees_everything() {
    let repo = setup_repo().await;
    let source = CachingPrincipalSource::new(DemoAccounts);

    source
        .resolve_principal(&Credentials::new("admin", "000000"))
        .await
        .unwrap();
    let admin = source.principal_or_anonymous("admin").await;

    assert_eq!(repo.list_cities(&admin).await.unwrap().len(), 2);
    assert_eq!(repo.list_schools(&admin).await.unwrap().len(), 2);
    assert_eq!(repo.list_majors(&admin).await.unwrap().len(), 2);
}

#[tokio::test]
async fn unresolved_account_falls_back_to_deny() {
    let repo = setup_repo().await;
    let source = CachingPrincipalSource::new(DemoAccounts);

    // Never logged in and no reload store: the safe fallback is the
    // anonymous context, which denies all privileged types.
    let ghost = source.principal_or_anonymous("ghost").await;
    assert!(!ghost.is_authenticated());

    assert!(repo.list_cities(&ghost).await.unwrap().is_empty());
    assert!(repo.list_majors(&ghost).await.unwrap().is_empty());

    // Unprivileged types remain readable even then.
    assert_eq!(repo.list_students(&ghost).await.unwrap().len(), 2);
}
