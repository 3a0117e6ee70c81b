#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end filtering behavior against an in-memory `SQLite` database.

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use rowscope_core::{GrantSet, PrincipalContext};
use rowscope_db::ConnectionSelector;
use school_directory::entities::city;
use school_directory::seed::{SeedIds, init_schema, seed_demo_data};
use school_directory::{DirectoryRepository, data_privilege_settings};

async fn setup() -> (DirectoryRepository, SeedIds) {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    init_schema(&conn).await.expect("create schema");
    let ids = seed_demo_data(&conn).await.expect("seed demo rows");
    let registry = Arc::new(data_privilege_settings().expect("build registry"));
    (DirectoryRepository::new(conn, registry), ids)
}

fn unrestricted_admin() -> PrincipalContext {
    PrincipalContext::builder().account("admin").build()
}

fn beijing_user() -> PrincipalContext {
    PrincipalContext::builder()
        .account("beijing-user")
        .add_grant("city", "Beijing")
        .build()
}

#[tokio::test]
async fn no_descriptor_means_identity() {
    let (repo, _) = setup().await;

    // Students carry no privilege descriptor, so even a principal with an
    // unrelated grant sees every row.
    let students = repo.list_students(&beijing_user()).await.unwrap();
    assert_eq!(students.len(), 2);
}

#[tokio::test]
async fn no_grants_entry_means_full_access() {
    let (repo, _) = setup().await;

    let cities = repo.list_cities(&unrestricted_admin()).await.unwrap();
    assert_eq!(cities.len(), 2);
    let schools = repo.list_schools(&unrestricted_admin()).await.unwrap();
    assert_eq!(schools.len(), 2);
}

#[tokio::test]
async fn grant_restricts_to_matching_rows() {
    let (repo, ids) = setup().await;

    let cities = repo.list_cities(&beijing_user()).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id, ids.beijing);
    assert_eq!(cities[0].name, "Beijing");
}

#[tokio::test]
async fn empty_grant_set_matches_no_rows() {
    let (repo, _) = setup().await;

    // An explicit empty set is not the same as no entry: it denies all rows.
    let locked_out = PrincipalContext::builder()
        .account("locked-out")
        .grant_set("city", GrantSet::new())
        .build();

    let cities = repo.list_cities(&locked_out).await.unwrap();
    assert!(cities.is_empty());

    // The same principal keeps full access to types it has no entry for.
    let schools = repo.list_schools(&locked_out).await.unwrap();
    assert_eq!(schools.len(), 2);
}

#[tokio::test]
async fn anonymous_principal_is_denied_on_privileged_types() {
    let (repo, _) = setup().await;

    let anon = PrincipalContext::anonymous();
    assert!(repo.list_cities(&anon).await.unwrap().is_empty());
    assert!(repo.list_schools(&anon).await.unwrap().is_empty());

    // Types without descriptors stay visible even to anonymous callers.
    assert_eq!(repo.list_students(&anon).await.unwrap().len(), 2);
}

#[tokio::test]
async fn widening_grants_never_shrinks_results() {
    let (repo, _) = setup().await;

    let narrow = beijing_user();
    let wide = PrincipalContext::builder()
        .account("wide")
        .add_grant("city", "Beijing")
        .add_grant("city", "Shanghai")
        .build();

    let narrow_cities = repo.list_cities(&narrow).await.unwrap();
    let wide_cities = repo.list_cities(&wide).await.unwrap();
    assert!(narrow_cities.len() <= wide_cities.len());
    for city in &narrow_cities {
        assert!(wide_cities.iter().any(|c| c.id == city.id));
    }
}

#[tokio::test]
async fn joined_query_ands_both_plans() {
    let (repo, ids) = setup().await;

    // Grants on both the school and its joined city agree: the row survives.
    let aligned = PrincipalContext::builder()
        .account("aligned")
        .add_grant("school", "Beijing No.1 High School")
        .add_grant("city", "Beijing")
        .build();
    let schools = repo
        .list_schools_in_granted_cities(&aligned)
        .await
        .unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].id, ids.beijing_school);

    // The school grant alone would match, but the city grant points at the
    // other city, and both constraints must hold.
    let mismatched = PrincipalContext::builder()
        .account("mismatched")
        .add_grant("school", "Beijing No.1 High School")
        .add_grant("city", "Shanghai")
        .build();
    let schools = repo
        .list_schools_in_granted_cities(&mismatched)
        .await
        .unwrap();
    assert!(schools.is_empty());
}

#[tokio::test]
async fn filtering_is_idempotent_across_calls() {
    let (repo, _) = setup().await;

    let principal = beijing_user();
    let first = repo.list_cities(&principal).await.unwrap();
    let second = repo.list_cities(&principal).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn count_respects_the_same_restriction() {
    let (repo, _) = setup().await;

    assert_eq!(repo.count_cities(&unrestricted_admin()).await.unwrap(), 2);
    assert_eq!(repo.count_cities(&beijing_user()).await.unwrap(), 1);
    assert_eq!(
        repo.count_cities(&PrincipalContext::anonymous())
            .await
            .unwrap(),
        0
    );
}

/// Routes one tenant account to its own database.
struct TenantSelector {
    account: String,
    conn: DatabaseConnection,
}

impl ConnectionSelector for TenantSelector {
    fn select(&self, principal: &PrincipalContext) -> Option<&DatabaseConnection> {
        (principal.account() == Some(self.account.as_str())).then_some(&self.conn)
    }
}

#[tokio::test]
async fn connection_selector_routes_per_principal() {
    let (repo, _) = setup().await;

    // A second database holding one city the default database does not.
    let tenant_conn = Database::connect("sqlite::memory:")
        .await
        .expect("connect tenant sqlite");
    init_schema(&tenant_conn).await.expect("create tenant schema");
    city::Entity::insert(city::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Guangzhou".to_owned()),
    })
    .exec(&tenant_conn)
    .await
    .expect("insert tenant city");

    let repo = repo.with_connection_selector(Arc::new(TenantSelector {
        account: "tenant".to_owned(),
        conn: tenant_conn,
    }));

    // The selector claims this account, so its queries hit the tenant
    // database while privilege filtering still applies.
    let tenant = PrincipalContext::builder().account("tenant").build();
    let cities = repo.list_cities(&tenant).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].name, "Guangzhou");

    // Other principals fall back to the default connection.
    let cities = repo.list_cities(&unrestricted_admin()).await.unwrap();
    assert_eq!(cities.len(), 2);
    assert!(cities.iter().all(|c| c.name != "Guangzhou"));
}

#[tokio::test]
async fn majors_filter_independently_of_schools() {
    let (repo, ids) = setup().await;

    let cs_only = PrincipalContext::builder()
        .account("cs-only")
        .add_grant("major", "Computer Science")
        .build();

    let majors = repo.list_majors(&cs_only).await.unwrap();
    assert_eq!(majors.len(), 1);
    assert_eq!(majors[0].id, ids.cs_major);

    // No entry for schools, so those stay fully visible.
    assert_eq!(repo.list_schools(&cs_only).await.unwrap().len(), 2);
}
