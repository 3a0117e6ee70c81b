use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, Order};

use rowscope_core::{PrincipalContext, PrivilegeRegistry, QueryFilterEngine};
use rowscope_db::{ConnectionSelector, PrivilegeDbError, PrivilegedEntityExt};

use crate::entities::{city, major, school, student};

/// Repository for the directory domain.
///
/// Every read goes through a privileged select, so the caller cannot forget
/// to apply the principal's restrictions.
pub struct DirectoryRepository {
    conn: DatabaseConnection,
    registry: Arc<PrivilegeRegistry>,
    selector: Option<Arc<dyn ConnectionSelector>>,
}

impl DirectoryRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection, registry: Arc<PrivilegeRegistry>) -> Self {
        Self {
            conn,
            registry,
            selector: None,
        }
    }

    /// Configure the per-request connection selector.
    ///
    /// Without one, every query uses the default connection.
    #[must_use]
    pub fn with_connection_selector(mut self, selector: Arc<dyn ConnectionSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    fn engine(&self) -> QueryFilterEngine<'_> {
        QueryFilterEngine::new(self.registry.as_ref())
    }

    fn conn_for(&self, principal: &PrincipalContext) -> &DatabaseConnection {
        self.selector
            .as_deref()
            .and_then(|s| s.select(principal))
            .unwrap_or(&self.conn)
    }

    /// Cities the principal may see, ordered by name.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn list_cities(
        &self,
        principal: &PrincipalContext,
    ) -> Result<Vec<city::Model>, PrivilegeDbError> {
        city::Entity::find()
            .privileged()
            .filter_with(&self.engine(), principal)?
            .order_by(city::Column::Name, Order::Asc)
            .all(self.conn_for(principal))
            .await
    }

    /// Number of cities visible to the principal.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn count_cities(
        &self,
        principal: &PrincipalContext,
    ) -> Result<u64, PrivilegeDbError> {
        city::Entity::find()
            .privileged()
            .filter_with(&self.engine(), principal)?
            .count(self.conn_for(principal))
            .await
    }

    /// Schools the principal may see, ordered by name.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn list_schools(
        &self,
        principal: &PrincipalContext,
    ) -> Result<Vec<school::Model>, PrivilegeDbError> {
        school::Entity::find()
            .privileged()
            .filter_with(&self.engine(), principal)?
            .order_by(school::Column::SchoolName, Order::Asc)
            .all(self.conn_for(principal))
            .await
    }

    /// Schools restricted by both the school privilege and the privilege of
    /// the joined city (logical AND of the two constraints).
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn list_schools_in_granted_cities(
        &self,
        principal: &PrincipalContext,
    ) -> Result<Vec<school::Model>, PrivilegeDbError> {
        let engine = self.engine();
        school::Entity::find()
            .inner_join(city::Entity)
            .privileged()
            .filter_with(&engine, principal)?
            .and_plan_for::<city::Entity>(&engine, principal)?
            .order_by(school::Column::SchoolName, Order::Asc)
            .all(self.conn_for(principal))
            .await
    }

    /// Majors the principal may see, ordered by name.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn list_majors(
        &self,
        principal: &PrincipalContext,
    ) -> Result<Vec<major::Model>, PrivilegeDbError> {
        major::Entity::find()
            .privileged()
            .filter_with(&self.engine(), principal)?
            .order_by(major::Column::MajorName, Order::Asc)
            .all(self.conn_for(principal))
            .await
    }

    /// Students, ordered by name. No descriptor is registered for students,
    /// so this is the unrestricted path for every principal.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError`] on planning or query failure.
    pub async fn list_students(
        &self,
        principal: &PrincipalContext,
    ) -> Result<Vec<student::Model>, PrivilegeDbError> {
        student::Entity::find()
            .privileged()
            .filter_with(&self.engine(), principal)?
            .order_by(student::Column::Name, Order::Asc)
            .all(self.conn_for(principal))
            .await
    }
}
