use std::marker::PhantomData;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use rowscope_core::{FilterError, PrincipalContext, Privileged, QueryFilterEngine};

use crate::cond::{build_joined_privilege_condition, build_privilege_condition};
use crate::entity::PrivilegeScopedEntity;
use crate::error::PrivilegeDbError;

/// Typestate marker: privilege filtering has not been applied yet.
/// Cannot execute queries in this state.
#[derive(Debug, Clone, Copy)]
pub struct Unfiltered;

/// Typestate marker: privilege filtering has been applied.
/// Can now execute queries safely.
#[derive(Debug, Clone, Copy)]
pub struct Filtered;

/// A type-safe wrapper around `SeaORM`'s `Select` that enforces privilege
/// filtering before execution.
///
/// # Type Parameters
/// - `E`: The `SeaORM` entity type
/// - `S`: The typestate ([`Unfiltered`] or [`Filtered`])
///
/// # Example
/// ```rust,ignore
/// let cities = city::Entity::find()
///     .privileged()                        // PrivilegedSelect<E, Unfiltered>
///     .filter_with(&engine, &principal)?   // PrivilegedSelect<E, Filtered>
///     .all(&conn)                          // now executable
///     .await?;
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct PrivilegedSelect<E: EntityTrait, S> {
    inner: sea_orm::Select<E>,
    _state: PhantomData<S>,
}

/// Extension trait to convert a regular `SeaORM` `Select` into a
/// [`PrivilegedSelect`].
pub trait PrivilegedEntityExt<E: EntityTrait>: Sized {
    /// Convert this select into an unfiltered privileged select.
    /// You must call `.filter_with()` before executing the query.
    fn privileged(self) -> PrivilegedSelect<E, Unfiltered>;
}

impl<E> PrivilegedEntityExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn privileged(self) -> PrivilegedSelect<E, Unfiltered> {
        PrivilegedSelect {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> PrivilegedSelect<E, Unfiltered>
where
    E: PrivilegeScopedEntity,
    E::Model: Privileged,
    E::Column: ColumnTrait + Copy,
{
    /// Apply the privilege plan for this entity and principal, transitioning
    /// to the [`Filtered`] state.
    ///
    /// The base select is consumed and a new composed query returned; the
    /// restriction is only ever additive.
    ///
    /// # Errors
    /// Returns [`FilterError::UnmappedField`] if a registered descriptor
    /// references a field this entity does not map.
    pub fn filter_with(
        self,
        engine: &QueryFilterEngine<'_>,
        principal: &PrincipalContext,
    ) -> Result<PrivilegedSelect<E, Filtered>, FilterError> {
        let plan = engine.plan::<E::Model>(principal);
        let inner = match build_privilege_condition::<E>(&plan)? {
            Some(cond) => self.inner.filter(cond),
            None => self.inner,
        };
        Ok(PrivilegedSelect {
            inner,
            _state: PhantomData,
        })
    }
}

impl<E> PrivilegedSelect<E, Filtered>
where
    E: EntityTrait,
{
    /// Execute the query and return all matching results.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError::Db`] if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>, PrivilegeDbError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.inner.all(conn).await?)
    }

    /// Execute the query and return at most one result.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError::Db`] if the database query fails.
    pub async fn one<C>(self, conn: &C) -> Result<Option<E::Model>, PrivilegeDbError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.inner.one(conn).await?)
    }

    /// Execute the query and return the number of matching results.
    ///
    /// # Errors
    /// Returns [`PrivilegeDbError::Db`] if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64, PrivilegeDbError>
    where
        C: ConnectionTrait + Send + Sync,
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        Ok(self.inner.count(conn).await?)
    }

    /// Add additional domain filters to the already-filtered query.
    /// The privilege conditions remain in place.
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    /// Add ordering to the filtered query.
    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }

    /// Add a limit to the filtered query.
    pub fn limit(mut self, limit: u64) -> Self {
        self.inner = QuerySelect::limit(self.inner, limit);
        self
    }

    /// Add an offset to the filtered query.
    pub fn offset(mut self, offset: u64) -> Self {
        self.inner = QuerySelect::offset(self.inner, offset);
        self
    }

    /// Conjoin the privilege plan of a joined entity `J`.
    ///
    /// Use this when the base query joins another privileged entity and
    /// both constraints must hold (logical AND).
    ///
    /// # Example
    /// ```rust,ignore
    /// let schools = school::Entity::find()
    ///     .inner_join(city::Entity)
    ///     .privileged()
    ///     .filter_with(&engine, &principal)?
    ///     .and_plan_for::<city::Entity>(&engine, &principal)?
    ///     .all(&conn)
    ///     .await?;
    /// ```
    ///
    /// # Errors
    /// Returns [`FilterError::UnmappedField`] if a descriptor of `J`
    /// references a field `J` does not map.
    pub fn and_plan_for<J>(
        mut self,
        engine: &QueryFilterEngine<'_>,
        principal: &PrincipalContext,
    ) -> Result<Self, FilterError>
    where
        J: PrivilegeScopedEntity,
        J::Model: Privileged,
        J::Column: ColumnTrait + Copy,
    {
        let plan = engine.plan::<J::Model>(principal);
        if let Some(cond) = build_joined_privilege_condition::<J>(&plan)? {
            self.inner = QueryFilter::filter(self.inner, cond);
        }
        Ok(self)
    }

    /// Unwrap the inner `SeaORM` `Select` for advanced use cases.
    ///
    /// The caller must not remove or bypass the privilege conditions that
    /// were applied during `.filter_with()`.
    #[must_use]
    pub fn into_inner(self) -> sea_orm::Select<E> {
        self.inner
    }
}
