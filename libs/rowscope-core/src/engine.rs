use tracing::debug;

use crate::descriptor::{PrivilegeDescriptor, Privileged};
use crate::error::FilterError;
use crate::grants::GrantSet;
use crate::principal::PrincipalContext;
use crate::registry::PrivilegeRegistry;

/// Plans and evaluates privilege restrictions for one request.
///
/// Planning is a pure, non-blocking composition step: it never mutates the
/// base query and only ever restricts the result set, never widens it.
/// Execution against a backend is the storage layer's concern.
pub struct QueryFilterEngine<'r> {
    registry: &'r PrivilegeRegistry,
}

impl<'r> QueryFilterEngine<'r> {
    #[must_use]
    pub fn new(registry: &'r PrivilegeRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &'r PrivilegeRegistry {
        self.registry
    }

    /// Decide how rows of `M` must be restricted for `principal`.
    ///
    /// - no descriptors registered for `M` → [`FilterPlan::Unrestricted`]
    /// - unauthenticated principal while descriptors exist → [`FilterPlan::Deny`]
    /// - no grants entry for `M` → [`FilterPlan::Unrestricted`]
    /// - otherwise one AND step per descriptor; an empty grant set yields
    ///   steps that match zero rows, which is not an error
    #[must_use]
    pub fn plan<'a, M: Privileged>(&'a self, principal: &'a PrincipalContext) -> FilterPlan<'a, M> {
        let descriptors = self.registry.descriptors_for::<M>();
        if descriptors.is_empty() {
            return FilterPlan::Unrestricted;
        }

        if !principal.is_authenticated() {
            debug!(entity = M::KEY, "unauthenticated principal, denying");
            return FilterPlan::Deny;
        }

        match principal.grants_for(M::KEY) {
            None => FilterPlan::Unrestricted,
            Some(grants) => {
                debug!(
                    entity = M::KEY,
                    descriptors = descriptors.len(),
                    grants = grants.len(),
                    "restricting query"
                );
                FilterPlan::Restrict(
                    descriptors
                        .iter()
                        .map(|descriptor| PlanStep { descriptor, grants })
                        .collect(),
                )
            }
        }
    }

    /// Check a single already-loaded row against the principal's grants.
    ///
    /// # Errors
    /// Propagates [`FilterError::Evaluation`] if a selector fails.
    pub fn check_row<M: Privileged>(
        &self,
        row: &M,
        principal: &PrincipalContext,
    ) -> Result<bool, FilterError> {
        self.plan::<M>(principal).matches(row)
    }

    /// Filter an in-memory sequence of rows.
    ///
    /// # Errors
    /// Propagates [`FilterError::Evaluation`] if a selector fails for any
    /// row; no partial result is returned in that case.
    pub fn filter_rows<M: Privileged>(
        &self,
        rows: impl IntoIterator<Item = M>,
        principal: &PrincipalContext,
    ) -> Result<Vec<M>, FilterError> {
        let plan = self.plan::<M>(principal);
        let mut kept = Vec::new();
        for row in rows {
            if plan.matches(&row)? {
                kept.push(row);
            }
        }
        Ok(kept)
    }
}

/// The restriction decided for one entity type and principal.
///
/// Borrowed from the registry and the principal; owned by the calling
/// request and never cached across requests.
pub enum FilterPlan<'a, M> {
    /// Base query passes through unchanged (full access).
    Unrestricted,
    /// No rows may be returned.
    Deny,
    /// Conjoined `selector(row) ∈ grants` steps, one per descriptor.
    Restrict(Vec<PlanStep<'a, M>>),
}

/// One conjunct of a [`FilterPlan::Restrict`].
pub struct PlanStep<'a, M> {
    pub descriptor: &'a PrivilegeDescriptor<M>,
    pub grants: &'a GrantSet,
}

impl<M> FilterPlan<'_, M> {
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, FilterPlan::Unrestricted)
    }

    #[must_use]
    pub fn is_deny(&self) -> bool {
        matches!(self, FilterPlan::Deny)
    }
}

impl<M: Privileged> FilterPlan<'_, M> {
    /// Evaluate the plan against one row.
    ///
    /// # Errors
    /// Propagates [`FilterError::Evaluation`] if a selector fails.
    pub fn matches(&self, row: &M) -> Result<bool, FilterError> {
        match self {
            FilterPlan::Unrestricted => Ok(true),
            FilterPlan::Deny => Ok(false),
            FilterPlan::Restrict(steps) => {
                for step in steps {
                    if !step.descriptor.matches(row, step.grants)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}
