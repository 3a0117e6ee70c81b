use sea_orm::{ColumnTrait, Condition, EntityTrait, sea_query::Expr};

use rowscope_core::{FilterError, FilterPlan, PrivilegeValue, Privileged};

use crate::entity::PrivilegeScopedEntity;

/// Build a `SeaORM` `Condition` realizing a [`FilterPlan`].
///
/// # Plan Mapping
/// 1. **Unrestricted** → `None`; the base query passes through unchanged
/// 2. **Deny** → constant-false condition (`WHERE 1=0`)
/// 3. **Restrict** → `field_col IN (grants)` per descriptor, ANDed; an
///    empty grant set renders a condition that matches zero rows
///
/// The result only ever restricts the base query's row set; it never widens
/// it, and the base query itself is not touched here.
///
/// # Errors
/// Returns [`FilterError::UnmappedField`] if a descriptor references a
/// field the entity does not map to a column. This is a registration
/// mistake and must not be silently ignored in a filtering layer.
pub fn build_privilege_condition<E>(
    plan: &FilterPlan<'_, E::Model>,
) -> Result<Option<Condition>, FilterError>
where
    E: PrivilegeScopedEntity,
    E::Model: Privileged,
    E::Column: ColumnTrait + Copy,
{
    match plan {
        FilterPlan::Unrestricted => Ok(None),
        FilterPlan::Deny => Ok(Some(deny_all())),
        FilterPlan::Restrict(steps) => {
            let mut cond = Condition::all();
            for step in steps {
                let field = step.descriptor.field();
                let Some(col) = E::privilege_col(field) else {
                    return Err(FilterError::UnmappedField {
                        entity: <E::Model as Privileged>::KEY,
                        field,
                    });
                };
                cond = cond.add(Expr::col(col).is_in(grant_values(step.grants.iter())));
            }
            Ok(Some(cond))
        }
    }
}

/// Like [`build_privilege_condition`], but with table-qualified columns so
/// the condition can be conjoined onto a query that joins entity `J`.
///
/// # Errors
/// Same as [`build_privilege_condition`].
pub fn build_joined_privilege_condition<J>(
    plan: &FilterPlan<'_, J::Model>,
) -> Result<Option<Condition>, FilterError>
where
    J: PrivilegeScopedEntity,
    J::Model: Privileged,
    J::Column: ColumnTrait + Copy,
{
    match plan {
        FilterPlan::Unrestricted => Ok(None),
        FilterPlan::Deny => Ok(Some(deny_all())),
        FilterPlan::Restrict(steps) => {
            let mut cond = Condition::all();
            for step in steps {
                let field = step.descriptor.field();
                let Some(col) = J::privilege_col(field) else {
                    return Err(FilterError::UnmappedField {
                        entity: <J::Model as Privileged>::KEY,
                        field,
                    });
                };
                cond = cond.add(
                    Expr::col((J::default(), col)).is_in(grant_values(step.grants.iter())),
                );
            }
            Ok(Some(cond))
        }
    }
}

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

fn grant_values<'a>(values: impl Iterator<Item = &'a PrivilegeValue>) -> Vec<sea_orm::Value> {
    values.map(to_db_value).collect()
}

fn to_db_value(value: &PrivilegeValue) -> sea_orm::Value {
    match value {
        PrivilegeValue::String(s) => s.clone().into(),
        PrivilegeValue::I64(n) => (*n).into(),
        PrivilegeValue::Uuid(u) => (*u).into(),
        PrivilegeValue::Bool(b) => (*b).into(),
    }
}
