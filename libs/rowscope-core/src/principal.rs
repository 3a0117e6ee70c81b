use std::collections::HashMap;

use uuid::Uuid;

use crate::grants::GrantSet;

/// `PrincipalContext` holds the authenticated principal's granted privilege
/// values per entity type for the duration of one request.
///
/// Constructed by the authentication collaborator after verifying
/// credentials and immutable from then on, so filtering stays consistent
/// within a request. Serializable so a session cache can hold it.
///
/// The grants map distinguishes two cases on purpose:
/// - no entry for an entity type → no restriction (full access)
/// - an entry with an empty [`GrantSet`] → no matching rows
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PrincipalContext {
    principal_id: Uuid,
    account: Option<String>,
    authenticated: bool,
    grants: HashMap<String, GrantSet>,
}

impl PrincipalContext {
    /// Create a new `PrincipalContext` builder for an authenticated principal.
    #[must_use]
    pub fn builder() -> PrincipalContextBuilder {
        PrincipalContextBuilder::default()
    }

    /// Create an unauthenticated context.
    ///
    /// The filter engine plans a deny for every entity type that carries
    /// descriptors when given this context; entity types without descriptors
    /// stay unrestricted.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            principal_id: Uuid::nil(),
            account: None,
            authenticated: false,
            grants: HashMap::new(),
        }
    }

    #[must_use]
    pub fn principal_id(&self) -> Uuid {
        self.principal_id
    }

    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Granted values for the entity type identified by `key`.
    ///
    /// `None` means no restriction is configured for that type; an empty
    /// set means the principal may see no rows of that type.
    #[must_use]
    pub fn grants_for(&self, key: &str) -> Option<&GrantSet> {
        self.grants.get(key)
    }
}

#[derive(Default)]
pub struct PrincipalContextBuilder {
    principal_id: Option<Uuid>,
    account: Option<String>,
    grants: HashMap<String, GrantSet>,
}

impl PrincipalContextBuilder {
    #[must_use]
    pub fn principal_id(mut self, principal_id: Uuid) -> Self {
        self.principal_id = Some(principal_id);
        self
    }

    #[must_use]
    pub fn account(mut self, account: &str) -> Self {
        self.account = Some(account.to_owned());
        self
    }

    /// Set the full grant set for an entity type, replacing any previous one.
    #[must_use]
    pub fn grant_set(mut self, key: &str, grants: GrantSet) -> Self {
        self.grants.insert(key.to_owned(), grants);
        self
    }

    /// Add a single granted value for an entity type.
    ///
    /// Creates the entry if missing, so `add_grant` alone never yields the
    /// "no restriction" case.
    #[must_use]
    pub fn add_grant(mut self, key: &str, value: impl Into<crate::value::PrivilegeValue>) -> Self {
        self.grants.entry(key.to_owned()).or_default().insert(value);
        self
    }

    #[must_use]
    pub fn build(self) -> PrincipalContext {
        PrincipalContext {
            principal_id: self.principal_id.unwrap_or_default(),
            account: self.account,
            authenticated: true,
            grants: self.grants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PrivilegeValue;

    #[test]
    fn builder_full() {
        let id = Uuid::new_v4();
        let ctx = PrincipalContext::builder()
            .principal_id(id)
            .account("admin")
            .add_grant("city", "Beijing")
            .add_grant("city", "Shanghai")
            .grant_set("school", GrantSet::new())
            .build();

        assert_eq!(ctx.principal_id(), id);
        assert_eq!(ctx.account(), Some("admin"));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.grants_for("city").map(GrantSet::len), Some(2));
    }

    #[test]
    fn no_entry_differs_from_empty_entry() {
        let ctx = PrincipalContext::builder()
            .grant_set("city", GrantSet::new())
            .build();

        // explicit empty set: present, matches zero rows
        assert!(ctx.grants_for("city").is_some_and(GrantSet::is_empty));
        // no entry at all: no restriction
        assert!(ctx.grants_for("school").is_none());
    }

    #[test]
    fn anonymous_context_is_unauthenticated() {
        let ctx = PrincipalContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.principal_id(), Uuid::nil());
        assert!(ctx.grants_for("city").is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let original = PrincipalContext::builder()
            .principal_id(Uuid::new_v4())
            .account("admin")
            .add_grant("city", "Beijing")
            .build();

        let json = serde_json::to_string(&original).unwrap();
        let back: PrincipalContext = serde_json::from_str(&json).unwrap();

        assert_eq!(back.principal_id(), original.principal_id());
        assert_eq!(back.account(), original.account());
        assert!(back.is_authenticated());
        assert!(
            back.grants_for("city")
                .is_some_and(|g| g.contains(&PrivilegeValue::from("Beijing")))
        );
    }
}
