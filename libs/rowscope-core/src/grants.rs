use std::collections::HashSet;

use crate::value::PrivilegeValue;

/// The set of values a principal is authorized to see for one entity type's
/// privileged field.
///
/// An explicit empty set means "no matching rows". It is deliberately
/// distinct from the absence of a grants entry on the principal, which means
/// "no restriction"; see [`PrincipalContext::grants_for`].
///
/// [`PrincipalContext::grants_for`]: crate::principal::PrincipalContext::grants_for
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GrantSet {
    values: HashSet<PrivilegeValue>,
}

impl GrantSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: impl Into<PrivilegeValue>) -> bool {
        self.values.insert(value.into())
    }

    #[must_use]
    pub fn contains(&self, value: &PrivilegeValue) -> bool {
        self.values.contains(value)
    }

    /// Returns true if this grant set matches zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_subset(&self, other: &GrantSet) -> bool {
        self.values.is_subset(&other.values)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrivilegeValue> {
        self.values.iter()
    }
}

impl<V: Into<PrivilegeValue>> FromIterator<V> for GrantSet {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_empty_but_present() {
        let grants = GrantSet::new();
        assert!(grants.is_empty());
        assert_eq!(grants.len(), 0);
        assert!(!grants.contains(&PrivilegeValue::from("Beijing")));
    }

    #[test]
    fn from_iterator_collects_converted_values() {
        let grants: GrantSet = ["Beijing", "Shanghai"].into_iter().collect();
        assert_eq!(grants.len(), 2);
        assert!(grants.contains(&PrivilegeValue::from("Beijing")));
        assert!(grants.contains(&PrivilegeValue::from("Shanghai")));
    }

    #[test]
    fn insert_deduplicates() {
        let mut grants = GrantSet::new();
        assert!(grants.insert("Beijing"));
        assert!(!grants.insert("Beijing"));
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn subset_relation() {
        let small: GrantSet = ["Beijing"].into_iter().collect();
        let large: GrantSet = ["Beijing", "Shanghai"].into_iter().collect();
        assert!(small.is_subset(&large));
        assert!(!large.is_subset(&small));
        assert!(GrantSet::new().is_subset(&small));
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let grants: GrantSet = ["Beijing"].into_iter().collect();
        let json = serde_json::to_string(&grants).unwrap();
        let back: GrantSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grants);
        // transparent: a bare JSON array, no wrapper object
        assert!(json.starts_with('['));
    }
}
