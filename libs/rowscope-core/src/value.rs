use std::fmt;

use uuid::Uuid;

/// Comparison value extracted from a row by a privilege selector.
///
/// The set of variants is closed on purpose: grants are persisted and
/// compared across processes, so every value must hash and serialize
/// identically everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeValue {
    String(String),
    I64(i64),
    Uuid(Uuid),
    Bool(bool),
}

impl fmt::Display for PrivilegeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeValue::String(s) => write!(f, "{s}"),
            PrivilegeValue::I64(n) => write!(f, "{n}"),
            PrivilegeValue::Uuid(u) => write!(f, "{u}"),
            PrivilegeValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for PrivilegeValue {
    fn from(value: String) -> Self {
        PrivilegeValue::String(value)
    }
}

impl From<&str> for PrivilegeValue {
    fn from(value: &str) -> Self {
        PrivilegeValue::String(value.to_owned())
    }
}

impl From<i64> for PrivilegeValue {
    fn from(value: i64) -> Self {
        PrivilegeValue::I64(value)
    }
}

impl From<Uuid> for PrivilegeValue {
    fn from(value: Uuid) -> Self {
        PrivilegeValue::Uuid(value)
    }
}

impl From<bool> for PrivilegeValue {
    fn from(value: bool) -> Self {
        PrivilegeValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_inner_value() {
        assert_eq!(PrivilegeValue::from("Beijing").to_string(), "Beijing");
        assert_eq!(PrivilegeValue::from(42_i64).to_string(), "42");
        assert_eq!(PrivilegeValue::from(true).to_string(), "true");
    }

    #[test]
    fn variants_of_different_kinds_are_not_equal() {
        assert_ne!(
            PrivilegeValue::from("1"),
            PrivilegeValue::from(1_i64),
            "string and integer values must never compare equal"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let original = PrivilegeValue::Uuid(Uuid::new_v4());
        let json = serde_json::to_string(&original).unwrap();
        let back: PrivilegeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&PrivilegeValue::from("x")).unwrap();
        assert!(json.contains(r#""string""#));
    }
}
