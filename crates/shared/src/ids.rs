use std::sync::LazyLock;

use regex::Regex;

use crate::error::DemoError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $validate:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap an identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, DemoError> {
                let value = value.into();
                $validate(&value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DemoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DemoError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Platform-assigned record id, 15 or 18 alphanumeric characters.
    RecordId,
    validate_record_id
);

define_id!(
    /// Caller-chosen token standing in for a record that does not exist yet.
    ReferenceId,
    validate_reference_id
);

fn validate_record_id(value: &str) -> Result<(), DemoError> {
    let len_ok = value.len() == 15 || value.len() == 18;
    if len_ok && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(DemoError::Validation(format!("invalid record id: {value:?}")))
    }
}

fn validate_reference_id(value: &str) -> Result<(), DemoError> {
    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_with_letter && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DemoError::Validation(format!(
            "invalid reference id: {value:?}"
        )))
    }
}

/// Templated cross-reference to a value produced earlier in the same
/// request, e.g. `reference(&acct, "id")` gives `@{GearsAccount.id}`.
pub fn reference(reference_id: &ReferenceId, path: &str) -> String {
    format!("@{{{reference_id}.{path}}}")
}

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\{([A-Za-z][A-Za-z0-9_]*)[.\[}]").expect("reference pattern is valid")
});

/// Names of all reference ids used by `@{…}` expressions in `text`.
pub fn referenced_ids(text: &str) -> Vec<&str> {
    REFERENCE_PATTERN
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}
