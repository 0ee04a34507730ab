//! Field-level validation errors.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation failures keyed by input field name.
///
/// Serializes as `{ "<field>": ["<message>", ...] }` with fields in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Take over `other`'s entries for fields not already reported here.
    pub fn absorb(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_existing_field_messages() {
        let mut errors = FieldErrors::new();
        errors.add("message", "Expected a string.");

        let mut other = FieldErrors::new();
        other.add("message", "This field is required.");
        other.add("user", "This field is required.");

        errors.absorb(other);
        assert_eq!(errors.get("message"), Some(&["Expected a string.".to_string()][..]));
        assert_eq!(errors.get("user"), Some(&["This field is required.".to_string()][..]));
    }
}
