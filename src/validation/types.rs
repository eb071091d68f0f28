use std::fmt::{self, Display};

use serde_json::Value;

/// A primitive type tag a package field may expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub const ALL: [FieldType; 3] = [FieldType::String, FieldType::Number, FieldType::Boolean];

    const fn bit(self) -> u8 {
        match self {
            FieldType::String => 0b001,
            FieldType::Number => 0b010,
            FieldType::Boolean => 0b100,
        }
    }

    /// Whether a present, non-null value has this runtime type. No coercion is
    /// attempted, so `"1.2"` is not a number.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.as_f64().is_some_and(|number| !number.is_nan()),
            FieldType::Boolean => value.is_boolean(),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        };
        write!(f, "{label}")
    }
}

/// Expected type of a field: one tag or a union of tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    mask: u8,
}

impl TypeSpec {
    pub const STRING: TypeSpec = TypeSpec::single(FieldType::String);
    pub const NUMBER: TypeSpec = TypeSpec::single(FieldType::Number);
    pub const BOOLEAN: TypeSpec = TypeSpec::single(FieldType::Boolean);
    pub const STRING_OR_NUMBER: TypeSpec = TypeSpec::STRING.or(FieldType::Number);

    pub const fn single(field_type: FieldType) -> Self {
        Self {
            mask: field_type.bit(),
        }
    }

    pub const fn or(self, field_type: FieldType) -> Self {
        Self {
            mask: self.mask | field_type.bit(),
        }
    }

    pub const fn contains(self, field_type: FieldType) -> bool {
        self.mask & field_type.bit() != 0
    }

    pub fn alternatives(self) -> impl Iterator<Item = FieldType> {
        FieldType::ALL
            .into_iter()
            .filter(move |field_type| self.contains(*field_type))
    }
}

impl Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.alternatives().map(|t| t.to_string()).collect();
        write!(f, "{}", labels.join("|"))
    }
}

/// Discriminated runtime kind of a JSON value, used in mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        write!(f, "{label}")
    }
}

/// A field is absent when the key is missing or holds JSON `null`.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Absent values always match; otherwise at least one alternative must.
pub fn matches_type(value: Option<&Value>, spec: TypeSpec) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(value) => spec.alternatives().any(|field_type| field_type.matches(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_tags_match_their_kind_only() {
        assert!(matches_type(Some(&json!("DR")), TypeSpec::STRING));
        assert!(!matches_type(Some(&json!(1)), TypeSpec::STRING));
        assert!(matches_type(Some(&json!(1.2)), TypeSpec::NUMBER));
        assert!(matches_type(Some(&json!(-3)), TypeSpec::NUMBER));
        assert!(!matches_type(Some(&json!(true)), TypeSpec::NUMBER));
        assert!(matches_type(Some(&json!(false)), TypeSpec::BOOLEAN));
        assert!(!matches_type(Some(&json!(0)), TypeSpec::BOOLEAN));
    }

    #[test]
    fn numeric_string_is_not_a_number() {
        assert!(!matches_type(Some(&json!("1.2")), TypeSpec::NUMBER));
    }

    #[test]
    fn union_accepts_any_alternative() {
        assert!(matches_type(Some(&json!("150")), TypeSpec::STRING_OR_NUMBER));
        assert!(matches_type(Some(&json!(150)), TypeSpec::STRING_OR_NUMBER));
        assert!(!matches_type(Some(&json!(true)), TypeSpec::STRING_OR_NUMBER));
        assert!(!matches_type(Some(&json!([150])), TypeSpec::STRING_OR_NUMBER));
    }

    #[test]
    fn absent_values_always_match() {
        for spec in [TypeSpec::STRING, TypeSpec::NUMBER, TypeSpec::BOOLEAN] {
            assert!(matches_type(None, spec));
            assert!(matches_type(Some(&Value::Null), spec));
        }
    }

    #[test]
    fn descriptors_render_as_pipe_joined_tags() {
        assert_eq!(TypeSpec::STRING.to_string(), "string");
        assert_eq!(TypeSpec::STRING_OR_NUMBER.to_string(), "string|number");
        assert_eq!(
            TypeSpec::BOOLEAN.or(FieldType::String).to_string(),
            "string|boolean"
        );
    }

    #[test]
    fn value_kinds_are_named_like_json() {
        assert_eq!(ValueKind::of(&json!({})).to_string(), "object");
        assert_eq!(ValueKind::of(&json!([])).to_string(), "array");
        assert_eq!(ValueKind::of(&json!(null)).to_string(), "null");
        assert_eq!(ValueKind::of(&json!("x")).to_string(), "string");
    }
}
