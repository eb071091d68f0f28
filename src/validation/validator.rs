use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::{PackageField, REQUIRED_FIELDS};
use super::types::{ValueKind, is_absent, matches_type};

/// Outcome of checking a single package record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Per-package result, keyed by position in the submitted array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedValidation {
    pub index: usize,
    pub result: ValidationResult,
}

/// Aggregate outcome for a `packages` array or a whole request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub packages: Vec<IndexedValidation>,
}

impl BatchValidationResult {
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
            packages: Vec::new(),
        }
    }
}

/// Checks one package record against the field schema.
///
/// Required fields are reported first, in schema order, followed by type
/// mismatches and unknown-field warnings in the record's own key order.
pub fn validate_package_fields(record: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for field in REQUIRED_FIELDS {
        if is_absent(record.get(field.name())) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    for (name, value) in record {
        let Some(field) = PackageField::from_name(name) else {
            warnings.push(format!("Unknown field '{name}' not in schema"));
            continue;
        };

        let expected = field.expected();
        if !matches_type(Some(value), expected) {
            errors.push(format!(
                "Field '{name}' should be {expected}, got {} (value: {})",
                ValueKind::of(value),
                encoded(value)
            ));
        }
    }

    ValidationResult::from_findings(errors, warnings)
}

/// JSON text of a reported value. Whole floats lose their fractional part,
/// so `5.0` and `5` are reported alike.
fn encoded(value: &Value) -> String {
    normalized(value).to_string()
}

fn normalized(value: &Value) -> Value {
    match value {
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && float.abs() < MAX_SAFE_INTEGER => {
                Value::from(float as i64)
            }
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalized).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, item)| (key.clone(), normalized(item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Validates the `packages` array of a request.
pub fn validate_packages(packages: &Value) -> BatchValidationResult {
    let Some(items) = packages.as_array() else {
        return BatchValidationResult::rejected("Packages must be an array");
    };

    let mut batch = BatchValidationResult::default();
    if items.is_empty() {
        batch.errors.push("Packages array cannot be empty".to_string());
    }

    let mut package_errors = false;
    for (index, item) in items.iter().enumerate() {
        let result = match item.as_object() {
            Some(record) => validate_package_fields(record),
            None => ValidationResult::from_findings(
                vec!["Package must be an object".to_string()],
                Vec::new(),
            ),
        };

        package_errors |= !result.valid;
        batch
            .errors
            .extend(result.errors.iter().map(|e| format!("Package {index}: {e}")));
        batch
            .warnings
            .extend(result.warnings.iter().map(|w| format!("Package {index}: {w}")));
        batch.packages.push(IndexedValidation { index, result });
    }

    batch.valid = !items.is_empty() && !package_errors;
    batch
}

/// Validates a complete `add`/`check` request body.
pub fn validate_add_request(payload: &Value) -> BatchValidationResult {
    let Some(body) = payload.as_object() else {
        return BatchValidationResult::rejected("Payload must be an object");
    };

    match body.get("packages") {
        Some(packages) => validate_packages(packages),
        None => BatchValidationResult::rejected("Payload must contain \"packages\" field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn minimal_valid_package() {
        let result = validate_package_fields(&record(json!({
            "service_type": "DR",
            "rec_name": "Test",
            "rec_country": "CZ",
            "weight": 1.2
        })));

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_service_type_is_reported() {
        let result = validate_package_fields(&record(json!({
            "rec_name": "Test",
            "rec_country": "CZ"
        })));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Missing required field: service_type"]);
    }

    #[test]
    fn one_error_per_missing_required_field_in_schema_order() {
        let result = validate_package_fields(&record(json!({ "weight": 2 })));

        assert_eq!(
            result.errors,
            vec![
                "Missing required field: service_type",
                "Missing required field: rec_name",
                "Missing required field: rec_country",
            ]
        );
    }

    #[test]
    fn string_weight_is_a_type_mismatch() {
        let result = validate_package_fields(&record(json!({
            "service_type": "DR",
            "rec_name": "Test",
            "rec_country": "CZ",
            "weight": "1.2"
        })));

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![r#"Field 'weight' should be number, got string (value: "1.2")"#]
        );
    }

    #[test]
    fn union_field_reports_full_descriptor() {
        let result = validate_package_fields(&record(json!({
            "service_type": "DR",
            "rec_name": "Test",
            "rec_country": "CZ",
            "cod_price": true
        })));

        assert_eq!(
            result.errors,
            vec!["Field 'cod_price' should be string|number, got boolean (value: true)"]
        );
    }

    #[test]
    fn cod_price_accepts_string_and_number() {
        for cod_price in [json!("150.50"), json!(150.5)] {
            let result = validate_package_fields(&record(json!({
                "service_type": "DR",
                "rec_name": "Test",
                "rec_country": "CZ",
                "cod_price": cod_price
            })));
            assert!(result.valid, "{:?}", result.errors);
        }
    }

    #[test]
    fn unknown_field_only_warns() {
        let result = validate_package_fields(&record(json!({
            "service_type": "DR",
            "rec_name": "Test",
            "rec_country": "CZ",
            "foo": "bar"
        })));

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings, vec!["Unknown field 'foo' not in schema"]);
    }

    #[test]
    fn whole_floats_are_reported_without_fraction() {
        let result = validate_package_fields(&record(json!({
            "service_type": 5.0,
            "rec_name": [1.5, 2.0],
            "rec_country": "CZ"
        })));

        assert_eq!(
            result.errors,
            vec![
                "Field 'service_type' should be string, got number (value: 5)",
                "Field 'rec_name' should be string, got array (value: [1.5,2])",
            ]
        );
    }

    #[test]
    fn null_required_field_is_missing_but_not_mistyped() {
        let result = validate_package_fields(&record(json!({
            "service_type": null,
            "rec_name": "Test",
            "rec_country": "CZ",
            "weight": null
        })));

        assert_eq!(result.errors, vec!["Missing required field: service_type"]);
    }

    // A present required field of the wrong type passes the presence check
    // and fails only the type check.
    #[test]
    fn mistyped_required_field_yields_single_type_error() {
        let result = validate_package_fields(&record(json!({
            "service_type": 5,
            "rec_name": "Test",
            "rec_country": "CZ"
        })));

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["Field 'service_type' should be string, got number (value: 5)"]
        );
    }

    #[test]
    fn findings_follow_record_key_order() {
        let result = validate_package_fields(&record(json!({
            "zzz": 1,
            "service_type": "DR",
            "height": "10",
            "rec_name": "Test",
            "aaa": 2,
            "rec_country": "CZ",
            "vs": "123"
        })));

        assert_eq!(
            result.errors,
            vec![
                r#"Field 'height' should be number, got string (value: "10")"#,
                r#"Field 'vs' should be number, got string (value: "123")"#,
            ]
        );
        assert_eq!(
            result.warnings,
            vec![
                "Unknown field 'zzz' not in schema",
                "Unknown field 'aaa' not in schema",
            ]
        );
    }

    #[test]
    fn batch_rejects_non_array() {
        let result = validate_packages(&json!({ "0": {} }));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Packages must be an array"]);
        assert!(result.packages.is_empty());
    }

    #[test]
    fn batch_rejects_empty_array() {
        let result = validate_packages(&json!([]));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Packages array cannot be empty"]);
        assert!(result.packages.is_empty());
    }

    #[test]
    fn batch_prefixes_findings_with_index() {
        let result = validate_packages(&json!([
            { "service_type": "DR", "rec_name": "A", "rec_country": "CZ" },
            { "rec_name": "B", "rec_country": "SK", "extra": 1 },
            { "service_type": "DR", "rec_name": "C", "rec_country": "CZ", "weight": "x" }
        ]));

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Package 1: Missing required field: service_type",
                r#"Package 2: Field 'weight' should be number, got string (value: "x")"#,
            ]
        );
        assert_eq!(result.warnings, vec!["Package 1: Unknown field 'extra' not in schema"]);

        let indexes: Vec<usize> = result.packages.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert!(result.packages[0].result.valid);
        assert!(!result.packages[1].result.valid);
        assert!(result.packages[1].result.warnings.len() == 1);
    }

    #[test]
    fn batch_with_only_warnings_is_valid() {
        let result = validate_packages(&json!([
            { "service_type": "DR", "rec_name": "A", "rec_country": "CZ", "foo": "bar" }
        ]));

        assert!(result.valid);
        assert_eq!(result.warnings, vec!["Package 0: Unknown field 'foo' not in schema"]);
    }

    #[test]
    fn batch_reports_non_object_elements() {
        let result = validate_packages(&json!([
            "DR",
            { "service_type": "DR", "rec_name": "A", "rec_country": "CZ" }
        ]));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Package 0: Package must be an object"]);
        assert!(result.packages[1].result.valid);
    }

    #[test]
    fn request_requires_object_payload() {
        for payload in [json!(null), json!([]), json!("packages"), json!(42)] {
            let result = validate_add_request(&payload);
            assert!(!result.valid);
            assert_eq!(result.errors, vec!["Payload must be an object"]);
        }
    }

    #[test]
    fn request_requires_packages_field() {
        let result = validate_add_request(&json!({}));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Payload must contain \"packages\" field"]);
    }

    #[test]
    fn request_with_empty_packages() {
        let result = validate_add_request(&json!({ "packages": [] }));

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Packages array cannot be empty"]);
    }

    #[test]
    fn request_passes_batch_findings_through() {
        let payload = json!({
            "packages": [{ "rec_name": "Test", "rec_country": "CZ", "foo": "bar" }]
        });

        let request = validate_add_request(&payload);
        let batch = validate_packages(&payload["packages"]);
        assert_eq!(request, batch);
        assert_eq!(request.errors, vec!["Package 0: Missing required field: service_type"]);
    }
}
