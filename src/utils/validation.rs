use crate::utils::error::{OfferLetterError, Result};
use serde_json::Value;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A required value is missing when it is absent, `null`, or the empty string.
///
/// Numbers, booleans, arrays and objects are present whatever their content,
/// so `0` and `[]` satisfy a requirement.
pub fn is_missing_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Collects every name in `required` that is missing from `data`, keeping the
/// order of `required`. A non-object `data` is missing all of them.
pub fn collect_missing_fields(data: &Value, required: &[&str]) -> Vec<String> {
    let object = data.as_object();
    required
        .iter()
        .filter(|field| is_missing_value(object.and_then(|o| o.get(**field))))
        .map(|field| field.to_string())
        .collect()
}

/// Turns a list of missing field names into the validation result.
pub fn ensure_no_missing_fields(missing: Vec<String>) -> Result<bool> {
    if missing.is_empty() {
        Ok(true)
    } else {
        Err(OfferLetterError::Validation { missing })
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OfferLetterError::InvalidValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OfferLetterError::InvalidValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OfferLetterError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_missing_value() {
        assert!(is_missing_value(None));
        assert!(is_missing_value(Some(&Value::Null)));
        assert!(is_missing_value(Some(&json!(""))));
        assert!(!is_missing_value(Some(&json!(" "))));
        assert!(!is_missing_value(Some(&json!(0))));
        assert!(!is_missing_value(Some(&json!([]))));
        assert!(!is_missing_value(Some(&json!(false))));
    }

    #[test]
    fn test_collect_missing_fields_keeps_declaration_order() {
        let data = json!({ "b": "x", "d": null });
        let missing = collect_missing_fields(&data, &["a", "b", "c", "d"]);
        assert_eq!(missing, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_non_object_is_missing_everything() {
        let missing = collect_missing_fields(&json!("not a map"), &["a", "b"]);
        assert_eq!(missing, vec!["a", "b"]);
    }

    #[test]
    fn test_ensure_no_missing_fields() {
        assert!(ensure_no_missing_fields(vec![]).unwrap());
        let err = ensure_no_missing_fields(vec!["date".to_string()]).unwrap_err();
        assert_eq!(err.missing_fields(), ["date".to_string()]);
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "letter.json").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("template.name", "regent").is_ok());
        assert!(validate_non_empty_string("template.name", "   ").is_err());
    }
}
