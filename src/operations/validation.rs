use serde_json::{json, Value};

/// Shape of a JSON record file: an array of objects whose known keys are strings.
/// Unknown keys are allowed so ESCO exports load unchanged.
pub fn record_file_schema() -> Value {
    let text = json!({"type": "string"});

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "keyId": text,
                "code": text,
                "preferredLabel": text,
                "description": text,
                "definition": text,
                "scopeNote": text,
                "alternateDesignations": text,
                "altLabels": text,
                "occupationType": text,
                "conceptType": text,
                "iscoGroupCode": text,
                "iscoGroup": text,
                "regulatedProfessionNote": text,
                "status": text,
                "url": text,
                "conceptUri": text
            }
        }
    })
}

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with every validation error if invalid
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_records_pass() {
        let data = json!([
            {"code": "2512", "preferredLabel": "Software developer"},
            {"code": "", "hiddenLabels": "anything"}
        ]);

        assert!(validate_against_schema(&record_file_schema(), &data).is_ok());
    }

    #[test]
    fn test_top_level_must_be_array() {
        let data = json!({"code": "2512"});

        let errors = validate_against_schema(&record_file_schema(), &data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("at root"));
    }

    #[test]
    fn test_wrong_field_type_reports_location() {
        let data = json!([
            {"code": "2512"},
            {"code": 2511, "preferredLabel": ["Systems analyst"]}
        ]);

        let errors = validate_against_schema(&record_file_schema(), &data).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("/1/code")));
        assert!(errors.iter().any(|e| e.contains("/1/preferredLabel")));
    }
}
