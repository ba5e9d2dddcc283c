// ABOUTME: Compiles tool input schemas and validates call arguments against them
// ABOUTME: Thin wrapper over a draft 2020-12 jsonschema Validator

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::errors::ToolError;
use crate::mcp::schema::JsonSchema;

/// Compiled argument schema of a single tool
pub struct ArgumentValidator {
    tool_name: String,
    validator: Validator,
}

impl fmt::Debug for ArgumentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentValidator")
            .field("tool_name", &self.tool_name)
            .finish_non_exhaustive()
    }
}

impl ArgumentValidator {
    /// Compile `schema` for `tool_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSchema`] if the schema does not compile
    pub fn compile(tool_name: &str, schema: &JsonSchema) -> Result<Self, ToolError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema.to_value())
            .map_err(|err| ToolError::invalid_schema(tool_name, format!("invalid schema: {err}")))?;
        Ok(Self {
            tool_name: tool_name.to_owned(),
            validator,
        })
    }

    /// Validate call arguments, reporting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArguments`] listing the violations
    pub fn validate(&self, arguments: &Value) -> Result<(), ToolError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(arguments)
            .map(|err| {
                let path = err.instance_path().to_string();
                if path.is_empty() {
                    format!("$: {err}")
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_arguments(&self.tool_name, violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::mcp::schema::PropertySchema;

    fn schema() -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert(
            "command".to_owned(),
            PropertySchema::typed("string", "command").with_min_length(1),
        );
        properties.insert(
            "timeout".to_owned(),
            PropertySchema::typed("number", "seconds").with_exclusive_minimum(0.0),
        );
        JsonSchema::object(properties, &["command"])
    }

    #[test]
    fn test_valid_arguments_pass() {
        let validator = ArgumentValidator::compile("console", &schema()).unwrap();
        assert!(validator
            .validate(&json!({"command": "echo hi", "timeout": 2}))
            .is_ok());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let validator = ArgumentValidator::compile("console", &schema()).unwrap();
        let err = validator
            .validate(&json!({"timeout": -1, "extra": true}))
            .unwrap_err();
        match err {
            ToolError::InvalidArguments {
                tool_name,
                violations,
            } => {
                assert_eq!(tool_name, "console");
                assert!(violations.len() >= 3, "{violations:?}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_violations_name_the_offending_path() {
        let validator = ArgumentValidator::compile("console", &schema()).unwrap();
        let err = validator
            .validate(&json!({"command": "ls", "timeout": "soon"}))
            .unwrap_err();
        let ToolError::InvalidArguments { violations, .. } = err else {
            panic!("expected InvalidArguments");
        };
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert!(violations[0].starts_with("/timeout: "), "{violations:?}");

        let err = validator.validate(&json!({})).unwrap_err();
        let ToolError::InvalidArguments { violations, .. } = err else {
            panic!("expected InvalidArguments");
        };
        assert!(violations[0].starts_with("$: "), "{violations:?}");
    }

    #[test]
    fn test_broken_schema_is_rejected() {
        let mut broken = schema();
        broken.schema_type = "not-a-type".to_owned();
        let err = ArgumentValidator::compile("console", &broken).unwrap_err();
        assert!(matches!(err, ToolError::InvalidSchema { .. }));
    }
}
