pub mod document;
pub mod operation;
pub mod ref_resolve;
pub mod schema;

pub use document::OpenApiSpec;

use crate::error::ParseError;

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Interpret an already-deserialized, pre-validated document.
///
/// No version check happens here; the caller owns validation.
pub fn from_value(value: serde_json::Value) -> Result<OpenApiSpec, ParseError> {
    Ok(serde_json::from_value(value)?)
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    let version = spec
        .openapi
        .as_deref()
        .ok_or_else(|| ParseError::MissingField("openapi".to_string()))?;
    if !version.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}
