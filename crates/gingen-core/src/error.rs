use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Fatal errors raised while building the IR. Any of these aborts the whole
/// run; no partial model is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("specification is missing required section `{section}`")]
    SpecSectionMissing { section: &'static str },

    #[error("reference `{reference}` does not resolve to a declared {kind}")]
    DanglingReference {
        reference: String,
        kind: &'static str,
    },

    #[error("schema `{schema}` has unsupported type `{schema_type}` (expected `object` or `array`)")]
    UnsupportedSchemaType { schema: String, schema_type: String },

    #[error("operation name `{operation_id}` is used by both {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: String,
        second: String,
    },

    #[error("missing required field `{field}` in {location}")]
    MissingField { location: String, field: &'static str },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml_ng::Error,
    },
}
