use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::{ParameterOrRef, PathItem};
use super::schema::SchemaOrRef;

/// The `info` block. Only the banner of the generated file uses it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub version: String,
}

/// Top-level OpenAPI 3.x document, reduced to what the model builder reads.
///
/// `paths` and `components.schemas` stay optional here so that a missing
/// section is reported by the model builder as a named error instead of a
/// serde failure.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: Option<String>,
    pub info: Option<Info>,
    pub paths: Option<IndexMap<String, PathItem>>,
    pub components: Option<Components>,
}

impl OpenApiSpec {
    pub fn component_schemas(&self) -> Option<&IndexMap<String, SchemaOrRef>> {
        self.components.as_ref().and_then(|c| c.schemas.as_ref())
    }
}

/// Definitions reachable through `#/components/...` references.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    pub schemas: Option<IndexMap<String, SchemaOrRef>>,

    #[serde(default)]
    pub parameters: IndexMap<String, ParameterOrRef>,
}
