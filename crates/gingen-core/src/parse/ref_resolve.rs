use super::document::{Components, OpenApiSpec};
use super::operation::{Parameter, ParameterOrRef};
use crate::error::BuildError;

/// Looks up `$ref` targets in `components`. References are followed exactly
/// one level; a reference whose target is itself a reference is dangling.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Resolve `#/components/schemas/Foo` to the declared schema name `Foo`.
    pub fn schema_name(&self, ref_path: &str) -> Result<&'a str, BuildError> {
        parse_ref_name(ref_path, "schemas")
            .and_then(|name| {
                self.components
                    .and_then(|c| c.schemas.as_ref())
                    .and_then(|schemas| schemas.get_key_value(name))
            })
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| BuildError::DanglingReference {
                reference: ref_path.to_string(),
                kind: "schema",
            })
    }

    /// Resolve `#/components/parameters/Foo` to its inline parameter.
    pub fn parameter(&self, ref_path: &str) -> Result<&'a Parameter, BuildError> {
        parse_ref_name(ref_path, "parameters")
            .and_then(|name| self.components.and_then(|c| c.parameters.get(name)))
            .and_then(|p| match p {
                ParameterOrRef::Parameter(param) => Some(param),
                ParameterOrRef::Ref { .. } => None,
            })
            .ok_or_else(|| BuildError::DanglingReference {
                reference: ref_path.to_string(),
                kind: "parameter",
            })
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'r>(ref_path: &'r str, expected_section: &str) -> Option<&'r str> {
    let stripped = ref_path.strip_prefix("#/components/")?;
    let (section, name) = stripped.split_once('/')?;
    (section == expected_section && !name.is_empty()).then_some(name)
}
