use crate::error::BuildError;
use crate::ir::{IrArraySchema, IrField, IrObjectSchema, IrSchema, IrType};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{Schema, SchemaOrRef};

use super::name_normalizer::{capitalize_first, normalize_name};
use super::type_resolver::resolve_type;

/// A resolved property or parameter type. Declared arrays carry their item
/// type with `repeated` set; nested arrays are not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub ir_type: IrType,
    pub repeated: bool,
}

/// Resolve a `$ref` to a named schema into a reference type.
pub fn ref_to_ir_type(ref_path: &str, resolver: &RefResolver<'_>) -> Result<IrType, BuildError> {
    let name = resolver.schema_name(ref_path)?;
    Ok(IrType::Ref(capitalize_first(name)))
}

/// Convert a property or parameter schema to a `ResolvedType`.
///
/// `location` names the owner in error messages.
pub fn schema_or_ref_to_ir_type(
    schema_or_ref: &SchemaOrRef,
    resolver: &RefResolver<'_>,
    location: &str,
) -> Result<ResolvedType, BuildError> {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => Ok(ResolvedType {
            ir_type: ref_to_ir_type(ref_path, resolver)?,
            repeated: false,
        }),
        SchemaOrRef::Schema(schema) => match schema.schema_type.as_deref() {
            Some("array") => Ok(ResolvedType {
                ir_type: items_to_ir_type(schema, resolver, location)?,
                repeated: true,
            }),
            Some(t) => Ok(ResolvedType {
                ir_type: resolve_type(t, schema.format.as_deref()),
                repeated: false,
            }),
            None => Err(BuildError::MissingField {
                location: location.to_string(),
                field: "type",
            }),
        },
    }
}

/// Resolve the `items` of an array schema to a single item type.
fn items_to_ir_type(
    schema: &Schema,
    resolver: &RefResolver<'_>,
    location: &str,
) -> Result<IrType, BuildError> {
    let items = schema
        .items
        .as_deref()
        .ok_or_else(|| BuildError::MissingField {
            location: location.to_string(),
            field: "items",
        })?;

    match items {
        SchemaOrRef::Ref { ref_path } => ref_to_ir_type(ref_path, resolver),
        SchemaOrRef::Schema(item) => match item.schema_type.as_deref() {
            Some("array") => Err(BuildError::UnsupportedSchemaType {
                schema: location.to_string(),
                schema_type: "array of array".to_string(),
            }),
            Some(t) => Ok(resolve_type(t, item.format.as_deref())),
            None => Err(BuildError::MissingField {
                location: location.to_string(),
                field: "items.type",
            }),
        },
    }
}

/// Convert a named component schema into an `IrSchema`.
pub fn schema_or_ref_to_ir_schema(
    name: &str,
    schema_or_ref: &SchemaOrRef,
    resolver: &RefResolver<'_>,
) -> Result<IrSchema, BuildError> {
    let schema = match schema_or_ref {
        SchemaOrRef::Schema(schema) => schema,
        SchemaOrRef::Ref { .. } => {
            return Err(BuildError::UnsupportedSchemaType {
                schema: name.to_string(),
                schema_type: "$ref".to_string(),
            });
        }
    };

    match schema.schema_type.as_deref() {
        Some("object") => resolve_object(name, schema, resolver).map(IrSchema::Object),
        Some("array") => {
            let location = format!("schema `{name}`");
            Ok(IrSchema::Array(IrArraySchema {
                name: normalize_name(name),
                description: schema.description.clone(),
                item_type: items_to_ir_type(schema, resolver, &location)?,
            }))
        }
        Some(other) => Err(BuildError::UnsupportedSchemaType {
            schema: name.to_string(),
            schema_type: other.to_string(),
        }),
        None => Err(BuildError::MissingField {
            location: format!("schema `{name}`"),
            field: "type",
        }),
    }
}

fn resolve_object(
    name: &str,
    schema: &Schema,
    resolver: &RefResolver<'_>,
) -> Result<IrObjectSchema, BuildError> {
    let fields = schema
        .properties
        .iter()
        .map(|(prop_name, prop)| {
            let location = format!("property `{prop_name}` of schema `{name}`");
            let resolved = schema_or_ref_to_ir_type(prop, resolver, &location)?;
            let description = match prop {
                SchemaOrRef::Schema(s) => s.description.clone(),
                SchemaOrRef::Ref { .. } => None,
            };
            Ok(IrField {
                name: normalize_name(prop_name),
                field_type: resolved.ir_type,
                repeated: resolved.repeated,
                required: schema.is_required(prop_name),
                description,
            })
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    Ok(IrObjectSchema {
        name: normalize_name(name),
        description: schema.description.clone(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::from_value;
    use crate::parse::OpenApiSpec;
    use serde_json::json;

    fn spec_with(schemas: serde_json::Value) -> OpenApiSpec {
        from_value(json!({ "paths": {}, "components": { "schemas": schemas } })).unwrap()
    }

    fn component<'a>(spec: &'a OpenApiSpec, name: &str) -> &'a SchemaOrRef {
        &spec.components.as_ref().unwrap().schemas.as_ref().unwrap()[name]
    }

    #[test]
    fn test_object_fields_follow_required_list() {
        let spec = spec_with(json!({
            "Pet": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "tag": { "type": "string" }
                }
            }
        }));
        let resolver = RefResolver::new(&spec);
        let schema = schema_or_ref_to_ir_schema("Pet", component(&spec, "Pet"), &resolver).unwrap();

        match schema {
            IrSchema::Object(obj) => {
                assert_eq!(obj.name.exported, "Pet");
                assert_eq!(obj.fields.len(), 2);
                assert_eq!(obj.fields[0].name.original, "id");
                assert_eq!(obj.fields[0].field_type, IrType::Int64);
                assert!(obj.fields[0].required);
                assert_eq!(obj.fields[1].field_type, IrType::String);
                assert!(!obj.fields[1].required);
            }
            _ => panic!("expected object schema"),
        }
    }

    #[test]
    fn test_array_property_carries_item_type() {
        let spec = spec_with(json!({
            "Tag": { "type": "object", "properties": {} },
            "Pet": {
                "type": "object",
                "properties": {
                    "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
                }
            }
        }));
        let resolver = RefResolver::new(&spec);
        let schema = schema_or_ref_to_ir_schema("Pet", component(&spec, "Pet"), &resolver).unwrap();

        let IrSchema::Object(obj) = schema else {
            panic!("expected object schema");
        };
        assert_eq!(obj.fields[0].field_type, IrType::Ref("Tag".to_string()));
        assert!(obj.fields[0].repeated);
    }

    #[test]
    fn test_array_schema_inline_items() {
        let spec = spec_with(json!({
            "Names": { "type": "array", "items": { "type": "string" } }
        }));
        let resolver = RefResolver::new(&spec);
        let schema =
            schema_or_ref_to_ir_schema("Names", component(&spec, "Names"), &resolver).unwrap();

        match schema {
            IrSchema::Array(arr) => assert_eq!(arr.item_type, IrType::String),
            _ => panic!("expected array schema"),
        }
    }

    #[test]
    fn test_array_schema_dangling_items_ref() {
        let spec = spec_with(json!({
            "Pets": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
        }));
        let resolver = RefResolver::new(&spec);
        let err =
            schema_or_ref_to_ir_schema("Pets", component(&spec, "Pets"), &resolver).unwrap_err();
        assert!(matches!(err, BuildError::DanglingReference { .. }));
    }

    #[test]
    fn test_unsupported_schema_type() {
        let spec = spec_with(json!({ "Name": { "type": "string" } }));
        let resolver = RefResolver::new(&spec);
        let err =
            schema_or_ref_to_ir_schema("Name", component(&spec, "Name"), &resolver).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedSchemaType {
                schema: "Name".to_string(),
                schema_type: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_array_rejected() {
        let spec = spec_with(json!({
            "Grid": { "type": "array", "items": { "type": "array" } }
        }));
        let resolver = RefResolver::new(&spec);
        let err =
            schema_or_ref_to_ir_schema("Grid", component(&spec, "Grid"), &resolver).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedSchemaType { .. }));
    }
}
