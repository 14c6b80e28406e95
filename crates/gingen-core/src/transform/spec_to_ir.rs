use indexmap::IndexMap;
use log::debug;

use crate::config::NamingStrategy;
use crate::error::BuildError;
use crate::ir::*;
use crate::parse::OpenApiSpec;
use crate::parse::operation::{
    Operation, Parameter, ParameterLocation, ParameterOrRef, PathItem, RequestBodyOrRef,
};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::SchemaOrRef;

use super::name_normalizer::{normalize_name, route_to_name};
use super::schema_resolver::{ref_to_ir_type, schema_or_ref_to_ir_schema, schema_or_ref_to_ir_type};

/// Options controlling how the transform phase resolves operation names.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub naming_strategy: NamingStrategy,
    /// Map from resolved operation name (operationId or route-derived) to a replacement.
    pub aliases: IndexMap<String, String>,
}

/// Build the IR from a parsed OpenAPI document.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, BuildError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Build the IR with explicit naming options.
///
/// Fails atomically: either every operation and schema is resolved, or an
/// error naming the first problem is returned.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, BuildError> {
    let paths = spec
        .paths
        .as_ref()
        .ok_or(BuildError::SpecSectionMissing { section: "paths" })?;
    let component_schemas = spec
        .component_schemas()
        .ok_or(BuildError::SpecSectionMissing {
            section: "components.schemas",
        })?;

    let resolver = RefResolver::new(spec);

    // Phase 1: Convert component schemas to IR schemas
    let schemas = component_schemas
        .iter()
        .map(|(name, schema)| schema_or_ref_to_ir_schema(name, schema, &resolver))
        .collect::<Result<Vec<_>, _>>()?;

    // Phase 2: Convert operations
    let mut operations = Vec::new();
    for (path, item) in paths {
        collect_operations(path, item, &resolver, options, &mut operations)?;
    }

    // Phase 3: Operation names become method names, so they must be unique
    check_unique_names(&operations)?;

    let info = spec.info.as_ref().map(|info| IrInfo {
        title: info.title.clone(),
        description: info.description.clone(),
        version: info.version.clone(),
    });

    debug!(
        "built IR with {} operations and {} schemas",
        operations.len(),
        schemas.len()
    );

    Ok(IrSpec {
        info,
        schemas,
        operations,
    })
}

fn collect_operations(
    path: &str,
    item: &PathItem,
    resolver: &RefResolver<'_>,
    options: &TransformOptions,
    out: &mut Vec<IrOperation>,
) -> Result<(), BuildError> {
    for (method, op) in item.operations() {
        out.push(build_operation(method, path, op, item, resolver, options)?);
    }

    Ok(())
}

fn build_operation(
    method: HttpMethod,
    path: &str,
    op: &Operation,
    item: &PathItem,
    resolver: &RefResolver<'_>,
    options: &TransformOptions,
) -> Result<IrOperation, BuildError> {
    let raw_name = match (options.naming_strategy, &op.operation_id) {
        (NamingStrategy::UseOperationId, Some(id)) => id.clone(),
        _ => route_to_name(method, path),
    };
    let name = options
        .aliases
        .get(&raw_name)
        .cloned()
        .unwrap_or(raw_name);

    let parameters =
        resolve_parameters(op.effective_parameters(item), resolver, method, path)?;

    let request_body = match op.request_body {
        Some(ref body) => resolve_request_body(body, resolver, method, path)?,
        None => None,
    };

    Ok(IrOperation {
        name: normalize_name(&name),
        method,
        path: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        parameters,
        request_body,
    })
}

fn resolve_parameters(
    params: &[ParameterOrRef],
    resolver: &RefResolver<'_>,
    method: HttpMethod,
    path: &str,
) -> Result<Vec<IrParameter>, BuildError> {
    let mut resolved = Vec::with_capacity(params.len());

    for p in params {
        let param: &Parameter = match p {
            ParameterOrRef::Parameter(param) => param,
            ParameterOrRef::Ref { ref_path } => resolver.parameter(ref_path)?,
        };

        let location = match param.location {
            ParameterLocation::Path => IrParameterLocation::Path,
            ParameterLocation::Query => IrParameterLocation::Query,
            ParameterLocation::Header | ParameterLocation::Cookie => {
                debug!(
                    "skipping {:?} parameter `{}` on {} {path}",
                    param.location,
                    param.name,
                    method.as_str()
                );
                continue;
            }
        };

        let owner = format!("parameter `{}` of {} {path}", param.name, method.as_str());
        let schema = param
            .schema
            .as_ref()
            .ok_or_else(|| BuildError::MissingField {
                location: owner.clone(),
                field: "schema",
            })?;
        let param_type = schema_or_ref_to_ir_type(schema, resolver, &owner)?;

        resolved.push(IrParameter {
            name: normalize_name(&param.name),
            location,
            param_type: param_type.ir_type,
            repeated: param_type.repeated,
            required: param.required,
            description: param.description.clone(),
        });
    }

    Ok(resolved)
}

/// Only `content."application/json".schema.$ref` is bound. Anything else is
/// dropped and the operation proceeds without a request body.
fn resolve_request_body(
    body: &RequestBodyOrRef,
    resolver: &RefResolver<'_>,
    method: HttpMethod,
    path: &str,
) -> Result<Option<IrType>, BuildError> {
    let rb = match body {
        RequestBodyOrRef::RequestBody(rb) => rb,
        RequestBodyOrRef::Ref { ref_path } => {
            debug!(
                "dropping referenced request body {ref_path} on {} {path}",
                method.as_str()
            );
            return Ok(None);
        }
    };

    match rb.json_schema() {
        Some(SchemaOrRef::Ref { ref_path }) => ref_to_ir_type(ref_path, resolver).map(Some),
        Some(SchemaOrRef::Schema(_)) => {
            debug!(
                "dropping inline JSON request body on {} {path}",
                method.as_str()
            );
            Ok(None)
        }
        None => {
            debug!("no JSON request body schema on {} {path}", method.as_str());
            Ok(None)
        }
    }
}

/// Keyed on the exported name: `getItem` and `GetItem` would both become the
/// Go method `GetItem`.
fn check_unique_names(operations: &[IrOperation]) -> Result<(), BuildError> {
    let mut seen: IndexMap<&str, &IrOperation> = IndexMap::new();
    for op in operations {
        if let Some(first) = seen.insert(op.name.exported.as_str(), op) {
            return Err(BuildError::DuplicateOperationId {
                operation_id: op.name.exported.clone(),
                first: describe_operation(first),
                second: describe_operation(op),
            });
        }
    }
    Ok(())
}

fn describe_operation(op: &IrOperation) -> String {
    format!("{} {} (`{}`)", op.method.as_str(), op.path, op.name.original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::from_value;
    use serde_json::json;

    fn build(doc: serde_json::Value) -> Result<IrSpec, BuildError> {
        transform(&from_value(doc).unwrap())
    }

    #[test]
    fn test_missing_paths() {
        let err = build(json!({ "components": { "schemas": {} } })).unwrap_err();
        assert_eq!(err, BuildError::SpecSectionMissing { section: "paths" });
    }

    #[test]
    fn test_missing_component_schemas() {
        let err = build(json!({ "paths": {} })).unwrap_err();
        assert_eq!(
            err,
            BuildError::SpecSectionMissing {
                section: "components.schemas"
            }
        );

        let err = build(json!({ "paths": {}, "components": {} })).unwrap_err();
        assert!(matches!(err, BuildError::SpecSectionMissing { .. }));
    }

    #[test]
    fn test_verbs_in_fixed_order() {
        let ir = build(json!({
            "paths": {
                "/things": {
                    "trace": { "operationId": "traceThings" },
                    "post": { "operationId": "createThing" },
                    "get": { "operationId": "listThings" },
                    "search": { "operationId": "searchThings" }
                }
            },
            "components": { "schemas": {} }
        }))
        .unwrap();

        let names: Vec<_> = ir.operations.iter().map(|o| o.name.original.as_str()).collect();
        assert_eq!(names, ["listThings", "createThing", "traceThings"]);
    }

    #[test]
    fn test_operation_parameters_replace_path_parameters() {
        let ir = build(json!({
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                    ],
                    "get": { "operationId": "getPet" },
                    "put": {
                        "operationId": "putPet",
                        "parameters": [
                            { "name": "force", "in": "query", "schema": { "type": "boolean" } }
                        ]
                    },
                    "delete": { "operationId": "deletePet", "parameters": [] }
                }
            },
            "components": { "schemas": {} }
        }))
        .unwrap();

        let get = &ir.operations[0];
        assert_eq!(get.parameters.len(), 1);
        assert_eq!(get.parameters[0].location, IrParameterLocation::Path);

        let put = &ir.operations[1];
        assert_eq!(put.parameters.len(), 1);
        assert_eq!(put.parameters[0].name.original, "force");
        assert!(!put.parameters[0].required);

        assert!(ir.operations[2].parameters.is_empty());
    }

    #[test]
    fn test_header_and_cookie_parameters_dropped() {
        let ir = build(json!({
            "paths": {
                "/me": {
                    "get": {
                        "operationId": "getMe",
                        "parameters": [
                            { "name": "X-Trace", "in": "header", "schema": { "type": "string" } },
                            { "name": "session", "in": "cookie", "schema": { "type": "string" } },
                            { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
                        ]
                    }
                }
            },
            "components": { "schemas": {} }
        }))
        .unwrap();

        let params = &ir.operations[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name.original, "verbose");
    }

    #[test]
    fn test_request_body_only_from_json_ref() {
        let ir = build(json!({
            "paths": {
                "/pets": {
                    "post": {
                        "operationId": "createPet",
                        "requestBody": {
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/NewPet" } }
                            }
                        }
                    },
                    "put": {
                        "operationId": "replacePets",
                        "requestBody": {
                            "content": {
                                "application/json": { "schema": { "type": "object" } }
                            }
                        }
                    },
                    "patch": {
                        "operationId": "patchPets",
                        "requestBody": {
                            "content": {
                                "application/xml": { "schema": { "$ref": "#/components/schemas/NewPet" } }
                            }
                        }
                    }
                }
            },
            "components": { "schemas": { "NewPet": { "type": "object", "properties": {} } } }
        }))
        .unwrap();

        let body = |name: &str| {
            ir.operations
                .iter()
                .find(|op| op.name.original == name)
                .map(|op| op.request_body.clone())
                .unwrap()
        };
        assert_eq!(body("createPet"), Some(IrType::Ref("NewPet".to_string())));
        assert_eq!(body("replacePets"), None);
        assert_eq!(body("patchPets"), None);
    }

    #[test]
    fn test_dangling_request_body_reference() {
        let err = build(json!({
            "paths": {
                "/pets": {
                    "post": {
                        "operationId": "createPet",
                        "requestBody": {
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Missing" } }
                            }
                        }
                    }
                }
            },
            "components": { "schemas": {} }
        }))
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::DanglingReference {
                reference: "#/components/schemas/Missing".to_string(),
                kind: "schema",
            }
        );
    }

    #[test]
    fn test_duplicate_operation_id() {
        let err = build(json!({
            "paths": {
                "/a": { "get": { "operationId": "fetch" } },
                "/b": { "get": { "operationId": "fetch" } }
            },
            "components": { "schemas": {} }
        }))
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::DuplicateOperationId {
                operation_id: "Fetch".to_string(),
                first: "GET /a (`fetch`)".to_string(),
                second: "GET /b (`fetch`)".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_after_capitalization() {
        let err = build(json!({
            "paths": {
                "/a": { "get": { "operationId": "getItem" } },
                "/b": { "get": { "operationId": "GetItem" } }
            },
            "components": { "schemas": {} }
        }))
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::DuplicateOperationId {
                operation_id: "GetItem".to_string(),
                first: "GET /a (`getItem`)".to_string(),
                second: "GET /b (`GetItem`)".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_operation_id_uses_route() {
        let ir = build(json!({
            "paths": { "/orders/{orderId}": { "get": {} } },
            "components": { "schemas": {} }
        }))
        .unwrap();
        assert_eq!(ir.operations[0].name.original, "getOrder");
        assert_eq!(ir.operations[0].name.exported, "GetOrder");
    }

    #[test]
    fn test_aliases_and_route_strategy() {
        let doc = json!({
            "paths": { "/orders": { "get": { "operationId": "fetchAllOrders" } } },
            "components": { "schemas": {} }
        });
        let spec = from_value(doc).unwrap();

        let mut aliases = IndexMap::new();
        aliases.insert("fetchAllOrders".to_string(), "listOrders".to_string());
        let ir = transform_with_options(
            &spec,
            &TransformOptions {
                naming_strategy: NamingStrategy::UseOperationId,
                aliases,
            },
        )
        .unwrap();
        assert_eq!(ir.operations[0].name.original, "listOrders");

        let ir = transform_with_options(
            &spec,
            &TransformOptions {
                naming_strategy: NamingStrategy::UseRouteBased,
                aliases: IndexMap::new(),
            },
        )
        .unwrap();
        assert_eq!(ir.operations[0].name.original, "listOrders");
    }

    #[test]
    fn test_parameter_without_schema() {
        let err = build(json!({
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "parameters": [ { "name": "limit", "in": "query" } ]
                    }
                }
            },
            "components": { "schemas": {} }
        }))
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingField { field: "schema", .. }));
    }

    #[test]
    fn test_referenced_parameter() {
        let ir = build(json!({
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "parameters": [ { "$ref": "#/components/parameters/Limit" } ]
                    }
                }
            },
            "components": {
                "schemas": {},
                "parameters": {
                    "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer", "format": "int32" } }
                }
            }
        }))
        .unwrap();
        assert_eq!(ir.operations[0].parameters[0].param_type, IrType::Int32);
    }
}
