use gingen_core::GeneratorError;
use gingen_core::ir::{IrParameter, IrSpec};
use minijinja::{Value, context};

use super::{GoField, align_fields, query_params_type, render, trailing_comment, uri_params_type};
use crate::type_mapper::go_field_type;

/// Emit the `<Op>UriParams` and `<Op>QueryParams` binding structs.
///
/// Operations without path or query parameters contribute nothing, so this
/// section may be empty.
pub fn emit_params(ir: &IrSpec) -> Result<String, GeneratorError> {
    let mut structs: Vec<Value> = Vec::new();
    for op in &ir.operations {
        if op.has_path_params() {
            structs.push(struct_context(&uri_params_type(op), "uri", op.path_params()));
        }
        if op.has_query_params() {
            structs.push(struct_context(&query_params_type(op), "form", op.query_params()));
        }
    }
    render(
        "params.go.j2",
        include_str!("../../templates/params.go.j2"),
        context! { structs => structs },
    )
}

fn struct_context<'a>(
    name: &str,
    tag_key: &str,
    params: impl Iterator<Item = &'a IrParameter>,
) -> Value {
    let fields: Vec<GoField> = params.map(|p| param_field(p, tag_key)).collect();
    context! {
        name => name,
        fields => align_fields(&fields),
    }
}

fn param_field(param: &IrParameter, tag_key: &str) -> GoField {
    let mut tag = format!("{tag_key}:\"{}\"", param.name.original);
    if param.required {
        tag.push_str(" binding:\"required\"");
    }
    GoField {
        name: param.name.exported.clone(),
        go_type: go_field_type(&param.param_type, param.repeated, !param.required),
        tag,
        comment: trailing_comment(param.description.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::ir_from_yaml;

    #[test]
    fn test_uri_then_query() {
        let ir = ir_from_yaml(
            r#"
openapi: "3.0.3"
paths:
  /items/{id}:
    get:
      operationId: getItem
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
        - name: limit
          in: query
          description: Page size.
          schema:
            type: integer
        - name: tags
          in: query
          schema:
            type: array
            items:
              type: string
        - name: verbose
          in: query
          required: true
          schema:
            type: boolean
components:
  schemas: {}
"#,
        );
        let out = emit_params(&ir).unwrap();
        insta::assert_snapshot!(out, @r#"
        type GetItemUriParams struct {
        	Id string `uri:"id" binding:"required"`
        }

        type GetItemQueryParams struct {
        	Limit   *int     `form:"limit"`                      // Page size.
        	Tags    []string `form:"tags"`
        	Verbose bool     `form:"verbose" binding:"required"`
        }
        "#);
    }

    #[test]
    fn test_empty_without_parameters() {
        let ir = ir_from_yaml(
            r#"
openapi: "3.0.3"
paths:
  /health:
    get:
      operationId: health
components:
  schemas: {}
"#,
        );
        assert_eq!(emit_params(&ir).unwrap(), "");
    }
}
