use gingen_core::GeneratorError;
use gingen_core::ir::{IrField, IrSchema, IrSpec};
use minijinja::{Value, context};

use super::{GoField, align_fields, doc_lines, render, trailing_comment};
use crate::type_mapper::{go_field_type, ir_type_to_go};

/// Emit data-model types for the component schemas, in source order.
pub fn emit_models(ir: &IrSpec) -> Result<String, GeneratorError> {
    let models: Vec<Value> = ir.schemas.iter().map(model_context).collect();
    render(
        "models.go.j2",
        include_str!("../../templates/models.go.j2"),
        context! { models => models },
    )
}

fn model_context(schema: &IrSchema) -> Value {
    match schema {
        IrSchema::Object(obj) => {
            let fields: Vec<GoField> = obj.fields.iter().map(model_field).collect();
            context! {
                kind => "object",
                name => obj.name.exported,
                docs => doc_lines(obj.description.as_deref()),
                fields => align_fields(&fields),
            }
        }
        IrSchema::Array(arr) => context! {
            kind => "array",
            name => arr.name.exported,
            docs => doc_lines(arr.description.as_deref()),
            item_type => ir_type_to_go(&arr.item_type),
        },
    }
}

// Absent properties are left at their zero value; `omitempty` alone marks them.
fn model_field(field: &IrField) -> GoField {
    let tag = if field.required {
        format!("json:\"{}\"", field.name.original)
    } else {
        format!("json:\"{},omitempty\"", field.name.original)
    };
    GoField {
        name: field.name.exported.clone(),
        go_type: go_field_type(&field.field_type, field.repeated, false),
        tag,
        comment: trailing_comment(field.description.as_deref()),
    }
}
