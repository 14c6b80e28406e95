use gingen_core::GeneratorError;
use gingen_core::config::ServerConfig;
use gingen_core::ir::{IrOperation, IrSpec};
use minijinja::{Value, context};

use super::{bindings, doc_lines, render};

/// Emit the handler interface: one method per operation, in source order.
pub fn emit_interface(ir: &IrSpec, config: &ServerConfig) -> Result<String, GeneratorError> {
    let operations: Vec<Value> = ir.operations.iter().map(method_context).collect();
    render(
        "interface.go.j2",
        include_str!("../../templates/interface.go.j2"),
        context! {
            interface_name => config.interface_name,
            operations => operations,
        },
    )
}

fn method_context(op: &IrOperation) -> Value {
    let params: Vec<String> = std::iter::once("c *gin.Context".to_string())
        .chain(
            bindings(op)
                .into_iter()
                .map(|b| format!("{} {}", b.var, b.go_type)),
        )
        .collect();
    let docs = doc_lines(op.description.as_deref().or(op.summary.as_deref()));
    context! {
        name => op.name.exported,
        docs => docs,
        params => params,
    }
}
