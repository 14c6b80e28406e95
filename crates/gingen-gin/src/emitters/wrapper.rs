use gingen_core::GeneratorError;
use gingen_core::config::ServerConfig;
use gingen_core::ir::{IrOperation, IrSpec};
use minijinja::{Value, context};

use super::{bindings, render};

/// Emit the dispatch wrapper.
///
/// Each wrapper method binds query, URI and body input in that order and
/// answers 400 on the first failure without reaching the handler.
pub fn emit_wrapper(ir: &IrSpec, config: &ServerConfig) -> Result<String, GeneratorError> {
    let operations: Vec<Value> = ir.operations.iter().map(dispatch_context).collect();
    render(
        "wrapper.go.j2",
        include_str!("../../templates/wrapper.go.j2"),
        context! {
            wrapper_name => config.wrapper_name,
            interface_name => config.interface_name,
            operations => operations,
        },
    )
}

fn dispatch_context(op: &IrOperation) -> Value {
    let bindings = bindings(op);
    let args: Vec<&str> = std::iter::once("c")
        .chain(bindings.iter().map(|b| b.var))
        .collect();
    let bindings: Vec<Value> = bindings
        .iter()
        .map(|b| {
            context! {
                var => b.var,
                go_type => b.go_type,
                bind_fn => b.bind_fn,
            }
        })
        .collect();
    context! {
        name => op.name.exported,
        bindings => bindings,
        args => args,
    }
}
