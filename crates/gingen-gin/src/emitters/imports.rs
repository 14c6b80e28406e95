use gingen_core::GeneratorError;
use gingen_core::ir::IrSpec;
use minijinja::context;

use super::render;
use crate::type_mapper::{GIN_IMPORT, std_imports};

/// Emit the import block.
///
/// `net/http` is only needed for the 400 responses written by wrapper methods
/// that bind input, and `time` only when a resolved type is a date/time.
pub fn emit_imports(ir: &IrSpec) -> Result<String, GeneratorError> {
    let needs_http = ir.operations.iter().any(|op| op.has_bindings());
    let std_imports = std_imports(&ir.resolved_types(), needs_http);
    render(
        "imports.go.j2",
        include_str!("../../templates/imports.go.j2"),
        context! {
            std_imports => std_imports,
            gin_import => GIN_IMPORT,
        },
    )
}
