use gingen_core::GeneratorError;
use gingen_core::config::ServerConfig;
use gingen_core::ir::IrSpec;
use minijinja::context;

use super::{doc_lines, render};

/// Emit the generated-code banner and the `package` clause.
pub fn emit_header(ir: &IrSpec, config: &ServerConfig) -> Result<String, GeneratorError> {
    let source = ir.info.as_ref().map(|info| {
        if info.version.is_empty() {
            info.title.clone()
        } else {
            format!("{} {}", info.title, info.version)
        }
    });
    let docs = doc_lines(ir.info.as_ref().and_then(|info| info.description.as_deref()));
    render(
        "header.go.j2",
        include_str!("../../templates/header.go.j2"),
        context! {
            source => source,
            docs => docs,
            package_name => config.package_name,
        },
    )
}
