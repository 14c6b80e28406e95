use gingen_core::config::ServerConfig;
use gingen_core::ir::IrSpec;
use gingen_core::{CodeGenerator, GeneratedFile, GeneratorError};
use log::trace;

use crate::emitters;

/// Name of the single file produced by the gin generator.
pub const OUTPUT_FILE: &str = "server.gen.go";

/// Go gin server scaffold generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct GinServerGenerator;

impl GinServerGenerator {
    /// Render the whole scaffold as one Go source text.
    ///
    /// Sections always appear in the same order and empty ones are skipped,
    /// so rerunning on an unchanged IR yields identical bytes.
    pub fn render(&self, ir: &IrSpec, config: &ServerConfig) -> Result<String, GeneratorError> {
        let sections = [
            ("header", emitters::header::emit_header(ir, config)?),
            ("imports", emitters::imports::emit_imports(ir)?),
            ("interface", emitters::interface::emit_interface(ir, config)?),
            ("params", emitters::params::emit_params(ir)?),
            ("wrapper", emitters::wrapper::emit_wrapper(ir, config)?),
            ("routes", emitters::routes::emit_routes(ir, config)?),
            ("models", emitters::models::emit_models(ir)?),
        ];
        let mut rendered = Vec::with_capacity(sections.len());
        for (name, text) in sections {
            if text.is_empty() {
                trace!("section {name} is empty, skipping");
                continue;
            }
            trace!("section {name}: {} bytes", text.len());
            rendered.push(text);
        }
        Ok(rendered.join("\n"))
    }
}

impl CodeGenerator for GinServerGenerator {
    type Config = ServerConfig;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &ServerConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![GeneratedFile {
            path: OUTPUT_FILE.to_string(),
            content: self.render(ir, config)?,
        }])
    }
}
