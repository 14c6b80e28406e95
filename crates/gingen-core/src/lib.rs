pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use error::{BuildError, ConfigError, GeneratorError, ParseError};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from an IR spec.
///
/// The IR is target agnostic; each output language implements this trait
/// with its own type mapper and section renderers.
pub trait CodeGenerator {
    type Config;

    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
