pub mod name_normalizer;
pub mod schema_resolver;
pub mod spec_to_ir;
pub mod type_resolver;

pub use spec_to_ir::{TransformOptions, transform, transform_with_options};
pub use type_resolver::resolve_type;
