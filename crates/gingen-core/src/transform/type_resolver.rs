use log::debug;

use crate::ir::IrType;

use super::name_normalizer::capitalize_first;

/// Map an OpenAPI `(type, format)` pair to an `IrType`.
///
/// Total over every input. An unrecognized format on a known type falls back
/// to that type's unformatted mapping. An unrecognized *type* is taken to be
/// the name of another generated type: `pet` becomes `Ref("Pet")`. That
/// convention changes the shape of the emitted code instead of failing, so it
/// is logged.
pub fn resolve_type(schema_type: &str, format: Option<&str>) -> IrType {
    match (schema_type, format) {
        ("integer", Some("int32")) => IrType::Int32,
        ("integer", Some("int64")) => IrType::Int64,
        ("integer", _) => IrType::Int,
        ("number", Some("double")) => IrType::Float64,
        ("number", _) => IrType::Float32,
        ("string", Some("byte")) => IrType::Byte,
        ("string", Some("binary")) => IrType::Bytes,
        ("string", Some("date" | "date-time")) => IrType::DateTime,
        ("string", _) => IrType::String,
        ("boolean", _) => IrType::Boolean,
        (other, _) => {
            let name = capitalize_first(other);
            debug!("type `{other}` is not a primitive, treating it as generated type `{name}`");
            IrType::Ref(name)
        }
    }
}
