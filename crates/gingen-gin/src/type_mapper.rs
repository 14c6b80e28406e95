use std::collections::BTreeSet;

use gingen_core::ir::IrType;

/// Import path for Go's date/time package.
pub const TIME_IMPORT: &str = "time";
/// Import path providing HTTP status codes.
pub const HTTP_IMPORT: &str = "net/http";
/// Import path of the gin web framework.
pub const GIN_IMPORT: &str = "github.com/gin-gonic/gin";

/// Map an `IrType` to its Go type name.
pub fn ir_type_to_go(ir_type: &IrType) -> String {
    match ir_type {
        IrType::Int32 => "int32".to_string(),
        IrType::Int64 => "int64".to_string(),
        IrType::Int => "int".to_string(),
        IrType::Float32 => "float32".to_string(),
        IrType::Float64 => "float64".to_string(),
        IrType::Byte => "byte".to_string(),
        IrType::Bytes => "[]byte".to_string(),
        IrType::DateTime => "time.Time".to_string(),
        IrType::String => "string".to_string(),
        IrType::Boolean => "bool".to_string(),
        IrType::Ref(name) => name.clone(),
    }
}

/// Map a field or parameter type to Go, honoring repetition and optionality.
///
/// Repeated values become slices. Optional scalars become pointers so that
/// an absent value stays distinguishable from the zero value; slices are
/// already nullable and are never wrapped.
pub fn go_field_type(ir_type: &IrType, repeated: bool, optional: bool) -> String {
    let base = ir_type_to_go(ir_type);
    if repeated {
        format!("[]{base}")
    } else if optional && *ir_type != IrType::Bytes {
        format!("*{base}")
    } else {
        base
    }
}

/// Standard library imports needed by the generated file, in gofmt order.
///
/// `types` must be the union of every type resolved in the run, so the result
/// does not depend on which section or field is rendered first.
pub fn std_imports(types: &BTreeSet<IrType>, needs_http: bool) -> Vec<&'static str> {
    let mut imports = Vec::new();
    if needs_http {
        imports.push(HTTP_IMPORT);
    }
    if types.iter().any(IrType::is_date_time) {
        imports.push(TIME_IMPORT);
    }
    imports
}
