use std::collections::BTreeSet;
use std::fmt;

/// A fully resolved, generator-ready intermediate representation of an OpenAPI spec.
///
/// Built once per run and never mutated afterwards. Operations and schemas
/// keep the order in which they appear in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct IrSpec {
    pub info: Option<IrInfo>,
    pub schemas: Vec<IrSchema>,
    pub operations: Vec<IrOperation>,
}

impl IrSpec {
    /// Every type resolved anywhere in the run: parameters, request bodies,
    /// schema fields and array items.
    ///
    /// Import decisions are made from this set so they never depend on the
    /// order in which sections or fields are visited.
    pub fn resolved_types(&self) -> BTreeSet<IrType> {
        let operation_types = self.operations.iter().flat_map(|op| {
            op.parameters
                .iter()
                .map(|p| p.param_type.clone())
                .chain(op.request_body.clone())
        });
        let schema_types = self.schemas.iter().flat_map(|schema| match schema {
            IrSchema::Object(obj) => obj.fields.iter().map(|f| f.field_type.clone()).collect(),
            IrSchema::Array(arr) => vec![arr.item_type.clone()],
        });
        operation_types.chain(schema_types).collect()
    }
}

/// API metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A name as written in the document, plus its exported form.
///
/// The exported form uppercases only the first character; the rest of the
/// name is left untouched (`getItem` → `GetItem`, `pet_id` → `Pet_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub exported: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A resolved type. Target generators map each variant to a concrete type
/// name in their own language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IrType {
    /// `integer` / `int32`
    Int32,
    /// `integer` / `int64`
    Int64,
    /// `integer` without a recognized format
    Int,
    /// `number` / `float`, or `number` without a recognized format
    Float32,
    /// `number` / `double`
    Float64,
    /// `string` / `byte`
    Byte,
    /// `string` / `binary`
    Bytes,
    /// `string` / `date` and `string` / `date-time`
    DateTime,
    String,
    Boolean,
    /// A generated type, already capitalized.
    Ref(String),
}

impl IrType {
    /// Whether rendering this type needs date/time support imported.
    pub fn is_date_time(&self) -> bool {
        matches!(self, IrType::DateTime)
    }
}

// Re-export schema and operation types for convenience
pub use super::operations::*;
pub use super::schemas::*;
