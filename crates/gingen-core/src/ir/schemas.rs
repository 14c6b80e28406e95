use super::types::{IrType, NormalizedName};

/// A resolved schema in the IR.
#[derive(Debug, Clone, PartialEq)]
pub enum IrSchema {
    Object(IrObjectSchema),
    Array(IrArraySchema),
}

impl IrSchema {
    pub fn name(&self) -> &NormalizedName {
        match self {
            IrSchema::Object(o) => &o.name,
            IrSchema::Array(a) => &a.name,
        }
    }
}

/// An object schema with typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IrObjectSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub fields: Vec<IrField>,
}

/// A field on an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    pub name: NormalizedName,
    /// For `array` properties this is the item type and `repeated` is set.
    pub field_type: IrType,
    pub repeated: bool,
    pub required: bool,
    pub description: Option<String>,
}

/// A named sequence of a single item type.
#[derive(Debug, Clone, PartialEq)]
pub struct IrArraySchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub item_type: IrType,
}
