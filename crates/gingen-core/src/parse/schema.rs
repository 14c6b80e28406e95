use indexmap::IndexMap;
use serde::Deserialize;

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// The subset of a JSON Schema object the generator reads.
///
/// `type` is kept as a raw string: values outside the primitive table are
/// treated as names of generated types rather than rejected.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<String>,

    pub format: Option<String>,

    pub description: Option<String>,

    // Object properties
    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub required: Vec<String>,

    // Array items
    pub items: Option<Box<SchemaOrRef>>,
}

impl Schema {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}
