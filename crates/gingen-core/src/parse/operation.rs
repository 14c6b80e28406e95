//! Path items and everything hanging off a single verb: parameters and the
//! request body.

use indexmap::IndexMap;
use serde::Deserialize;

use super::schema::SchemaOrRef;
use crate::ir::HttpMethod;

/// The only request body content type that is bound.
pub const APPLICATION_JSON: &str = "application/json";

/// One entry of `paths`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,

    /// Default parameters for every verb on this path.
    pub parameters: Option<Vec<ParameterOrRef>>,

    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Declared operations, always in `HttpMethod::ALL` order regardless of
    /// the key order in the document.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

/// A single verb on a path.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,

    /// `None` when the key is absent; `Some(vec![])` overrides path-level
    /// parameters with an empty set.
    pub parameters: Option<Vec<ParameterOrRef>>,

    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBodyOrRef>,

    /// Kept opaque; responses are not interpreted.
    #[serde(default)]
    pub responses: IndexMap<String, serde_json::Value>,
}

impl Operation {
    /// The parameter list in effect for this operation. An operation-level
    /// list replaces the path-level one outright, it is never merged.
    pub fn effective_parameters<'a>(&'a self, item: &'a PathItem) -> &'a [ParameterOrRef] {
        self.parameters
            .as_deref()
            .or(item.parameters.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub schema: Option<SchemaOrRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,

    /// Keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    /// The schema declared under `application/json`, if any.
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        self.content
            .get(APPLICATION_JSON)
            .and_then(|media| media.schema.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}
