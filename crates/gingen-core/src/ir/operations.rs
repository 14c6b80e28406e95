use super::types::{IrType, NormalizedName};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// The recognized verbs, in the order operations are collected from a path item.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// The key under which this verb appears in a path item.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

/// A fully resolved API operation.
#[derive(Debug, Clone, PartialEq)]
pub struct IrOperation {
    pub name: NormalizedName,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<IrParameter>,
    /// Always an `IrType::Ref`; only referenced JSON bodies are bound.
    pub request_body: Option<IrType>,
}

impl IrOperation {
    pub fn path_params(&self) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == IrParameterLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == IrParameterLocation::Query)
    }

    pub fn has_path_params(&self) -> bool {
        self.path_params().next().is_some()
    }

    pub fn has_query_params(&self) -> bool {
        self.query_params().next().is_some()
    }

    /// Whether any part of the request must be bound before dispatch.
    pub fn has_bindings(&self) -> bool {
        self.has_query_params() || self.has_path_params() || self.request_body.is_some()
    }
}

/// A resolved path or query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct IrParameter {
    pub name: NormalizedName,
    pub location: IrParameterLocation,
    /// For `array` parameters this is the item type and `repeated` is set.
    pub param_type: IrType,
    pub repeated: bool,
    pub required: bool,
    pub description: Option<String>,
}

/// Parameter location. Header and cookie parameters are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
}
