//! One emitter per section of the generated file. Each is a pure function of
//! the IR and the server config; `GinServerGenerator` composes them in order.

pub mod header;
pub mod imports;
pub mod interface;
pub mod models;
pub mod params;
pub mod routes;
pub mod wrapper;

use gingen_core::GeneratorError;
use gingen_core::ir::IrOperation;
use minijinja::{AutoEscape, Environment, Value};

use crate::type_mapper::ir_type_to_go;

/// Render a single template with the shared whitespace settings.
pub(crate) fn render(name: &str, source: &str, ctx: Value) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(name, source).map_err(render_error)?;
    let tmpl = env.get_template(name).map_err(render_error)?;
    tmpl.render(ctx).map_err(render_error)
}

fn render_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render(err.to_string())
}

/// Turn a free-form description into `//` comment lines.
pub(crate) fn doc_lines(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    text.trim()
        .lines()
        .map(|line| match line.trim_end() {
            "" => "//".to_string(),
            line => format!("// {line}"),
        })
        .collect()
}

/// A struct field before column alignment.
pub(crate) struct GoField {
    pub name: String,
    pub go_type: String,
    pub tag: String,
    /// Trailing `//` comment.
    pub comment: Option<String>,
}

/// First line of a description, for use as a trailing comment.
pub(crate) fn trailing_comment(text: Option<&str>) -> Option<String> {
    text.and_then(|t| t.trim().lines().next())
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
}

/// Lay out struct fields in aligned name/type/tag/comment columns, the way
/// gofmt does. Lines without a comment carry no trailing padding.
pub(crate) fn align_fields(fields: &[GoField]) -> Vec<String> {
    let name_width = fields.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    let type_width = fields.iter().map(|f| f.go_type.chars().count()).max().unwrap_or(0);
    let columns: Vec<String> = fields
        .iter()
        .map(|f| {
            format!(
                "{:<name_width$} {:<type_width$} `{}`",
                f.name, f.go_type, f.tag
            )
        })
        .collect();
    let comment_at = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    columns
        .into_iter()
        .zip(fields)
        .map(|(line, f)| match f.comment {
            Some(ref comment) => format!("{line:<comment_at$} // {comment}"),
            None => line,
        })
        .collect()
}

/// A request part bound before the handler is called.
pub(crate) struct Binding {
    /// Local variable and handler parameter name.
    pub var: &'static str,
    pub go_type: String,
    /// The `gin.Context` method that populates the variable.
    pub bind_fn: &'static str,
}

pub(crate) fn query_params_type(op: &IrOperation) -> String {
    format!("{}QueryParams", op.name.exported)
}

pub(crate) fn uri_params_type(op: &IrOperation) -> String {
    format!("{}UriParams", op.name.exported)
}

/// The bindings an operation needs, always in the order query, URI, body.
///
/// Both the interface signature and the wrapper's call site use this order.
pub(crate) fn bindings(op: &IrOperation) -> Vec<Binding> {
    let mut out = Vec::new();
    if op.has_query_params() {
        out.push(Binding {
            var: "queryParams",
            go_type: query_params_type(op),
            bind_fn: "ShouldBindQuery",
        });
    }
    if op.has_path_params() {
        out.push(Binding {
            var: "uriParams",
            go_type: uri_params_type(op),
            bind_fn: "ShouldBindUri",
        });
    }
    if let Some(ref body) = op.request_body {
        out.push(Binding {
            var: "body",
            go_type: ir_type_to_go(body),
            bind_fn: "ShouldBindJSON",
        });
    }
    out
}

#[cfg(test)]
pub(crate) fn ir_from_yaml(yaml: &str) -> gingen_core::ir::IrSpec {
    let spec = gingen_core::parse::from_yaml(yaml).expect("fixture should parse");
    gingen_core::transform::transform(&spec).expect("fixture should build")
}
