use gingen_core::GeneratorError;
use gingen_core::config::ServerConfig;
use gingen_core::ir::{HttpMethod, IrOperation, IrSpec};
use log::trace;
use minijinja::context;

use super::render;

/// Emit `RegisterHandlers`, which wraps the handlers once and registers one
/// route per operation.
pub fn emit_routes(ir: &IrSpec, config: &ServerConfig) -> Result<String, GeneratorError> {
    let routes: Vec<String> = ir.operations.iter().map(route_line).collect();
    render(
        "routes.go.j2",
        include_str!("../../templates/routes.go.j2"),
        context! {
            interface_name => config.interface_name,
            wrapper_name => config.wrapper_name,
            routes => routes,
        },
    )
}

fn route_line(op: &IrOperation) -> String {
    let path = gin_path(&op.path);
    trace!("route {} {} -> {}", op.method.as_str(), path, op.name.exported);
    match op.method {
        // gin has no TRACE shorthand on its router
        HttpMethod::Trace => format!(
            "router.Handle(\"TRACE\", \"{path}\", wrapper.{})",
            op.name.exported
        ),
        method => format!(
            "router.{}(\"{path}\", wrapper.{})",
            method.as_str(),
            op.name.exported
        ),
    }
}

/// Rewrite `{name}` placeholders to gin's `:name` syntax.
///
/// An unterminated `{` is left untouched along with the rest of the path.
pub fn gin_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push(':');
        out.push_str(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::ir_from_yaml;

    #[test]
    fn test_gin_path() {
        assert_eq!(gin_path("/items"), "/items");
        assert_eq!(gin_path("/items/{id}"), "/items/:id");
        assert_eq!(
            gin_path("/users/{userId}/posts/{postId}/edit"),
            "/users/:userId/posts/:postId/edit"
        );
        assert_eq!(gin_path("/files/{name}.json"), "/files/:name.json");
        assert_eq!(gin_path("/broken/{id"), "/broken/{id");
    }

    #[test]
    fn test_one_route_per_operation() {
        let ir = ir_from_yaml(
            r#"
openapi: "3.0.3"
paths:
  /items/{id}:
    get:
      operationId: getItem
    delete:
      operationId: deleteItem
    trace:
      operationId: traceItem
  /items:
    post:
      operationId: addItem
components:
  schemas: {}
"#,
        );
        let out = emit_routes(&ir, &ServerConfig::default()).unwrap();
        assert_eq!(
            out,
            "func RegisterHandlers(router *gin.Engine, handlers Handlerer) *gin.Engine {\n\
             \twrapper := ServerWrapper{\n\
             \t\tHandlers: handlers,\n\
             \t}\n\
             \n\
             \trouter.GET(\"/items/:id\", wrapper.GetItem)\n\
             \trouter.DELETE(\"/items/:id\", wrapper.DeleteItem)\n\
             \trouter.Handle(\"TRACE\", \"/items/:id\", wrapper.TraceItem)\n\
             \trouter.POST(\"/items\", wrapper.AddItem)\n\
             \n\
             \treturn router\n\
             }\n"
        );
    }
}
