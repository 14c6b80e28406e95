use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::TransformOptions;

/// Top-level project configuration loaded from `.gingen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GinGenConfig {
    pub input: String,
    /// Output file. Generated code goes to stdout when unset.
    pub output: Option<String>,
    pub naming: NamingConfig,
    pub server: ServerConfig,
}

impl Default for GinGenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            naming: NamingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl GinGenConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            naming_strategy: self.naming.strategy,
            aliases: self.naming.aliases.clone(),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from resolved operation name (operationId or route-derived) to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// How operation names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Use `operationId`, falling back to the route when it is absent.
    #[default]
    UseOperationId,
    UseRouteBased,
}

/// Names used in the generated server scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub package_name: String,
    pub interface_name: String,
    pub wrapper_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            package_name: "gen".to_string(),
            interface_name: "Handlerer".to_string(),
            wrapper_name: "ServerWrapper".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".gingen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GinGenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# gingen configuration
input: openapi.yaml
# output: server.gen.go   # omit to print to stdout

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # fetchAllPets: listPets     # operationId → custom name

server:
  package_name: gen
  interface_name: Handlerer
  wrapper_name: ServerWrapper
"#
}
