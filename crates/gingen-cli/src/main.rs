use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::{debug, info};

use gingen_core::config::{self, CONFIG_FILE_NAME, GinGenConfig};
use gingen_core::ir::{IrParameterLocation, IrSchema, IrSpec};
use gingen_core::parse;
use gingen_core::parse::OpenApiSpec;
use gingen_core::transform;
use gingen_gin::GinServerGenerator;
use gingen_gin::type_mapper::{go_field_type, ir_type_to_go};

#[derive(Parser)]
#[command(name = "gingen", about = "OpenAPI 3.x to Go gin server generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the gin server scaffold
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the model built from an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new gingen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "gingen", &mut io::stdout());
            Ok(())
        }
    }
}

/// Load `.gingen.yaml` from the current directory, falling back to defaults.
fn load_project_config() -> Result<GinGenConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    if cfg.is_none() {
        debug!("no {CONFIG_FILE_NAME} found, using defaults");
    }
    Ok(cfg.unwrap_or_default())
}

fn read_spec(path: &Path) -> Result<OpenApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("invalid spec {}", path.display()))?;
    Ok(parsed)
}

fn load_spec(path: &Path, cfg: &GinGenConfig) -> Result<IrSpec> {
    let parsed = read_spec(path)?;
    build_model(&parsed, path, cfg)
}

/// Build the model with the project's naming options applied.
fn build_model(parsed: &OpenApiSpec, path: &Path, cfg: &GinGenConfig) -> Result<IrSpec> {
    let ir = transform::transform_with_options(parsed, &cfg.transform_options())
        .with_context(|| format!("failed to build model from {}", path.display()))?;
    Ok(ir)
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));

    let ir = load_spec(&input, &cfg)?;
    let code = GinServerGenerator.render(&ir, &cfg.server)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Generated {} operations and {} models → {}",
                ir.operations.len(),
                ir.schemas.len(),
                path.display()
            );
            try_run_gofmt(&path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

/// Run `gofmt -w` on the written file when gofmt is installed.
fn try_run_gofmt(path: &Path) {
    match Command::new("gofmt").arg("-w").arg(path).output() {
        Ok(result) if result.status.success() => {
            eprintln!("  formatted with gofmt");
        }
        Ok(result) => {
            eprintln!(
                "  warning: gofmt reported problems: {}",
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }
        Err(_) => {
            info!("gofmt not found, leaving {} as generated", path.display());
        }
    }
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = load_project_config()?;
    let parsed = read_spec(&input)?;

    eprintln!(
        "Valid OpenAPI {} spec: {}",
        parsed.openapi.as_deref().unwrap_or("3.x"),
        parsed.info.as_ref().map_or("(untitled)", |i| i.title.as_str())
    );
    if let Some(ref info) = parsed.info {
        eprintln!("  Version: {}", info.version);
    }
    if let Some(ref paths) = parsed.paths {
        eprintln!("  Paths: {}", paths.len());
    }

    // The spec is only usable if the model builds too
    let ir = build_model(&parsed, &input, &cfg)?;
    eprintln!("  Operations: {}", ir.operations.len());
    eprintln!("  Schemas: {}", ir.schemas.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let ir = load_spec(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = ir
        .schemas
        .iter()
        .map(|s| match s {
            IrSchema::Object(obj) => serde_json::json!({
                "name": obj.name.exported,
                "kind": "object",
                "fields": obj.fields.iter().map(|f| serde_json::json!({
                    "name": f.name.original,
                    "go_type": go_field_type(&f.field_type, f.repeated, false),
                    "required": f.required,
                })).collect::<Vec<_>>(),
            }),
            IrSchema::Array(arr) => serde_json::json!({
                "name": arr.name.exported,
                "kind": "array",
                "item_type": ir_type_to_go(&arr.item_type),
            }),
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            let parameters: Vec<serde_json::Value> = op
                .parameters
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name.original,
                        "in": match p.location {
                            IrParameterLocation::Path => "path",
                            IrParameterLocation::Query => "query",
                        },
                        "go_type": go_field_type(&p.param_type, p.repeated, !p.required),
                        "required": p.required,
                    })
                })
                .collect();
            serde_json::json!({
                "name": op.name.exported,
                "method": op.method.as_str(),
                "path": op.path,
                "parameters": parameters,
                "request_body": op.request_body.as_ref().map(ir_type_to_go),
            })
        })
        .collect();

    serde_json::json!({
        "info": ir.info.as_ref().map(|info| serde_json::json!({
            "title": info.title,
            "version": info.version,
        })),
        "schemas": schemas,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
