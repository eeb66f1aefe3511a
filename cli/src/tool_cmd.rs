//! `tool list`, `tool show` and `tool call`. Each returns the text to print so
//! `main` owns stdout.

use serde::Serialize;
use serde_json::Value;
use teleport::{ToolCallContent, ToolRegistry, ToolSourceError};

use crate::CliError;

/// Max characters of the first description line shown by `tool list`.
const LIST_DESC_MAX_LEN: usize = 72;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ToolShowFormat {
    #[default]
    Yaml,
    Json,
}

/// Name and first description line per tool, as an aligned table.
pub fn list_tools(registry: &ToolRegistry) -> String {
    let tools = registry.list();
    let name_width = tools.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
    let mut out = format!("{:<width$}\t{}\n", "NAME", "DESCRIPTION", width = name_width);
    for spec in &tools {
        let desc = spec
            .description
            .as_deref()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("");
        let desc = if desc.chars().count() > LIST_DESC_MAX_LEN {
            format!("{}...", desc.chars().take(LIST_DESC_MAX_LEN).collect::<String>())
        } else {
            desc.to_string()
        };
        out.push_str(&format!("{:<width$}\t{}\n", spec.name, desc, width = name_width));
    }
    out
}

/// Display shape of a tool spec; `input_schema` stays snake_case here.
#[derive(Serialize)]
struct ToolSpecOutput {
    name: String,
    description: Option<String>,
    input_schema: Value,
}

pub fn show_tool(
    registry: &ToolRegistry,
    name: &str,
    format: ToolShowFormat,
) -> Result<String, CliError> {
    let spec = registry
        .list()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| CliError::ToolNotFound(name.to_string()))?;
    let out = ToolSpecOutput {
        name: spec.name,
        description: spec.description,
        input_schema: spec.input_schema,
    };
    match format {
        ToolShowFormat::Yaml => {
            serde_yaml::to_string(&out).map_err(|e| CliError::Render(e.to_string()))
        }
        ToolShowFormat::Json => serde_json::to_string_pretty(&out)
            .map(|s| s + "\n")
            .map_err(|e| CliError::Render(e.to_string())),
    }
}

/// `--args` must be a JSON object; absent means `{}`.
pub fn parse_call_args(raw: Option<&str>) -> Result<Value, CliError> {
    let Some(raw) = raw else {
        return Ok(Value::Object(Default::default()));
    };
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    match value {
        Value::Object(_) => Ok(value),
        other => Err(CliError::InvalidArgs(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

pub async fn call_tool(
    registry: &ToolRegistry,
    name: &str,
    args: Value,
) -> Result<ToolCallContent, CliError> {
    registry.call(name, args).await.map_err(|e| match e {
        ToolSourceError::NotFound(name) => CliError::ToolNotFound(name),
        ToolSourceError::InvalidInput(msg) => CliError::InvalidArgs(msg),
    })
}
