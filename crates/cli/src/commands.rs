use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use dentaloffice_core::{supported_operations, BatchExecutor};
use dentaloffice_domain::{catalog, Config, Parameters};
use dentaloffice_infra::{config, DentalOfficeClient};
use serde_json::Value;
use tracing::info;

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => config::load_from_file(Some(path))?,
        None => config::load()?,
    };
    Ok(config)
}

/// Read work items from `path`: a JSON array of objects or a single object.
/// Without a file the batch is one empty item.
pub fn read_items(path: Option<&Path>) -> anyhow::Result<Vec<Parameters>> {
    let Some(path) = path else {
        return Ok(vec![Parameters::new()]);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read items file {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("items file {} is not valid JSON", path.display()))?;

    let raw = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        _ => bail!("items file must hold a JSON object or an array of objects"),
    };

    raw.into_iter()
        .enumerate()
        .map(|(index, item)| {
            Parameters::from_value(item).with_context(|| format!("item {index}"))
        })
        .collect()
}

pub async fn run(
    config_path: Option<PathBuf>,
    resource: &str,
    operation: &str,
    items_path: Option<&Path>,
    continue_on_fail: bool,
) -> anyhow::Result<()> {
    let items = read_items(items_path)?;
    let config = load_config(config_path)?;
    let client = DentalOfficeClient::new(&config)?;

    let executor = BatchExecutor::new(Arc::new(client)).with_continue_on_fail(continue_on_fail);
    let outputs = executor.execute(resource, operation, &items).await?;

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}

pub fn print_operations() {
    for (resource, operation) in supported_operations() {
        println!("{:<10} {}", resource.as_str(), operation.as_str());
    }
}

pub async fn check_token(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let client = DentalOfficeClient::new(&config)?;

    client.authenticate().await?;

    info!(client_id = %config.credentials.client_id, "credentials accepted");
    println!("credentials accepted for {}", config.credentials.api_base());
    Ok(())
}

pub fn print_options() {
    for (parameter, entries) in catalog::ALL {
        println!("{parameter}:");
        for (value, label) in *entries {
            println!("  {value:>3}  {label}");
        }
    }
}
