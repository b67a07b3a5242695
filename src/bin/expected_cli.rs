use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use expected_counts::error::util::safe_read_to_string;
use expected_counts::service::compute_expected;
use expected_counts::{QueryRequest, StorageConfig, TableLoader};
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(about = "Compute expected participant, sample and file counts for one study.")]
struct Args {
    /// Study identifier.
    #[arg(long)]
    study: String,

    /// Path to a JSON file with a `filters` object.
    #[arg(long)]
    filters: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let raw = safe_read_to_string(&args.filters, "filters")?;
    let document: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.filters.display()))?;
    let filters = filters_from_document(&document)?;

    let storage = StorageConfig::from_env()?;
    let loader = TableLoader::from_config(&storage)?;
    let request = QueryRequest::new(args.study, filters);
    let expected = compute_expected(&loader, &request)
        .await
        .with_context(|| format!("Failed to compute expected counts for {}", request.study))?;

    let output = json!({
        "study": request.study,
        "filters": request.filters,
        "expected": expected,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Take the `filters` object out of a filters file; a missing key means no filters
fn filters_from_document(document: &Value) -> Result<Map<String, Value>> {
    let Value::Object(document) = document else {
        anyhow::bail!("filters file must contain a JSON object, got {document}");
    };
    match document.get("filters") {
        None => Ok(Map::new()),
        Some(Value::Object(filters)) => Ok(filters.clone()),
        Some(other) => anyhow::bail!("`filters` must be an object, got {other}"),
    }
}
