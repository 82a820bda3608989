pub mod cli;
pub mod config;
pub mod filter;
pub mod scanner;

use crate::config::ToolConfig;
use anyhow::Context;
use serde_json::json;
use std::path::Path;

pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use filter::{
    BitwiseOp, CompareOp, Comparator, ComparatorKind, Filter, FilterError, FilterKind,
    SingleColumnValueBuilder,
};
pub use scanner::{FilterExpressionSink, ScanRequest, attach_filter};

const ENV_LOG: &str = "SCAN_FILTER_LOG";

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "scan_filter=debug",
        _ => "scan_filter=trace",
    };

    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter.to_string());

    // A subscriber may already be installed when run() is embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .try_init();
}

fn load_filter(path: &Path, quiet: bool) -> anyhow::Result<Filter> {
    let filter = filter::load_description(path)?;
    tracing::trace!(path = %path.display(), kind = filter.type_name(), "loaded filter description");
    if !quiet {
        filter::print_filter_warnings(&filter);
    }
    Ok(filter)
}

fn build_scan_request(
    filter: &Filter,
    config: &ToolConfig,
    batch: Option<u32>,
    start_row: Option<&str>,
    end_row: Option<&str>,
    columns: &[String],
) -> ScanRequest {
    let mut request = ScanRequest::new()
        .batch(batch.or(config.scanner.batch))
        .max_versions(config.scanner.max_versions)
        .caching(config.scanner.caching)
        .cache_blocks(config.scanner.cache_blocks);

    if let Some(row) = start_row {
        request = request.start_row(row);
    }
    if let Some(row) = end_row {
        request = request.end_row(row);
    }
    for column in config.scanner.columns.iter().chain(columns) {
        request = request.column(column.as_str());
    }

    request.with_filter(filter)
}

fn print_listing(format: OutputFormat) -> anyhow::Result<()> {
    let ops: Vec<&str> = CompareOp::ALL.iter().map(|op| op.token()).collect();
    let bitwise: Vec<&str> = BitwiseOp::ALL.iter().map(|op| op.token()).collect();

    match format {
        OutputFormat::Text => {
            println!("Filters:");
            for name in filter::FILTER_TYPE_NAMES {
                println!("  - {}", name);
            }
            println!("\nComparators:");
            for name in filter::COMPARATOR_TYPE_NAMES {
                println!("  - {}", name);
            }
            println!("\nCompare operators: {}", ops.join(", "));
            println!("Bitwise operators: {}", bitwise.join(", "));
        }
        OutputFormat::Json => {
            let listing = json!({
                "filters": filter::FILTER_TYPE_NAMES,
                "comparators": filter::COMPARATOR_TYPE_NAMES,
                "compareOperators": ops,
                "bitwiseOperators": bitwise,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_logging(cli.verbose);

    let tool_config = config::load_config(cli.config.as_deref())?;
    tracing::debug!(profile = %tool_config.profile_name, "loaded config");

    match &cli.command {
        Commands::Render { file } => {
            let filter = load_filter(file, cli.quiet)?;
            let expression = filter.render();

            match cli.format {
                OutputFormat::Text => println!("{}", expression),
                OutputFormat::Json => {
                    let body = json!({ "filter": expression });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
            }
        }
        Commands::Scanner {
            file,
            batch,
            start_row,
            end_row,
            columns,
        } => {
            let filter = load_filter(file, cli.quiet)?;
            let request = build_scan_request(
                &filter,
                &tool_config,
                *batch,
                start_row.as_deref(),
                end_row.as_deref(),
                columns,
            );

            let body = request
                .to_json()
                .context("Failed to serialize scan request")?;
            println!("{}", body);
        }
        Commands::List => print_listing(cli.format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_merges_config_and_arguments() {
        let mut config = ToolConfig::default();
        config.scanner.max_versions = Some(2);
        config.scanner.columns = vec!["first".to_string()];

        let request = build_scan_request(
            &Filter::key_only(),
            &config,
            None,
            Some("a"),
            None,
            &["second:b".to_string()],
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["batch"], 10);
        assert_eq!(value["maxVersions"], 2);
        assert_eq!(value["startRow"], "YQ==");
        assert_eq!(value["column"], json!(["Zmlyc3Q=", "c2Vjb25kOmI="]));
        assert_eq!(value["filter"], "KeyOnly()");
    }

    #[test]
    fn test_batch_argument_overrides_config() {
        let request = build_scan_request(
            &Filter::key_only(),
            &ToolConfig::default(),
            Some(50),
            None,
            None,
            &[],
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["batch"], 50);
    }
}
