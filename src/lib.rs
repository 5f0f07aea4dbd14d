//! Inbound NSG rule report for Azure subscriptions.
//!
//! Two phases: [`get_registry`] collects every subnet and its inbound rules into
//! a [`SubnetRegistry`](models::SubnetRegistry); [`generate_report`] flattens it
//! into rows and writes them through a [`SheetWriter`](output::SheetWriter).

pub mod azure;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use models::SubnetRegistry;
use output::{print_report, write_report, SheetWriter};
use processing::flatten_registry;
use std::error::Error;
use std::path::Path;

/// Phase 1: registry from the cache file, or from a fresh `az` walk.
pub fn get_registry(config: &Config) -> Result<SubnetRegistry, Box<dyn Error>> {
    let registry = azure::read_registry_cache(config.cache_file.as_deref(), config)?;
    log::debug!("{registry}");
    Ok(registry)
}

/// Phase 2: flatten the registry and write the report sheet.
///
/// # Returns
/// * `Ok(n)` - Number of data rows written
pub fn generate_report<W: SheetWriter + ?Sized>(
    registry: &SubnetRegistry,
    writer: &mut W,
    config: &Config,
) -> Result<usize, Box<dyn Error>> {
    let lines = flatten_registry(registry);
    if config.print_rows {
        print_report(&lines);
    }
    write_report(
        writer,
        &config.sheet_name,
        &lines,
        Path::new(&config.report_file),
    )
}
