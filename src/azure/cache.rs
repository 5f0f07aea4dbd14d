//! Cache management for the collected subnet registry.
//!
//! Avoids walking every subscription again on a re-run the same day. The cache
//! records the account filter and tenant it was collected under, a cache
//! written for other filters is never served.

use super::inventory::AzCliInventory;
use crate::config::Config;
use crate::models::SubnetRegistry;
use crate::processing::collect_registry;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::ErrorKind;
use std::path::Path;

/// On-disk cache: the registry plus the filters it was collected under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistryCache {
    pub account_filter: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub subnets: SubnetRegistry,
}

impl RegistryCache {
    pub fn new(config: &Config, subnets: SubnetRegistry) -> RegistryCache {
        RegistryCache {
            account_filter: config.account_filter.clone(),
            tenant_id: config.tenant_id.clone(),
            subnets,
        }
    }

    /// True when the cache was collected with the same filters as `config`.
    pub fn matches(&self, config: &Config) -> bool {
        self.account_filter == config.account_filter && self.tenant_id == config.tenant_id
    }
}

/// Default cache file name for today's date in `tz`.
pub fn default_cache_file(tz: Tz) -> String {
    let now = chrono::Utc::now().with_timezone(&tz);
    format!("nsg_cache_{}.json", now.format("%Y-%m-%d"))
}

/// Read the registry from cache, or walk Azure and write the cache.
///
/// # Arguments
/// * `cache_file` - Optional path to a specific cache file. If None, uses today's dated name.
/// * `config` - Filters for the walk when the cache is missing.
///
/// # Returns
/// * `Ok(SubnetRegistry)` - From cache or from a fresh walk
/// * `Err` - If the given cache file doesn't exist, can't be read or parsed,
///   was written for other filters, or the walk fails
pub fn read_registry_cache(
    cache_file: Option<&str>,
    config: &Config,
) -> Result<SubnetRegistry, Box<dyn Error>> {
    let walk = |config: &Config| {
        let inventory = AzCliInventory::new(config.tenant_id.clone());
        collect_registry(&inventory, &config.account_filter)
    };

    match cache_file {
        Some(file) => {
            if !Path::new(file).exists() {
                return Err(format!("Cache file does not exist: {file}").into());
            }
            log::info!("Using provided cache file: {file}");
            read_or_collect(file, true, config, walk)
        }
        None => read_or_collect(&default_cache_file(config.cache_tz), false, config, walk),
    }
}

/// Serve `cache_file` when it matches `config`, else run `collect` and store its result.
///
/// A cache for other filters is an error when `explicit`, otherwise it is
/// treated as missing and overwritten.
fn read_or_collect<F>(
    cache_file: &str,
    explicit: bool,
    config: &Config,
    collect: F,
) -> Result<SubnetRegistry, Box<dyn Error>>
where
    F: FnOnce(&Config) -> Result<SubnetRegistry, Box<dyn Error>>,
{
    match load_cache(cache_file)? {
        Some(cache) if cache.matches(config) => return Ok(cache.subnets),
        Some(cache) if explicit => {
            return Err(format!(
                "Cache file {cache_file} was collected for filter '{}' tenant {:?}, not filter '{}' tenant {:?}",
                cache.account_filter, cache.tenant_id, config.account_filter, config.tenant_id
            )
            .into());
        }
        Some(cache) => log::warn!(
            "Cache file {cache_file} was collected for filter '{}', walking again",
            cache.account_filter
        ),
        None => log::warn!("Cache file not found: {cache_file}"),
    }

    let cache = RegistryCache::new(config, collect(config)?);
    store_cache(cache_file, &cache);
    Ok(cache.subnets)
}

/// Load a cache file; `Ok(None)` only when it does not exist.
pub fn load_cache(cache_file: &str) -> Result<Option<RegistryCache>, Box<dyn Error>> {
    let json = match std::fs::read_to_string(cache_file) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("Error reading cache file {cache_file}: {e}").into()),
    };
    log::info!("Reading from cache file: {cache_file}");
    let cache: RegistryCache = serde_json::from_str(&json)
        .map_err(|e| format!("Error parsing cache JSON {cache_file}: {e}"))?;
    Ok(Some(cache))
}

pub fn write_cache(cache_file: &str, cache: &RegistryCache) -> Result<(), Box<dyn Error>> {
    let json =
        serde_json::to_string_pretty(cache).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing data to cache file: {cache_file}");
    std::fs::write(cache_file, json)
        .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;
    Ok(())
}

/// Write the cache, a failure only costs the next run a walk.
fn store_cache(cache_file: &str, cache: &RegistryCache) {
    if let Err(e) = write_cache(cache_file, cache) {
        log::warn!("Continuing without cache: {e}");
    }
}
