//! Runtime configuration, read from the environment (and `.env`).

use chrono_tz::Tz;
use std::env;

/// Pause between Azure CLI calls in milliseconds.
pub const SLEEP_MSEC: u64 = 100;

/// Upper bound on a single `az` response.
pub const MAX_CLI_OUTPUT_BYTES: usize = 5_000_000;

pub const DEFAULT_REPORT_FILE: &str = "NSG-QA.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "NSGRules";
pub const DEFAULT_CACHE_TZ: Tz = chrono_tz::Pacific::Auckland;

#[derive(Debug, Clone)]
pub struct Config {
    /// Only subscriptions whose display name contains this string are walked.
    pub account_filter: String,
    pub tenant_id: Option<String>,
    pub report_file: String,
    pub sheet_name: String,
    /// Explicit cache file, must exist when set.
    pub cache_file: Option<String>,
    pub cache_tz: Tz,
    pub print_rows: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            account_filter: String::new(),
            tenant_id: None,
            report_file: DEFAULT_REPORT_FILE.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            cache_file: None,
            cache_tz: DEFAULT_CACHE_TZ,
            print_rows: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let cache_tz = match get("NSG_CACHE_TZ") {
            Some(tz) => tz.parse::<Tz>().unwrap_or_else(|e| {
                log::warn!("Ignoring NSG_CACHE_TZ='{tz}': {e}");
                DEFAULT_CACHE_TZ
            }),
            None => DEFAULT_CACHE_TZ,
        };

        Config {
            account_filter: lookup("SUBSCRIPTION_MUST_CONTAIN_STR").unwrap_or_default(),
            tenant_id: get("AZURE_TENANT_ID"),
            report_file: get("NSG_REPORT_FILE").unwrap_or(defaults.report_file),
            sheet_name: get("NSG_REPORT_SHEET").unwrap_or(defaults.sheet_name),
            cache_file: get("NSG_CACHE_FILE"),
            cache_tz,
            print_rows: get("NSG_REPORT_PRINT")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
