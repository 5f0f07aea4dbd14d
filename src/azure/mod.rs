//! Azure CLI interaction.
//!
//! - [`cli`] - Command execution for the `az` CLI
//! - [`inventory`] - The [`Inventory`] trait and its `az` implementation
//! - [`cache`] - Dated JSON cache of the collected registry
//! - [`resource_id`] - Resource id parsing

mod cache;
mod cli;
mod inventory;
mod resource_id;

pub use cache::{default_cache_file, load_cache, read_registry_cache, write_cache, RegistryCache};
pub use cli::{parse_json, run, run_json};
pub use inventory::{filter_accounts, AzCliInventory, Inventory};
pub use resource_id::ResourceId;
