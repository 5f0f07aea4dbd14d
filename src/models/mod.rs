//! Domain models for the NSG rule report.
//!
//! - [`AccountRef`], [`NetworkRef`], [`SubnetRef`] - topology as listed by the inventory
//! - [`RawRule`] and [`RuleRecord`] - NSG rules before and after normalization
//! - [`SubnetRecord`] and [`SubnetRegistry`] - the aggregated, range-keyed view

mod account;
mod registry;
mod rule;
mod subnet;

pub use account::{AccountRef, NetworkRef, NsgRef, SubnetRef};
pub use registry::SubnetRegistry;
pub use rule::{Action, Direction, OneOrMany, RawRule, RuleRecord};
pub use subnet::SubnetRecord;
