//! Report processing logic.
//!
//! - [`normalize`] - Raw NSG rules to inbound [`RuleRecord`](crate::models::RuleRecord)s
//! - [`walk`] - Inventory walk building the [`SubnetRegistry`](crate::models::SubnetRegistry)
//! - [`resolve`] - Rule source to subnet label cross-reference
//! - [`flatten`] - Registry to report rows

mod flatten;
mod normalize;
mod resolve;
mod walk;

pub use flatten::{count_rows, flatten_registry, ReportLine, ReportRow, REPORT_COLUMNS};
pub use normalize::{normalize_rule, normalize_rules};
pub use resolve::resolve_source;
pub use walk::collect_registry;
