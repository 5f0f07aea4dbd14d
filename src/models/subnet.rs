//! Aggregated subnet record.

use super::RuleRecord;
use serde::{Deserialize, Serialize};

/// One subnet with the inbound rules of its NSG, keyed by `ip_range`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubnetRecord {
    /// Subscription display name.
    pub account: String,
    pub resource_group: String,
    pub network_name: String,
    pub subnet_name: String,
    pub ip_range: String,
    /// Discovery order, not sorted by priority.
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl SubnetRecord {
    /// `account/network/subnet`, the human readable identity used in the report.
    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.account, self.network_name, self.subnet_name)
    }
}
