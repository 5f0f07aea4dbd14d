//! NSG security rules, raw and normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
    #[serde(other)]
    Other,
}

/// Rule access after normalization. Anything but `Allow` is `Deny`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Allow,
    Deny,
}

impl Action {
    pub fn from_access(access: &str) -> Action {
        if access == "Allow" {
            Action::Allow
        } else {
            Action::Deny
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Allow => "Allow",
            Action::Deny => "Deny",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field Azure reports either as a scalar or as a list.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Non-empty list wins, else the scalar. `None` when neither is set.
    pub fn pick(list: &[String], scalar: Option<&str>) -> Option<OneOrMany> {
        if !list.is_empty() {
            Some(OneOrMany::Many(list.to_vec()))
        } else {
            scalar.map(|s| OneOrMany::One(s.to_string()))
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// A security rule as returned by `az network nsg show`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawRule {
    pub name: String,
    #[serde(default)]
    pub priority: Option<i32>,
    pub direction: Direction,
    pub access: String,
    #[serde(default)]
    pub source_address_prefix: Option<String>,
    #[serde(default)]
    pub source_address_prefixes: Vec<String>,
    #[serde(default)]
    pub destination_port_range: Option<String>,
    #[serde(default)]
    pub destination_port_ranges: Vec<String>,
}

/// A normalized inbound rule. Both lists are never empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleRecord {
    pub priority: i32,
    pub name: String,
    pub source_addresses: Vec<String>,
    pub destination_ports: Vec<String>,
    pub action: Action,
}

impl RuleRecord {
    /// Ports as one cell value.
    pub fn ports_joined(&self) -> String {
        self.destination_ports.join(",")
    }
}
