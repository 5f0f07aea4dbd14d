//! Inventory listing records: subscriptions, vnets and subnets.

use serde::{Deserialize, Serialize};

/// One Azure subscription.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// A virtual network. The resource group is part of `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkRef {
    pub id: String,
    pub name: String,
}

/// Reference to an attached network security group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NsgRef {
    pub id: String,
}

/// A subnet as listed under its vnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubnetRef {
    pub name: String,
    #[serde(default)]
    pub address_prefix: Option<String>,
    /// Set instead of `address_prefix` on multi-prefix subnets.
    #[serde(default)]
    pub address_prefixes: Vec<String>,
    #[serde(default)]
    pub network_security_group: Option<NsgRef>,
}

impl SubnetRef {
    /// Address ranges to register this subnet under.
    pub fn address_ranges(&self) -> Vec<&str> {
        match &self.address_prefix {
            Some(prefix) => vec![prefix.as_str()],
            None => self.address_prefixes.iter().map(String::as_str).collect(),
        }
    }

    pub fn nsg_id(&self) -> Option<&str> {
        self.network_security_group.as_ref().map(|n| n.id.as_str())
    }
}
