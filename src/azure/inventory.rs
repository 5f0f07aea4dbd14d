//! Inventory source: the read side of the Azure walk.
//!
//! [`Inventory`] is the narrow interface the walk depends on;
//! [`AzCliInventory`] implements it on top of the logged-in `az` CLI.

use super::cli::{quote, run_json};
use crate::config;
use crate::models::{AccountRef, NetworkRef, RawRule, SubnetRef};
use serde::Deserialize;
use std::error::Error;

/// Read-only listing calls against a cloud inventory.
pub trait Inventory {
    /// Accounts whose display name contains `name_filter`.
    fn list_accounts(&self, name_filter: &str) -> Result<Vec<AccountRef>, Box<dyn Error>>;

    fn list_networks(&self, account_id: &str) -> Result<Vec<NetworkRef>, Box<dyn Error>>;

    fn list_subnets(
        &self,
        account_id: &str,
        resource_group: &str,
        network_name: &str,
    ) -> Result<Vec<SubnetRef>, Box<dyn Error>>;

    /// Security rules of one NSG, both directions, in Azure's order.
    fn get_firewall_group(
        &self,
        account_id: &str,
        resource_group: &str,
        group_name: &str,
    ) -> Result<Vec<RawRule>, Box<dyn Error>>;
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct NsgShow {
    #[serde(default)]
    security_rules: Vec<RawRule>,
}

/// [`Inventory`] backed by `az` commands.
#[derive(Debug, Default)]
pub struct AzCliInventory {
    /// Only return accounts of this tenant when set.
    pub tenant_id: Option<String>,
}

impl AzCliInventory {
    pub fn new(tenant_id: Option<String>) -> AzCliInventory {
        AzCliInventory { tenant_id }
    }

    fn query<T: serde::de::DeserializeOwned>(&self, cmd: &str) -> Result<T, Box<dyn Error>> {
        let parsed = run_json(cmd)?;
        // Rate limiting pause
        std::thread::sleep(std::time::Duration::from_millis(config::SLEEP_MSEC));
        Ok(parsed)
    }
}

impl Inventory for AzCliInventory {
    fn list_accounts(&self, name_filter: &str) -> Result<Vec<AccountRef>, Box<dyn Error>> {
        let accounts: Vec<AccountRef> = self.query("az account list --all --output json")?;
        let total = accounts.len();
        let accounts = filter_accounts(accounts, name_filter, self.tenant_id.as_deref());
        log::info!(
            "Subscriptions: {} of {total} match filter '{name_filter}'",
            accounts.len()
        );
        Ok(accounts)
    }

    fn list_networks(&self, account_id: &str) -> Result<Vec<NetworkRef>, Box<dyn Error>> {
        self.query(&format!(
            "az network vnet list --subscription {} --output json",
            quote(account_id)
        ))
    }

    fn list_subnets(
        &self,
        account_id: &str,
        resource_group: &str,
        network_name: &str,
    ) -> Result<Vec<SubnetRef>, Box<dyn Error>> {
        self.query(&format!(
            "az network vnet subnet list --subscription {} --resource-group {} --vnet-name {} --output json",
            quote(account_id),
            quote(resource_group),
            quote(network_name)
        ))
    }

    fn get_firewall_group(
        &self,
        account_id: &str,
        resource_group: &str,
        group_name: &str,
    ) -> Result<Vec<RawRule>, Box<dyn Error>> {
        let nsg: NsgShow = self.query(&format!(
            "az network nsg show --subscription {} --resource-group {} --name {} --output json",
            quote(account_id),
            quote(resource_group),
            quote(group_name)
        ))?;
        Ok(nsg.security_rules)
    }
}

/// Keep accounts whose name contains `name_filter` and, if given, belong to `tenant_id`.
pub fn filter_accounts(
    accounts: Vec<AccountRef>,
    name_filter: &str,
    tenant_id: Option<&str>,
) -> Vec<AccountRef> {
    accounts
        .into_iter()
        .filter(|a| a.display_name.contains(name_filter))
        .filter(|a| match (tenant_id, a.tenant_id.as_deref()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::cli::parse_json;
    use crate::models::Direction;

    fn account(name: &str, tenant: &str) -> AccountRef {
        AccountRef {
            id: format!("id-{name}"),
            display_name: name.to_string(),
            tenant_id: Some(tenant.to_string()),
        }
    }

    #[test]
    fn test_filter_accounts_by_name() {
        let accounts = vec![
            account("prod-core", "t1"),
            account("dev-core", "t1"),
            account("prod-edge", "t2"),
        ];
        let names: Vec<String> = filter_accounts(accounts.clone(), "prod", None)
            .into_iter()
            .map(|a| a.display_name)
            .collect();
        assert_eq!(names, vec!["prod-core", "prod-edge"]);

        assert_eq!(filter_accounts(accounts.clone(), "", None).len(), 3);
        assert_eq!(filter_accounts(accounts, "prod", Some("t2")).len(), 1);
    }

    #[test]
    fn test_parse_nsg_show_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/az_nsg_show_01.json")
            .expect("Error reading nsg fixture");
        let nsg: NsgShow = parse_json(&json).expect("Error parsing nsg fixture");
        assert_eq!(nsg.security_rules.len(), 4);
        assert_eq!(nsg.security_rules[0].name, "allow-https-from-app");
        assert_eq!(nsg.security_rules[0].direction, Direction::Inbound);
        assert_eq!(nsg.security_rules[1].source_address_prefixes.len(), 2);
        assert_eq!(nsg.security_rules[3].direction, Direction::Outbound);
    }

    #[test]
    fn test_parse_subnet_list_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/az_subnet_list_01.json")
            .expect("Error reading subnet fixture");
        let subnets: Vec<SubnetRef> = parse_json(&json).expect("Error parsing subnet fixture");
        assert_eq!(subnets.len(), 3);
        assert_eq!(subnets[0].address_ranges(), vec!["10.10.1.0/24"]);
        assert!(subnets[0].nsg_id().is_some());
        assert!(subnets[2].nsg_id().is_none());
    }
}
