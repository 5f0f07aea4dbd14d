//! Inventory walk: subscriptions → vnets → subnets → NSG rules.
//!
//! Builds the [`SubnetRegistry`] in a single pass and hands it back by value.

use crate::azure::{Inventory, ResourceId};
use crate::error::ReportError;
use crate::models::{RuleRecord, SubnetRecord, SubnetRef, SubnetRegistry};
use crate::processing::normalize_rules;
use std::collections::HashMap;
use std::error::Error;

/// Walk every account matching `name_filter` and collect its subnets.
///
/// Rules of an NSG attached to several subnets are fetched once.
pub fn collect_registry<I>(inventory: &I, name_filter: &str) -> Result<SubnetRegistry, Box<dyn Error>>
where
    I: Inventory + ?Sized,
{
    log::info!("#Start collect_registry() filter='{name_filter}'");
    let mut walk = Walk {
        inventory,
        registry: SubnetRegistry::new(),
        nsg_rules: HashMap::new(),
    };

    for account in inventory.list_accounts(name_filter)? {
        log::info!("Subscription '{}' ({})", account.display_name, account.id);
        for network in inventory.list_networks(&account.id)? {
            let network_id = ResourceId::parse(&network.id)?;
            let subnets =
                inventory.list_subnets(&account.id, &network_id.resource_group, &network.name)?;
            log::debug!("VNET '{}' has {} subnets", network.name, subnets.len());

            for subnet in subnets {
                walk.add_subnet(
                    &account.display_name,
                    &network_id.resource_group,
                    &network.name,
                    &subnet,
                )?;
            }
        }
    }

    log::info!(
        "Collected {} subnets, {} inbound rules, {} NSGs",
        walk.registry.len(),
        walk.registry.rule_count(),
        walk.nsg_rules.len()
    );
    Ok(walk.registry)
}

struct Walk<'a, I: ?Sized> {
    inventory: &'a I,
    registry: SubnetRegistry,
    /// Normalized rules per NSG id (lower case).
    nsg_rules: HashMap<String, Vec<RuleRecord>>,
}

impl<'a, I: Inventory + ?Sized> Walk<'a, I> {
    fn add_subnet(
        &mut self,
        account: &str,
        resource_group: &str,
        network_name: &str,
        subnet: &SubnetRef,
    ) -> Result<(), Box<dyn Error>> {
        let ranges = subnet.address_ranges();
        if ranges.is_empty() {
            return Err(ReportError::MissingAddressRange(subnet.name.clone()).into());
        }

        let rules = match subnet.nsg_id() {
            Some(nsg_id) => self.rules_for(nsg_id)?,
            None => Vec::new(),
        };

        for ip_range in ranges {
            self.registry.put(
                ip_range,
                SubnetRecord {
                    account: account.to_string(),
                    resource_group: resource_group.to_string(),
                    network_name: network_name.to_string(),
                    subnet_name: subnet.name.clone(),
                    ip_range: ip_range.to_string(),
                    rules: rules.clone(),
                },
            );
        }
        Ok(())
    }

    fn rules_for(&mut self, nsg_id: &str) -> Result<Vec<RuleRecord>, Box<dyn Error>> {
        let key = nsg_id.to_lowercase();
        if let Some(rules) = self.nsg_rules.get(&key) {
            return Ok(rules.clone());
        }

        let nsg = ResourceId::parse(nsg_id)?;
        let raw_rules =
            self.inventory
                .get_firewall_group(&nsg.subscription, &nsg.resource_group, &nsg.name)?;
        let rules = normalize_rules(&raw_rules)?;
        log::debug!(
            "NSG '{}': {} rules, {} inbound",
            nsg.name,
            raw_rules.len(),
            rules.len()
        );
        self.nsg_rules.insert(key, rules.clone());
        Ok(rules)
    }
}
