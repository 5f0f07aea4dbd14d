//! Range-keyed subnet registry.
//!
//! Filled once by the inventory walk, then only read by the report.

use super::SubnetRecord;
use serde::de;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Subnets keyed by address range, iterated in first-discovery order.
///
/// A `put` for a range that is already present replaces the whole record but
/// keeps its position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubnetRegistry {
    records: Vec<SubnetRecord>,
    index: HashMap<String, usize>,
}

impl SubnetRegistry {
    pub fn new() -> SubnetRegistry {
        SubnetRegistry::default()
    }

    /// Insert or overwrite the record for `ip_range`.
    pub fn put(&mut self, ip_range: &str, record: SubnetRecord) {
        match self.index.get(ip_range) {
            Some(&i) => {
                log::warn!(
                    "Address range {ip_range} seen twice: '{old}' replaced by '{new}'",
                    old = self.records[i].label(),
                    new = record.label(),
                );
                self.records[i] = record;
            }
            None => {
                self.index.insert(ip_range.to_string(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn lookup(&self, ip_range: &str) -> Option<&SubnetRecord> {
        self.index.get(ip_range).map(|&i| &self.records[i])
    }

    pub fn all(&self) -> impl Iterator<Item = &SubnetRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total rule count across all subnets.
    pub fn rule_count(&self) -> usize {
        self.records.iter().map(|s| s.rules.len()).sum()
    }
}

impl Serialize for SubnetRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SubnetRegistry {
    fn deserialize<D>(deserializer: D) -> Result<SubnetRegistry, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<SubnetRecord>::deserialize(deserializer)?;
        let mut registry = SubnetRegistry::new();
        for record in records {
            for rule in &record.rules {
                if rule.source_addresses.is_empty() || rule.destination_ports.is_empty() {
                    return Err(de::Error::custom(format!(
                        "rule '{}' of subnet {} has no source addresses or no destination ports",
                        rule.name, record.ip_range
                    )));
                }
            }
            let key = record.ip_range.clone();
            registry.put(&key, record);
        }
        Ok(registry)
    }
}

impl fmt::Display for SubnetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SubnetRegistry ({} subnets, {} rules):",
            self.len(),
            self.rule_count()
        )?;
        for s in self.all() {
            writeln!(f, "  - {} {} ({} rules)", s.ip_range, s.label(), s.rules.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet(name: &str, range: &str) -> SubnetRecord {
        SubnetRecord {
            account: "Acct".to_string(),
            resource_group: "rg".to_string(),
            network_name: "vnet1".to_string(),
            subnet_name: name.to_string(),
            ip_range: range.to_string(),
            rules: vec![],
        }
    }

    #[test]
    fn test_put_and_lookup() {
        let mut registry = SubnetRegistry::new();
        assert!(registry.is_empty());
        registry.put("10.0.1.0/24", subnet("sub1", "10.0.1.0/24"));
        registry.put("10.0.2.0/24", subnet("sub2", "10.0.2.0/24"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("10.0.1.0/24").unwrap().subnet_name, "sub1");
        assert!(registry.lookup("10.0.3.0/24").is_none());
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut registry = SubnetRegistry::new();
        registry.put("10.0.1.0/24", subnet("first", "10.0.1.0/24"));
        registry.put("10.0.2.0/24", subnet("other", "10.0.2.0/24"));
        registry.put("10.0.1.0/24", subnet("second", "10.0.1.0/24"));

        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry.all().map(|s| s.subnet_name.as_str()).collect();
        assert_eq!(names, vec!["second", "other"]);
    }

    #[test]
    fn test_all_is_restartable() {
        let mut registry = SubnetRegistry::new();
        registry.put("10.0.1.0/24", subnet("sub1", "10.0.1.0/24"));
        registry.put("10.0.2.0/24", subnet("sub2", "10.0.2.0/24"));

        let first: Vec<_> = registry.all().collect();
        let second: Vec<_> = registry.all().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serde_keeps_order_and_index() {
        let mut registry = SubnetRegistry::new();
        registry.put("10.0.2.0/24", subnet("sub2", "10.0.2.0/24"));
        registry.put("10.0.1.0/24", subnet("sub1", "10.0.1.0/24"));

        let json = serde_json::to_string(&registry).expect("Error serializing registry");
        assert!(json.starts_with('['));
        let back: SubnetRegistry = serde_json::from_str(&json).expect("Error parsing registry");
        assert_eq!(back, registry);
        assert_eq!(back.lookup("10.0.1.0/24").unwrap().subnet_name, "sub1");
    }

    #[test]
    fn test_deserialize_rejects_empty_rule_lists() {
        let json = r#"[{"account":"Acct","resource_group":"rg","network_name":"vnet1",
            "subnet_name":"sub1","ip_range":"10.0.1.0/24",
            "rules":[{"priority":100,"name":"empty","source_addresses":[],
                      "destination_ports":["443"],"action":"Allow"}]}]"#;
        let err = serde_json::from_str::<SubnetRegistry>(json).unwrap_err();
        assert!(err.to_string().contains("rule 'empty'"), "unexpected error: {err}");

        let no_ports = json
            .replace(r#""source_addresses":[]"#, r#""source_addresses":["*"]"#)
            .replace(r#""destination_ports":["443"]"#, r#""destination_ports":[]"#);
        assert!(serde_json::from_str::<SubnetRegistry>(&no_ports).is_err());

        let valid = no_ports.replace(r#""destination_ports":[]"#, r#""destination_ports":["443"]"#);
        let registry: SubnetRegistry = serde_json::from_str(&valid).expect("valid registry");
        assert_eq!(registry.rule_count(), 1);
    }
}
