//! Flattening of the registry into report lines.
//!
//! One row per (subnet, rule, source address), a separator after each subnet.

use crate::models::{Action, SubnetRegistry};
use crate::processing::resolve_source;

/// Number of columns in a report row.
pub const REPORT_COLUMNS: usize = 5;

/// One row of the NSG rule report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// `account/network/subnet` of the subnet the rule applies to.
    pub subnet: String,
    /// Rule name.
    pub rule: String,
    /// Source address, resolved to a subnet label where known.
    pub source: String,
    /// Allow or Deny.
    pub action: Action,
    /// Destination ports, comma joined.
    pub ports: String,
}

impl ReportRow {
    /// Cell values in column order.
    pub fn cells(&self) -> [&str; REPORT_COLUMNS] {
        [
            self.subnet.as_str(),
            self.rule.as_str(),
            self.source.as_str(),
            self.action.label(),
            self.ports.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Row(ReportRow),
    /// Blank row closing one subnet's block.
    Separator,
}

/// Flatten the registry in `all()` order, rules and sources in list order.
///
/// Subnets without rules still get their separator.
pub fn flatten_registry(registry: &SubnetRegistry) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    for subnet in registry.all() {
        let label = subnet.label();
        for rule in &subnet.rules {
            let ports = rule.ports_joined();
            for source in &rule.source_addresses {
                lines.push(ReportLine::Row(ReportRow {
                    subnet: label.clone(),
                    rule: rule.name.clone(),
                    source: resolve_source(registry, source),
                    action: rule.action,
                    ports: ports.clone(),
                }));
            }
        }
        lines.push(ReportLine::Separator);
    }

    log::info!(
        "Flattened {} subnets into {} rows",
        registry.len(),
        count_rows(&lines)
    );
    lines
}

/// Data rows only, separators excluded.
pub fn count_rows(lines: &[ReportLine]) -> usize {
    lines
        .iter()
        .filter(|l| matches!(l, ReportLine::Row(_)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleRecord, SubnetRecord};

    fn rule(name: &str, sources: &[&str], ports: &[&str], action: Action) -> RuleRecord {
        RuleRecord {
            priority: 100,
            name: name.to_string(),
            source_addresses: sources.iter().map(|s| s.to_string()).collect(),
            destination_ports: ports.iter().map(|s| s.to_string()).collect(),
            action,
        }
    }

    fn subnet(name: &str, range: &str, rules: Vec<RuleRecord>) -> SubnetRecord {
        SubnetRecord {
            account: "Acct".to_string(),
            resource_group: "rg".to_string(),
            network_name: "vnetX".to_string(),
            subnet_name: name.to_string(),
            ip_range: range.to_string(),
            rules,
        }
    }

    fn rows(lines: &[ReportLine]) -> Vec<&ReportRow> {
        lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Row(r) => Some(r),
                ReportLine::Separator => None,
            })
            .collect()
    }

    #[test]
    fn test_one_row_per_source() {
        let mut registry = SubnetRegistry::new();
        for (name, range) in [("S1", "10.0.1.0/24"), ("S2", "10.0.2.0/24")] {
            registry.put(
                range,
                subnet(
                    name,
                    range,
                    vec![rule("r", &["1.1.1.1", "2.2.2.2"], &["443"], Action::Allow)],
                ),
            );
        }

        let lines = flatten_registry(&registry);
        assert_eq!(count_rows(&lines), 4);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], ReportLine::Separator);
        assert_eq!(lines[5], ReportLine::Separator);
    }

    #[test]
    fn test_cross_subnet_resolution() {
        let mut registry = SubnetRegistry::new();
        registry.put("10.0.1.0/24", subnet("S1", "10.0.1.0/24", vec![]));
        registry.put(
            "10.0.2.0/24",
            subnet(
                "S2",
                "10.0.2.0/24",
                vec![rule("r1", &["10.0.1.0/24"], &["443"], Action::Allow)],
            ),
        );

        let lines = flatten_registry(&registry);
        let rows = rows(&lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].cells(),
            ["Acct/vnetX/S2", "r1", "Acct/vnetX/S1", "Allow", "443"]
        );
    }

    #[test]
    fn test_forward_reference_resolves() {
        let mut registry = SubnetRegistry::new();
        registry.put(
            "10.0.2.0/24",
            subnet(
                "S2",
                "10.0.2.0/24",
                vec![rule("r1", &["10.0.9.0/24"], &["22"], Action::Deny)],
            ),
        );
        registry.put("10.0.9.0/24", subnet("late", "10.0.9.0/24", vec![]));

        let lines = flatten_registry(&registry);
        assert_eq!(rows(&lines)[0].source, "Acct/vnetX/late");
    }

    #[test]
    fn test_ports_stay_in_one_cell() {
        let mut registry = SubnetRegistry::new();
        registry.put(
            "10.0.1.0/24",
            subnet(
                "S1",
                "10.0.1.0/24",
                vec![rule("web", &["*"], &["80", "443", "8000-8080"], Action::Deny)],
            ),
        );

        let lines = flatten_registry(&registry);
        let rows = rows(&lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ports, "80,443,8000-8080");
        assert_eq!(rows[0].cells()[3], "Deny");
        assert_eq!(rows[0].source, "*");
    }

    #[test]
    fn test_rule_and_source_order() {
        let mut registry = SubnetRegistry::new();
        registry.put(
            "10.0.1.0/24",
            subnet(
                "S1",
                "10.0.1.0/24",
                vec![
                    rule("second", &["b1", "b2"], &["1"], Action::Allow),
                    rule("first", &["a1"], &["2"], Action::Allow),
                ],
            ),
        );

        let lines = flatten_registry(&registry);
        let order: Vec<(&str, &str)> = rows(&lines)
            .iter()
            .map(|r| (r.rule.as_str(), r.source.as_str()))
            .collect();
        assert_eq!(order, vec![("second", "b1"), ("second", "b2"), ("first", "a1")]);
    }

    #[test]
    fn test_empty_registry() {
        let lines = flatten_registry(&SubnetRegistry::new());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_subnet_without_rules_gets_separator() {
        let mut registry = SubnetRegistry::new();
        registry.put("10.0.1.0/24", subnet("S1", "10.0.1.0/24", vec![]));
        assert_eq!(flatten_registry(&registry), vec![ReportLine::Separator]);
    }
}
