//! Rule normalization.
//!
//! Turns a [`RawRule`] into a [`RuleRecord`] with list-typed fields, dropping
//! anything that is not inbound.

use crate::error::ReportError;
use crate::models::{Action, Direction, OneOrMany, RawRule, RuleRecord};

/// Normalize one raw rule.
///
/// # Returns
/// * `Ok(Some(rule))` - An inbound rule
/// * `Ok(None)` - The rule is not inbound and was dropped
/// * `Err` - Sources, ports or priority are missing entirely
pub fn normalize_rule(raw: &RawRule) -> Result<Option<RuleRecord>, ReportError> {
    if raw.direction != Direction::Inbound {
        log::trace!("Skipping {:?} rule '{}'", raw.direction, raw.name);
        return Ok(None);
    }

    let missing = |field| ReportError::MissingRuleField {
        rule: raw.name.clone(),
        field,
    };

    let source_addresses = OneOrMany::pick(
        &raw.source_address_prefixes,
        raw.source_address_prefix.as_deref(),
    )
    .ok_or_else(|| missing("source address prefix"))?
    .into_vec();

    let destination_ports = OneOrMany::pick(
        &raw.destination_port_ranges,
        raw.destination_port_range.as_deref(),
    )
    .ok_or_else(|| missing("destination port range"))?
    .into_vec();

    let priority = raw.priority.ok_or_else(|| missing("priority"))?;

    Ok(Some(RuleRecord {
        priority,
        name: raw.name.clone(),
        source_addresses,
        destination_ports,
        action: Action::from_access(&raw.access),
    }))
}

/// Normalize every rule of one NSG, keeping order. Fails on the first bad rule.
pub fn normalize_rules(raw_rules: &[RawRule]) -> Result<Vec<RuleRecord>, ReportError> {
    let mut rules = Vec::new();
    for raw in raw_rules {
        if let Some(rule) = normalize_rule(raw)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}
