//! Cross-reference of rule sources to known subnets.

use crate::models::SubnetRegistry;

/// Exact-match `source` against the registry keys.
///
/// Returns `account/network/subnet` for a known range, else `source` unchanged.
/// No CIDR containment: `10.0.1.0/25` does not match `10.0.1.0/24`.
pub fn resolve_source(registry: &SubnetRegistry, source: &str) -> String {
    match registry.lookup(source) {
        Some(subnet) => subnet.label(),
        None => source.to_string(),
    }
}
