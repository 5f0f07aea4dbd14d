//! Azure resource id parsing.

use crate::error::ReportError;

/// Parts of `/subscriptions/{sub}/resourceGroups/{rg}/providers/.../{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub subscription: String,
    pub resource_group: String,
    pub name: String,
}

impl ResourceId {
    pub fn parse(id: &str) -> Result<ResourceId, ReportError> {
        let parts: Vec<&str> = id.trim_end_matches('/').split('/').collect();
        let invalid = || ReportError::InvalidResourceId(id.to_string());

        if parts.len() < 5
            || !parts[1].eq_ignore_ascii_case("subscriptions")
            || !parts[3].eq_ignore_ascii_case("resourceGroups")
        {
            return Err(invalid());
        }
        let name = parts.last().copied().unwrap_or_default();
        if parts[2].is_empty() || parts[4].is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(ResourceId {
            subscription: parts[2].to_string(),
            resource_group: parts[4].to_string(),
            name: name.to_string(),
        })
    }
}
