// ── Production group table ──

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::directory::FleetDirectory;

/// A group whose routers are in scope for the stale-LTE report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionGroup {
    /// Numeric NCM group id, kept as text.
    pub id: String,
    /// Human label, for config readability only.
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// The IBC-PROD groups used when configuration doesn't supply its own list.
pub fn default_production_groups() -> Vec<ProductionGroup> {
    [
        ("225264", "IBC-PROD-E100-1"),
        ("225265", "IBC-PROD-E100-2"),
        ("225266", "IBC-PROD-E100-3"),
        ("225267", "IBC-PROD-E100-4"),
        ("201772", "IBC-PROD-E300-1"),
        ("199428", "IBC-PROD-E300-2"),
        ("199430", "IBC-PROD-E300-3"),
        ("199432", "IBC-PROD-E300-4"),
    ]
    .into_iter()
    .map(|(id, name)| ProductionGroup::new(id, name))
    .collect()
}

/// Canonical group URLs to match router records against.
///
/// Matching is exact string equality on the URL, trailing slash included.
#[derive(Debug, Clone, Default)]
pub struct GroupUrlSet {
    urls: HashSet<String>,
}

impl GroupUrlSet {
    pub fn new(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            urls: urls.into_iter().collect(),
        }
    }

    /// Resolve group ids to URLs through the directory's canonical form.
    pub fn resolve<D: FleetDirectory>(directory: &D, groups: &[ProductionGroup]) -> Self {
        Self::new(groups.iter().map(|g| directory.group_url(&g.id)))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_eight_distinct_groups() {
        let groups = default_production_groups();
        let ids: HashSet<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(groups.len(), 8);
        assert_eq!(ids.len(), 8);
        assert!(ids.contains("199432"));
    }

    #[test]
    fn membership_is_exact() {
        let set = GroupUrlSet::new([
            "https://www.cradlepointecm.com/api/v2/groups/225264/".to_owned(),
        ]);
        assert!(set.contains("https://www.cradlepointecm.com/api/v2/groups/225264/"));
        assert!(!set.contains("https://www.cradlepointecm.com/api/v2/groups/225264"));
        assert!(!set.contains("225264"));
        assert!(!set.contains(""));
    }
}
