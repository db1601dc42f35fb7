//! Known site enumeration per business unit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Site codes registered per business unit.
///
/// Used to pre-seed empty statistics buckets so a site with zero registered
/// equipment still appears in reports instead of silently vanishing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SitesConfig {
    /// Business unit → site codes.
    #[serde(default)]
    pub known: BTreeMap<String, Vec<String>>,
}

impl SitesConfig {
    /// The configured sites for a business unit (empty when unconfigured).
    #[must_use]
    pub fn sites_for(&self, bu: &str) -> &[String] {
        self.known.get(bu).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_for_unknown_bu_is_empty() {
        let config = SitesConfig::default();
        assert!(config.sites_for("bu-east").is_empty());
    }

    #[test]
    fn sites_for_returns_configured_codes() {
        let config = SitesConfig {
            known: BTreeMap::from([(
                "bu-east".to_string(),
                vec!["plant-a".to_string(), "plant-b".to_string()],
            )]),
        };
        assert_eq!(config.sites_for("bu-east"), ["plant-a", "plant-b"]);
    }
}
