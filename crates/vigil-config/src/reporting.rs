//! Reporting cadence configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vigil_core::entities::fold_type_tag;
use vigil_core::enums::Cadence;

/// Per-business-unit reporting cadence for equipment types.
///
/// Types absent from the mapping apply to every cadence. That default-open
/// policy keeps business units reporting before anyone configures them, and
/// absence of configuration is a valid state, not a failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportingConfig {
    /// Business unit → equipment type → cadence.
    #[serde(default)]
    pub cadences: BTreeMap<String, BTreeMap<String, Cadence>>,
}

impl ReportingConfig {
    /// The configured cadence for a type, if any.
    #[must_use]
    pub fn cadence_for(&self, bu: &str, equipment_type: &str) -> Option<Cadence> {
        self.cadences
            .get(bu)?
            .get(&fold_type_tag(equipment_type))
            .copied()
    }

    /// Whether a type is in scope for a requested cadence.
    ///
    /// A configured type matches only its exact cadence; an unconfigured
    /// type matches every cadence.
    #[must_use]
    pub fn in_scope(&self, bu: &str, equipment_type: &str, requested: Cadence) -> bool {
        self.cadence_for(bu, equipment_type)
            .is_none_or(|configured| configured == requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReportingConfig {
        ReportingConfig {
            cadences: BTreeMap::from([(
                "bu-east".to_string(),
                BTreeMap::from([
                    ("forklift".to_string(), Cadence::Daily),
                    ("crane".to_string(), Cadence::Quarterly),
                ]),
            )]),
        }
    }

    #[test]
    fn configured_type_matches_exact_cadence_only() {
        let config = config();
        assert!(config.in_scope("bu-east", "forklift", Cadence::Daily));
        assert!(!config.in_scope("bu-east", "forklift", Cadence::Monthly));
        assert!(config.in_scope("bu-east", "crane", Cadence::Quarterly));
        assert!(!config.in_scope("bu-east", "crane", Cadence::Annual));
    }

    #[test]
    fn unconfigured_type_matches_every_cadence() {
        let config = config();
        for cadence in Cadence::ALL {
            assert!(config.in_scope("bu-east", "extinguisher", cadence));
        }
    }

    #[test]
    fn unconfigured_business_unit_is_default_open() {
        let config = config();
        for cadence in Cadence::ALL {
            assert!(config.in_scope("bu-west", "forklift", cadence));
        }
    }

    #[test]
    fn lookup_folds_the_type_tag() {
        let config = config();
        assert_eq!(
            config.cadence_for("bu-east", " Forklift "),
            Some(Cadence::Daily)
        );
    }

    #[test]
    fn empty_config_is_valid() {
        let config = ReportingConfig::default();
        assert_eq!(config.cadence_for("bu-east", "forklift"), None);
        assert!(config.in_scope("bu-east", "forklift", Cadence::Annual));
    }
}
