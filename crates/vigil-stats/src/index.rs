//! Equipment join index.
//!
//! Raw transactions do not reliably carry a site, so every aggregation
//! rebuilds a lookup from the registered equipment set: asset key →
//! registered site, plus per-`(type, site)` totals. Pure read-side
//! structure; nothing here survives the request.

use std::collections::BTreeMap;

use vigil_core::entities::Equipment;

/// Lookup keyed by `business_unit|equipment_type|equipment_id`.
///
/// Callers pass equipment that is already ingestion-normalized and
/// mixer-canonicalized; variants of one physical asset therefore collapse
/// onto a single entry and count once.
#[derive(Debug, Default)]
pub struct EquipmentIndex {
    sites: BTreeMap<String, Option<String>>,
    /// equipment type → site → registered asset count.
    totals: BTreeMap<String, BTreeMap<String, u32>>,
    /// equipment type → registered assets with no known site.
    unsited: BTreeMap<String, u32>,
}

impl EquipmentIndex {
    /// Build the index from a registry snapshot.
    #[must_use]
    pub fn build(equipment: &[Equipment]) -> Self {
        let mut index = Self::default();
        for item in equipment {
            let key = Self::key(&item.business_unit, &item.equipment_type, &item.equipment_id);
            if index.sites.contains_key(&key) {
                // Duplicate registration (e.g. one mixer under two variant
                // tags): first entry wins, the asset counts once.
                continue;
            }
            index.sites.insert(key, item.site.clone());
            match &item.site {
                Some(site) => {
                    *index
                        .totals
                        .entry(item.equipment_type.clone())
                        .or_default()
                        .entry(site.clone())
                        .or_insert(0) += 1;
                }
                None => {
                    *index.unsited.entry(item.equipment_type.clone()).or_insert(0) += 1;
                }
            }
        }
        index
    }

    fn key(bu: &str, equipment_type: &str, equipment_id: &str) -> String {
        format!("{bu}|{equipment_type}|{equipment_id}")
    }

    /// Whether the asset exists in the registry.
    #[must_use]
    pub fn contains(&self, bu: &str, equipment_type: &str, equipment_id: &str) -> bool {
        self.sites
            .contains_key(&Self::key(bu, equipment_type, equipment_id))
    }

    /// The registered site of an asset. `None` when the asset is unknown or
    /// has no resolved site; use [`Self::contains`] to tell those apart.
    #[must_use]
    pub fn site_of(&self, bu: &str, equipment_type: &str, equipment_id: &str) -> Option<&str> {
        self.sites
            .get(&Self::key(bu, equipment_type, equipment_id))
            .and_then(|site| site.as_deref())
    }

    /// Per-site registered totals for one equipment type.
    #[must_use]
    pub fn site_totals(&self, equipment_type: &str) -> Option<&BTreeMap<String, u32>> {
        self.totals.get(equipment_type)
    }

    /// Registered assets of a type with no known site.
    #[must_use]
    pub fn unsited_total(&self, equipment_type: &str) -> u32 {
        self.unsited.get(equipment_type).copied().unwrap_or(0)
    }

    /// Every equipment type present in the registry snapshot, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        let mut types: Vec<&str> = self
            .totals
            .keys()
            .map(String::as_str)
            .chain(self.unsited.keys().map(String::as_str))
            .collect();
        types.sort_unstable();
        types.dedup();
        types.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment(equipment_type: &str, id: &str, site: Option<&str>) -> Equipment {
        Equipment {
            business_unit: "bu-east".into(),
            equipment_type: equipment_type.into(),
            equipment_id: id.into(),
            site: site.map(String::from),
        }
    }

    #[test]
    fn resolves_site_and_existence() {
        let index = EquipmentIndex::build(&[
            equipment("forklift", "f1", Some("plant-a")),
            equipment("forklift", "f2", None),
        ]);
        assert!(index.contains("bu-east", "forklift", "f1"));
        assert_eq!(index.site_of("bu-east", "forklift", "f1"), Some("plant-a"));
        assert!(index.contains("bu-east", "forklift", "f2"));
        assert_eq!(index.site_of("bu-east", "forklift", "f2"), None);
        assert!(!index.contains("bu-east", "forklift", "f3"));
        assert!(!index.contains("bu-west", "forklift", "f1"));
    }

    #[test]
    fn counts_totals_per_type_and_site() {
        let index = EquipmentIndex::build(&[
            equipment("forklift", "f1", Some("plant-a")),
            equipment("forklift", "f2", Some("plant-a")),
            equipment("forklift", "f3", Some("plant-b")),
            equipment("crane", "c1", Some("plant-a")),
            equipment("crane", "c2", None),
        ]);
        let forklift = index.site_totals("forklift").unwrap();
        assert_eq!(forklift["plant-a"], 2);
        assert_eq!(forklift["plant-b"], 1);
        assert_eq!(index.unsited_total("forklift"), 0);
        assert_eq!(index.unsited_total("crane"), 1);
        assert_eq!(index.types().collect::<Vec<_>>(), ["crane", "forklift"]);
    }

    #[test]
    fn duplicate_registrations_count_once() {
        // A mixer registered under two variant tags arrives here with the
        // same canonical tag twice.
        let index = EquipmentIndex::build(&[
            equipment("mixer", "m1", Some("plant-a")),
            equipment("mixer", "m1", Some("plant-a")),
        ]);
        assert_eq!(index.site_totals("mixer").unwrap()["plant-a"], 1);
    }

    #[test]
    fn type_with_only_unsited_equipment_is_listed() {
        let index = EquipmentIndex::build(&[equipment("hoist", "h1", None)]);
        assert_eq!(index.types().collect::<Vec<_>>(), ["hoist"]);
        assert!(index.site_totals("hoist").is_none());
        assert_eq!(index.unsited_total("hoist"), 1);
    }
}
