//! Equipment and inspection record entities.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Answer;
use crate::timestamp::RawTimestamp;

/// One physical asset under inspection, as registered in the equipment
/// registry. `(business_unit, equipment_type, equipment_id)` is unique
/// within a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub business_unit: String,
    /// Type tag (e.g., `forklift`, `extinguisher`), case-folded at ingestion.
    pub equipment_type: String,
    /// Externally assigned id; may contain non-ASCII and arrive
    /// percent-encoded.
    pub equipment_id: String,
    /// Site code. `None` when the registry does not know the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Equipment {
    /// Apply ingestion normalization: fold the type tag, decode the id.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.equipment_type = fold_type_tag(&self.equipment_type);
        self.equipment_id = decode_equipment_id(&self.equipment_id);
        self
    }
}

/// One submitted inspection event for one piece of equipment.
///
/// Question answers are dynamic fields on the source document; they land in
/// `answers` via `#[serde(flatten)]` and are tagged during deserialization.
/// A site field on the raw document (when present) is untrusted and is not
/// modeled here; site is always resolved through the equipment registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub business_unit: String,
    pub equipment_type: String,
    pub equipment_id: String,
    pub timestamp: RawTimestamp,
    #[serde(default)]
    pub inspector: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Question name → tagged answer. Every unrecognized document field
    /// collects here, which is exactly the surface the defect scan covers.
    #[serde(flatten)]
    pub answers: BTreeMap<String, Answer>,
}

impl InspectionRecord {
    /// Apply ingestion normalization: fold the type tag, decode the id.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.equipment_type = fold_type_tag(&self.equipment_type);
        self.equipment_id = decode_equipment_id(&self.equipment_id);
        self
    }

    /// Whether any answer on this record signals a defect.
    #[must_use]
    pub fn has_defect(&self) -> bool {
        self.answers.values().any(Answer::is_fail)
    }
}

/// Case-fold an equipment type tag.
#[must_use]
pub fn fold_type_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Decode a percent-encoded equipment id.
///
/// Ids are externally assigned; a malformed escape falls back to the raw
/// form rather than dropping the asset.
#[must_use]
pub fn decode_equipment_id(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
}
