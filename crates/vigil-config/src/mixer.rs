//! Mixer equipment family configuration.
//!
//! Some equipment families are inspected under several procedural variants,
//! each registered as its own type tag (e.g. a weekly form and a trainer
//! form for the same physical mixer). A family maps every member tag to one
//! canonical tag so each physical asset keeps a single reporting history.

use serde::{Deserialize, Serialize};

/// One equipment family whose variant tags report as a single type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MixerFamily {
    /// The tag the family reports under.
    pub canonical: String,
    /// Variant tags folded into the canonical tag.
    #[serde(default)]
    pub members: Vec<String>,
}

impl MixerFamily {
    /// All tags in the family: canonical first, then members.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.members.iter().map(String::as_str))
    }

    /// Whether `tag` belongs to this family.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }
}

/// The configured set of mixer families for a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MixerConfig {
    #[serde(default)]
    pub families: Vec<MixerFamily>,
}

impl MixerConfig {
    /// Map a type tag to its family's canonical tag.
    ///
    /// Tags outside every family map to themselves, so callers can apply
    /// this unconditionally.
    #[must_use]
    pub fn canonical_type<'a>(&'a self, tag: &'a str) -> &'a str {
        self.families
            .iter()
            .find(|family| family.contains(tag))
            .map_or(tag, |family| family.canonical.as_str())
    }

    /// The family a tag belongs to, if any.
    #[must_use]
    pub fn family_of(&self, tag: &str) -> Option<&MixerFamily> {
        self.families.iter().find(|family| family.contains(tag))
    }
}
