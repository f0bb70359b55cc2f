//! Site-wide tagging policy.

use serde::{Deserialize, Serialize};

use trellis_tag::{local_tag, set_public};

/// Tags the site has sealed against casual modification.
///
/// A seal is a restriction, not a grant: accounts below the named role
/// are refused outright, while accounts at or above it continue through
/// the ordinary decision rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessSettings {
    /// Tags only moderators and admins may apply or alter
    pub mod_seal: Vec<String>,
    /// Tags only editors and above may apply or alter
    pub editor_seal: Vec<String>,
}

impl AccessSettings {
    /// Seal `tag` so only moderators and admins may apply or alter it.
    pub fn sealing_for_mods(mut self, tag: impl Into<String>) -> Self {
        self.mod_seal.push(tag.into());
        self
    }

    /// Seal `tag` so only editors and above may apply or alter it.
    pub fn sealing_for_editors(mut self, tag: impl Into<String>) -> Self {
        self.editor_seal.push(tag.into());
        self
    }

    /// Whether `tag` is sealed at the moderator level.
    pub fn mod_sealed(&self, tag: &str) -> bool {
        Self::seal_matches(&self.mod_seal, tag)
    }

    /// Whether `tag` is sealed at the editor level.
    pub fn editor_sealed(&self, tag: &str) -> bool {
        Self::seal_matches(&self.editor_seal, tag)
    }

    // Seals compare on the bare tag: markers and origins are ignored on
    // both sides.
    fn seal_matches(seals: &[String], tag: &str) -> bool {
        let candidate = set_public(local_tag(tag));

        seals
            .iter()
            .any(|seal| set_public(local_tag(seal)) == candidate)
    }
}
