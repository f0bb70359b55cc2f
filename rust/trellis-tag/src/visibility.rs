use serde::{Deserialize, Serialize};

/// The audience class encoded in a tag's first character.
///
/// Tags are public unless they begin with a marker character: `+` narrows
/// the tag to signed-in users and `_` narrows it to privileged readers.
/// The marker is part of the tag string itself, so two tags that differ
/// only in their marker are distinct identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// No marker: visible to anyone
    Public,
    /// `+` marker: visible to signed-in users
    Protected,
    /// `_` marker: visible to privileged readers only
    Private,
}

impl Visibility {
    /// Classify `tag` by its leading character.
    ///
    /// Any string that does not start with `+` or `_` is public, including
    /// the empty string.
    pub fn of(tag: &str) -> Self {
        match tag.as_bytes().first() {
            Some(b'+') => Visibility::Protected,
            Some(b'_') => Visibility::Private,
            _ => Visibility::Public,
        }
    }

    /// The marker character for this visibility, as a string slice.
    pub fn marker(&self) -> &'static str {
        match self {
            Visibility::Public => "",
            Visibility::Protected => "+",
            Visibility::Private => "_",
        }
    }
}

/// Return `tag` with any visibility marker removed.
pub fn set_public(tag: &str) -> &str {
    tag.strip_prefix(['+', '_']).unwrap_or(tag)
}

/// Return `tag` re-marked as protected, replacing any existing marker.
///
/// Already-protected tags come back unchanged, so the operation is
/// idempotent. The empty string stays empty rather than becoming a bare
/// marker.
pub fn set_protected(tag: &str) -> String {
    if tag.is_empty() {
        String::new()
    } else {
        format!("+{}", set_public(tag))
    }
}

/// Return `tag` re-marked as private, replacing any existing marker.
///
/// Idempotent in the same way as [`set_protected`].
pub fn set_private(tag: &str) -> String {
    if tag.is_empty() {
        String::new()
    } else {
        format!("_{}", set_public(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn it_classifies_tags_by_leading_marker() -> Result<()> {
        assert_eq!(Visibility::of("science"), Visibility::Public);
        assert_eq!(Visibility::of("+user/alice"), Visibility::Protected);
        assert_eq!(Visibility::of("_secret"), Visibility::Private);
        assert_eq!(Visibility::of(""), Visibility::Public);

        Ok(())
    }

    #[test]
    fn it_strips_markers_when_setting_public() -> Result<()> {
        assert_eq!(set_public("+user/alice"), "user/alice");
        assert_eq!(set_public("_secret"), "secret");
        assert_eq!(set_public("science"), "science");

        Ok(())
    }

    #[test]
    fn it_replaces_markers_rather_than_stacking_them() -> Result<()> {
        assert_eq!(set_private("people/murray/anne"), "_people/murray/anne");
        assert_eq!(set_private("+people/murray/anne"), "_people/murray/anne");
        assert_eq!(set_private("_people/murray/anne"), "_people/murray/anne");
        assert_eq!(set_protected("_wiki/drafts"), "+wiki/drafts");

        Ok(())
    }

    #[test]
    fn it_leaves_the_empty_string_unmarked() -> Result<()> {
        assert_eq!(set_private(""), "");
        assert_eq!(set_protected(""), "");

        Ok(())
    }
}
