//! A validated tag string.
//!
//! This module defines the [`Tag`] type which wraps a string that has been
//! checked against the tag grammar. Most operations in this crate stay on
//! plain string slices and tolerate malformed input; [`Tag`] is for the
//! boundaries where a value must be known-good, such as persisted records
//! and wire payloads.

use std::{fmt::Display, str::FromStr};

use ::serde::{Deserialize, Serialize};

use crate::{TrellisTagError, Visibility, decompose, local_tag, parent_tag, tag_origin};

/// A [`Tag`] is a hierarchical identifier of the form
/// `[+_]?segment(/segment)*(@origin)?`. Segments and origins are dotted
/// words over lowercase ASCII letters and digits. A wildcard origin is
/// not a concrete tag and is rejected here; it belongs in selector
/// position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Tag(String);

impl Tag {
    /// View the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The visibility encoded by the tag's leading marker.
    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.0)
    }

    /// The local part of the tag, marker kept and origin removed.
    pub fn local(&self) -> &str {
        local_tag(&self.0)
    }

    /// The tag's origin, or `""` when it is local.
    pub fn origin(&self) -> &str {
        tag_origin(&self.0)
    }

    /// The immediate parent of the tag, if it has one.
    pub fn parent(&self) -> Option<&str> {
        parent_tag(&self.0)
    }
}

fn valid_word(word: &str) -> bool {
    !word.is_empty()
        && word.split('.').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
        })
}

impl TryFrom<String> for Tag {
    type Error = TrellisTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let unmarked = value.strip_prefix(['+', '_']).unwrap_or(&value);
        let (local, origin) = decompose(unmarked);

        if local.is_empty() {
            return Err(TrellisTagError::InvalidTag(format!(
                "A tag requires at least one segment, but got \"{value}\""
            )));
        }

        for segment in local.split('/') {
            if !valid_word(segment) {
                return Err(TrellisTagError::InvalidTag(format!(
                    "Tag \"{value}\" has a malformed segment \"{segment}\""
                )));
            }
        }

        if origin.is_empty() {
            if unmarked.contains('@') {
                return Err(TrellisTagError::InvalidTag(format!(
                    "Tag \"{value}\" has an empty origin"
                )));
            }
        } else if !valid_word(&origin[1..]) {
            return Err(TrellisTagError::InvalidTag(format!(
                "Tag \"{value}\" has a malformed origin \"{origin}\""
            )));
        }

        Ok(Self(value))
    }
}

impl FromStr for Tag {
    type Err = TrellisTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::try_from(s.to_owned())
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl From<&Tag> for String {
    fn from(value: &Tag) -> Self {
        value.0.clone()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
