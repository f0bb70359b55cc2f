//! Selector strings and the capture relation they define.
//!
//! A selector is a tag-shaped string used in access lists and query
//! filters. Its origin position admits the wildcard `@*`, and its local
//! part may be empty when an origin is present, which turns the selector
//! into a pure origin filter.

use std::{fmt::Display, str::FromStr};

use ::serde::{Deserialize, Serialize};

use trellis_tag::decompose;

use crate::TrellisCapabilityError;

/// Whether `selector` captures `target`.
///
/// Both strings are decomposed into local part and origin. A selector
/// with a local part demands exact string equality with the target's
/// local part, visibility marker included; an empty selector local part
/// matches any target. The origins must then be equal, unless the
/// selector's origin is the wildcard `@*`.
///
/// Capture is deliberately not hierarchical: a grant on `science` says
/// nothing about `science/biology`. Hierarchical containment belongs to
/// tag matching on refs, not to capability capture.
pub fn captures(selector: &str, target: &str) -> bool {
    let (selector_local, selector_origin) = decompose(selector);
    let (target_local, target_origin) = decompose(target);

    if !selector_local.is_empty() && selector_local != target_local {
        return false;
    }

    selector_origin == "@*" || selector_origin == target_origin
}

/// Find the first selector in `selectors` that captures any target in
/// `targets`.
///
/// Selectors are tried in list order, each against every target, so the
/// result identifies which grant admitted the request. Either list being
/// empty yields `None`.
pub fn captures_any<'a, S, T>(selectors: &'a [S], targets: &[T]) -> Option<&'a str>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    selectors
        .iter()
        .find(|selector| {
            targets
                .iter()
                .any(|target| captures(selector.as_ref(), target.as_ref()))
        })
        .map(|selector| selector.as_ref())
}

/// Find the first query in `queries` that captures any target in
/// `targets`.
///
/// Query filtering and capability capture share one matching primitive
/// today, but they are distinct relations and are expected to diverge,
/// so callers in query position should come through here rather than
/// through [`captures_any`].
pub fn queries_any<'a, S, T>(queries: &'a [S], targets: &[T]) -> Option<&'a str>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    captures_any(queries, targets)
}

/// A validated selector string.
///
/// Most matching goes through the plain string functions above, which
/// tolerate malformed input. [`Selector`] is for stored access lists,
/// where a typo should be rejected at write time instead of silently
/// never matching.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Selector(String);

impl Selector {
    /// View the selector as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this selector captures `target`. See [`captures`].
    pub fn captures(&self, target: &str) -> bool {
        captures(&self.0, target)
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

impl TryFrom<String> for Selector {
    type Error = TrellisCapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let unmarked = value.strip_prefix(['+', '_']).unwrap_or(&value);
        let (local, origin) = decompose(unmarked);

        if local.is_empty() && origin.is_empty() {
            return Err(TrellisCapabilityError::InvalidSelector(format!(
                "A selector requires a local part or an origin, but got \"{value}\""
            )));
        }

        if !local.is_empty() {
            for segment in local.split('/') {
                if !valid_word(segment) {
                    return Err(TrellisCapabilityError::InvalidSelector(format!(
                        "Selector \"{value}\" has a malformed segment \"{segment}\""
                    )));
                }
            }
        }

        if origin.is_empty() {
            if unmarked.contains('@') {
                return Err(TrellisCapabilityError::InvalidSelector(format!(
                    "Selector \"{value}\" has an empty origin"
                )));
            }
        } else if origin != "@*" && !valid_word(&origin[1..]) {
            return Err(TrellisCapabilityError::InvalidSelector(format!(
                "Selector \"{value}\" has a malformed origin \"{origin}\""
            )));
        }

        Ok(Self(value))
    }
}

impl FromStr for Selector {
    type Err = TrellisCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::try_from(s.to_owned())
    }
}

impl From<Selector> for String {
    fn from(value: Selector) -> Self {
        value.0
    }
}

impl From<&Selector> for String {
    fn from(value: &Selector) -> Self {
        value.0.clone()
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
