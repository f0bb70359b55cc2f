//! Access decisions over refs and tags.
//!
//! Every decision here is an ordered walk through short-circuit rules:
//! the first rule that applies wins and later rules are never consulted.
//! All of them are pure functions of their arguments, so a decision can
//! be re-evaluated anywhere (server, client, replication worker) with
//! identical results.

use trellis_model::{Account, Ref, UserAccess};
use trellis_tag::{Visibility, decompose, default_origin, is_subtag, local_tag, set_public};

use crate::{AccessSettings, captures_any};

/// Refs carrying this tag may only be altered by moderators.
pub const LOCKED_TAG: &str = "locked";

/// Refs carrying this tag are readable by anyone.
pub const PUBLIC_TAG: &str = "public";

/// Whether `account`'s own user tag marks it as the owner of `record`.
///
/// Ownership requires the account's origin (or the origin embedded in
/// its tag, when it carries one) to equal the record's origin, and the
/// record to carry the account tag or a descendant of it.
pub fn is_owner_tag(account: &Account, record: &Ref) -> bool {
    if !account.signed_in() {
        return false;
    }

    let (local, origin) = decompose(&account.tag);
    let origin = if origin.is_empty() {
        account.origin.as_str()
    } else {
        origin
    };

    origin == record.origin && record.has_tag(local)
}

/// Whether the tag assigned in `access` marks its account as the owner
/// of `record`.
///
/// Unlike [`is_owner_tag`], an assigned tag that names no origin applies
/// on every origin; one that does name an origin must match the
/// record's.
pub fn is_owner(access: &UserAccess, record: &Ref) -> bool {
    let Some(tag) = access.tag.as_deref() else {
        return false;
    };

    if tag.is_empty() {
        return false;
    }

    let (local, origin) = decompose(tag);

    (origin.is_empty() || origin == record.origin) && record.has_tag(local)
}

// Whether `tag` is the account's own user tag or descends from it,
// compared without markers. An origin on the candidate must match the
// account's.
fn owns_tag(account: &Account, tag: &str) -> bool {
    if !account.signed_in() {
        return false;
    }

    let (local, origin) = decompose(tag);

    if !(origin.is_empty() || origin == account.origin) {
        return false;
    }

    is_subtag(set_public(local), set_public(local_tag(&account.tag)))
}

/// Decide whether `account` may read `record`.
///
/// Rules, in order: a record tagged `public` is readable by anyone,
/// even signed out. Otherwise the caller must be signed in and not
/// banned. Moderators and owners (by account tag or assigned access
/// tag) pass, and finally the account's `readAccess` selectors are
/// matched against the record's qualified tags. Unlike the write-side
/// decisions there is no origin gate: remote records are readable under
/// the same rules as local ones.
pub fn read_access(record: &Ref, account: &Account) -> bool {
    if record.has_tag(PUBLIC_TAG) {
        return true;
    }

    if !account.active() {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if is_owner_tag(account, record) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    if is_owner(access, record) {
        return true;
    }

    captures_any(&access.read_access, &record.qualified_tags()).is_some()
}

/// Decide whether `account` may modify the body of `record`.
///
/// Rules, in order: the caller must be signed in and not banned; the
/// record must belong to the caller's origin; a record tagged `locked`
/// refuses everyone at this point, moderators included. Moderators then
/// pass, owners pass (by account tag or assigned access tag), and
/// finally the account's `writeAccess` selectors are matched against
/// the record's qualified tags.
pub fn write_access(record: &Ref, account: &Account) -> bool {
    if !account.active() {
        return false;
    }

    if record.origin != account.origin {
        return false;
    }

    if record.has_tag(LOCKED_TAG) {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if is_owner_tag(account, record) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    if is_owner(access, record) {
        return true;
    }

    captures_any(&access.write_access, &record.qualified_tags()).is_some()
}

/// Decide whether `account` may change the tags on `record`.
///
/// Identical to [`write_access`] except that editors short-circuit to
/// an allow where only moderators would: retagging is the editor role's
/// whole purpose.
pub fn tagging_access(record: &Ref, account: &Account) -> bool {
    if !account.active() {
        return false;
    }

    if record.origin != account.origin {
        return false;
    }

    if record.has_tag(LOCKED_TAG) {
        return false;
    }

    if account.roles.is_editor() {
        return true;
    }

    if is_owner_tag(account, record) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    if is_owner(access, record) {
        return true;
    }

    captures_any(&access.write_access, &record.qualified_tags()).is_some()
}

/// Decide whether `account` may delete `record`.
///
/// Identical to [`write_access`] except that the moderator rule comes
/// before the `locked` gate, so moderators can remove locked records.
pub fn delete_access(record: &Ref, account: &Account) -> bool {
    if !account.active() {
        return false;
    }

    if record.origin != account.origin {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if record.has_tag(LOCKED_TAG) {
        return false;
    }

    if is_owner_tag(account, record) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    if is_owner(access, record) {
        return true;
    }

    captures_any(&access.write_access, &record.qualified_tags()).is_some()
}

/// Decide whether `account` may read refs filed under `tag`.
///
/// Public tags are readable by anyone. Otherwise the caller must be
/// signed in and not banned; moderators pass, the account's own tag and
/// its descendants pass, and finally the `tagReadAccess` selectors are
/// matched against the tag qualified with the account's origin.
pub fn tag_read_access(tag: &str, account: &Account) -> bool {
    if tag.is_empty() {
        return false;
    }

    if Visibility::of(tag) == Visibility::Public {
        return true;
    }

    if !account.active() {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if owns_tag(account, tag) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    captures_any(&access.tag_read_access, &[default_origin(tag, &account.origin)]).is_some()
}

/// Decide whether `account` may alter or remove `tag` where it already
/// appears.
///
/// The caller must be signed in and not banned. Admins pass
/// unconditionally; then the seals are consulted, refusing accounts
/// below the sealed role. Moderators pass next, the account's own tag
/// and its descendants pass, and finally the `tagWriteAccess` selectors
/// are matched against the tag qualified with the account's origin.
pub fn tag_write_access(tag: &str, account: &Account, settings: &AccessSettings) -> bool {
    if tag.is_empty() {
        return false;
    }

    if !account.active() {
        return false;
    }

    if account.roles.is_admin() {
        return true;
    }

    if settings.mod_sealed(tag) && !account.roles.is_mod() {
        return false;
    }

    if settings.editor_sealed(tag) && !account.roles.is_editor() {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if owns_tag(account, tag) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    captures_any(&access.tag_write_access, &[default_origin(tag, &account.origin)]).is_some()
}

/// Decide whether `account` may apply `tag` to a record it can already
/// tag.
///
/// Identical to [`tag_write_access`] except that, after the seals and
/// the moderator rule, any public tag is allowed: applying an open
/// topic tag is the baseline activity of the system.
pub fn can_add_tag(tag: &str, account: &Account, settings: &AccessSettings) -> bool {
    if tag.is_empty() {
        return false;
    }

    if !account.active() {
        return false;
    }

    if account.roles.is_admin() {
        return true;
    }

    if settings.mod_sealed(tag) && !account.roles.is_mod() {
        return false;
    }

    if settings.editor_sealed(tag) && !account.roles.is_editor() {
        return false;
    }

    if account.roles.is_mod() {
        return true;
    }

    if Visibility::of(tag) == Visibility::Public {
        return true;
    }

    if owns_tag(account, tag) {
        return true;
    }

    let Some(access) = account.access.as_ref() else {
        return false;
    };

    captures_any(&access.tag_write_access, &[default_origin(tag, &account.origin)]).is_some()
}
