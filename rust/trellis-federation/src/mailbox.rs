//! Mailbox addresses and their translation between origins.
//!
//! A message reaches a user through a tag in plugin space. On the
//! user's own server the address is `plugin/inbox/<user>`; everywhere
//! else it is `plugin/outbox/<origin>/<user>`, with the origin stored
//! in reversed position and without its `@`. Because each server names
//! other servers through its own aliases, addresses must be rewritten
//! as records travel, which is what [`get_local_mailbox`] does.

use tracing::warn;

use trellis_model::{OriginAliasMap, Ref};
use trellis_tag::{
    Visibility, default_origin, is_subtag, local_tag, prefix, set_public, tag_origin,
};

use crate::TrellisFederationError;

/// Base of inbox mailbox addresses.
pub const INBOX_TAG: &str = "plugin/inbox";

/// Base of outbox mailbox addresses.
pub const OUTBOX_TAG: &str = "plugin/outbox";

/// Base of sender-attribution tags.
pub const FROM_TAG: &str = "plugin/from";

/// Whether `tag` is a routable mailbox address.
///
/// Only unmarked `plugin/inbox` and `plugin/outbox` forms route.
/// Sender attributions under `plugin/from` and `_`-marked copies do
/// not, and containment is segment aware, so `plugin/inboxing` is not
/// a mailbox either.
pub fn is_mailbox(tag: &str) -> bool {
    is_subtag(tag, INBOX_TAG) || is_subtag(tag, OUTBOX_TAG)
}

/// Rewrite a reversed-origin path into tag-with-origin form.
///
/// Mailbox paths store the origin first and bare: `other/user/bob`
/// becomes `user/bob@other`. A visibility marker stays at the front of
/// the result, and input without a separator comes back unchanged.
pub fn reverse_origin(tag: &str) -> String {
    let marker = Visibility::of(tag).marker();
    let unmarked = set_public(tag);

    match unmarked.split_once('/') {
        Some((origin, local)) if !origin.is_empty() && !local.is_empty() => {
            format!("{marker}{local}@{origin}")
        }
        _ => tag.to_string(),
    }
}

// The remainder of `tag` below `base`, when it is strictly below.
fn strip_base<'a>(tag: &'a str, base: &str) -> Option<&'a str> {
    tag.strip_prefix(base)?
        .strip_prefix('/')
        .filter(|rest| !rest.is_empty())
}

/// Recover the user tag a mailbox address refers to.
///
/// Inbox paths are returned directly; outbox and `plugin/from` paths go
/// through [`reverse_origin`] to restore their `@` form. The result is
/// the tag as the address stores it, without visibility markers.
/// Anything that is not a mailbox or attribution form yields `None`.
pub fn mailbox_user_tag(mailbox: &str) -> Option<String> {
    let unmarked = set_public(mailbox);

    if let Some(user) = strip_base(unmarked, INBOX_TAG) {
        return Some(user.to_string());
    }

    for base in [OUTBOX_TAG, FROM_TAG] {
        if let Some(path) = strip_base(unmarked, base) {
            if path.contains('/') {
                return Some(reverse_origin(path));
            }

            return None;
        }
    }

    None
}

/// The mailbox address that reaches `tag`'s owner from this server.
///
/// Tags already in plugin space pass through untouched. A tag with no
/// origin, or with the local one, becomes an inbox address; any other
/// origin becomes an outbox address under that origin's alias.
pub fn get_mailbox(tag: &str, local_origin: &str) -> String {
    let stripped = set_public(local_tag(tag));

    if is_subtag(stripped, "plugin") {
        return tag.to_string();
    }

    let origin = tag_origin(tag);

    if origin.is_empty() || origin == local_origin {
        prefix(INBOX_TAG, [stripped])
    } else {
        prefix(OUTBOX_TAG, [origin.strip_prefix('@').unwrap_or(origin), stripped])
    }
}

/// Re-address `mailbox` for local routing of a record from `ref_origin`.
///
/// Records that are already local, because `ref_origin` is empty or is
/// the local origin itself, keep their addresses. For remote records:
///
/// * an outbox address whose origin alias resolves (through `lookup`,
///   under `ref_origin`'s entry) to the local origin collapses into the
///   matching inbox address;
/// * an outbox address for a third origin is re-expressed under this
///   server's alias for that origin;
/// * an inbox address belongs to a user of the remote server, so it
///   becomes an outbox address under `ref_origin`.
///
/// An alias missing from `lookup` means the route cannot be expressed
/// here; the address is reported and dropped with `Ok(None)`. A tag
/// that is not a routable mailbox, or a mailbox missing its origin or
/// user segments, is an error.
pub fn get_local_mailbox(
    mailbox: &str,
    local_origin: &str,
    ref_origin: &str,
    lookup: &OriginAliasMap,
) -> Result<Option<String>, TrellisFederationError> {
    if ref_origin.is_empty() || ref_origin == local_origin {
        return Ok(Some(mailbox.to_string()));
    }

    if let Some(path) = strip_base(mailbox, OUTBOX_TAG) {
        let Some((alias, user)) = path.split_once('/') else {
            return Err(TrellisFederationError::InvalidMailboxFormat(
                mailbox.to_string(),
            ));
        };

        if alias.is_empty() || user.is_empty() {
            return Err(TrellisFederationError::InvalidMailboxFormat(
                mailbox.to_string(),
            ));
        }

        let remote_alias = format!("@{alias}");
        let resolved = lookup
            .get(ref_origin)
            .and_then(|aliases| aliases.get(&remote_alias));

        let Some(local_alias) = resolved.map(|alias| alias.as_str()) else {
            warn!(
                mailbox = %mailbox,
                origin = %ref_origin,
                alias = %remote_alias,
                "No local alias for remote origin, dropping route"
            );

            return Ok(None);
        };

        return Ok(Some(if local_alias == local_origin {
            prefix(INBOX_TAG, [user])
        } else {
            prefix(
                OUTBOX_TAG,
                [local_alias.strip_prefix('@').unwrap_or(local_alias), user],
            )
        }));
    }

    if let Some(user) = strip_base(mailbox, INBOX_TAG) {
        return Ok(Some(prefix(
            OUTBOX_TAG,
            [ref_origin.strip_prefix('@').unwrap_or(ref_origin), user],
        )));
    }

    Err(TrellisFederationError::InvalidMailboxFormat(
        mailbox.to_string(),
    ))
}

/// The qualified author tags on `record`.
///
/// Authors are the marked `user` tags, each qualified with the record's
/// origin when it carries none of its own. A bare public `user/...` tag
/// is a mention, not an author.
pub fn authors(record: &Ref) -> Vec<String> {
    record
        .tags
        .iter()
        .filter(|tag| is_author_tag(tag))
        .map(|tag| default_origin(tag, &record.origin))
        .collect()
}

fn is_author_tag(tag: &str) -> bool {
    Visibility::of(tag) != Visibility::Public && is_subtag(set_public(local_tag(tag)), "user")
}

/// Every mailbox address a notification about `record` should reach,
/// from the point of view of the `my_tag` account.
///
/// The result unions the mailbox of every author other than the caller
/// with the record's own mailbox tags re-addressed for local routing.
/// Addresses keep first-appearance order, duplicates collapse, and
/// translations that cannot be expressed locally are dropped.
pub fn mailboxes(record: &Ref, my_tag: &str, lookup: &OriginAliasMap) -> Vec<String> {
    let local_origin = tag_origin(my_tag);
    let me = default_origin(my_tag, local_origin);
    let mut routes: Vec<String> = Vec::new();

    for author in authors(record) {
        if default_origin(&author, local_origin) == me {
            continue;
        }

        push_unique(&mut routes, get_mailbox(&author, local_origin));
    }

    for tag in &record.tags {
        if !is_mailbox(tag) {
            continue;
        }

        if let Ok(Some(route)) = get_local_mailbox(tag, local_origin, &record.origin, lookup) {
            push_unique(&mut routes, route);
        }
    }

    routes
}

fn push_unique(routes: &mut Vec<String>, route: String) {
    if !routes.contains(&route) {
        routes.push(route);
    }
}
