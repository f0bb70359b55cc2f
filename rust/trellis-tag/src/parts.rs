use crate::set_public;

/// Split a tag into its local part and its origin.
///
/// The split happens at the first `@`; everything from that character on
/// is the origin, returned with its leading `@` intact. A bare trailing
/// `@` denotes the local origin and normalizes to the empty string, the
/// same value returned when no `@` is present at all. The local part
/// keeps its visibility marker.
///
/// ```
/// use trellis_tag::decompose;
///
/// assert_eq!(decompose("+user/alice@main"), ("+user/alice", "@main"));
/// assert_eq!(decompose("science"), ("science", ""));
/// assert_eq!(decompose("science@"), ("science", ""));
/// ```
pub fn decompose(tag: &str) -> (&str, &str) {
    match tag.find('@') {
        Some(index) => {
            let (local, origin) = tag.split_at(index);
            if origin == "@" {
                (local, "")
            } else {
                (local, origin)
            }
        }
        None => (tag, ""),
    }
}

/// The local part of `tag` with its visibility marker kept and any
/// origin removed.
pub fn local_tag(tag: &str) -> &str {
    decompose(tag).0
}

/// The origin component of `tag`, or `""` when the tag is local.
pub fn tag_origin(tag: &str) -> &str {
    decompose(tag).1
}

/// Qualify `tag` with `origin` when it does not already carry one.
///
/// Tags that name an origin, tags containing a wildcard and calls with an
/// empty `origin` all come back unchanged (modulo dropping a bare
/// trailing `@`). The result is stable under repeated application.
pub fn default_origin(tag: &str, origin: &str) -> String {
    if tag.contains('*') || !tag_origin(tag).is_empty() || origin.is_empty() {
        tag.to_string()
    } else {
        format!("{}{}", local_tag(tag), origin)
    }
}

/// Qualify every tag in `tags` with `origin` via [`default_origin`].
pub fn qualify_tags<S>(tags: &[S], origin: &str) -> Vec<String>
where
    S: AsRef<str>,
{
    tags.iter()
        .map(|tag| default_origin(tag.as_ref(), origin))
        .collect()
}

/// The immediate parent of `tag` in the hierarchy, if it has one.
///
/// The origin is dropped from the result while the visibility marker is
/// kept, so `parent_tag("_a/b/c@origin")` is `Some("_a/b")`. Tags with a
/// single segment have no parent.
pub fn parent_tag(tag: &str) -> Option<&str> {
    let (local, _) = decompose(tag);
    local.rfind('/').map(|index| &local[..index])
}

/// Join path fragments below `base` into a single tag path.
///
/// Fragments after the first are reduced to their public local part
/// before joining, so markers and origins survive only on `base`. Empty
/// fragments and doubled separators collapse away.
pub fn prefix<'a, I>(base: &str, rest: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = base.trim_end_matches('/').to_string();

    for part in rest {
        let part = set_public(local_tag(part)).trim_matches('/');

        if part.is_empty() {
            continue;
        }

        joined.push('/');
        joined.push_str(part);
    }

    while joined.contains("//") {
        joined = joined.replace("//", "/");
    }

    joined
}
