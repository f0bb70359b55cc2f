use crate::{parent_tag, set_public};

/// Whether `tag` sits at or below `target` in the hierarchy.
///
/// Containment requires equality or a `/`-separated prefix: `science/bio`
/// descends from `science`, while `scientist` does not. Comparison is on
/// whole strings, so markers and origins must match exactly. Either
/// argument being empty yields `false`.
pub fn is_subtag(tag: &str, target: &str) -> bool {
    if tag.is_empty() || target.is_empty() {
        return false;
    }

    tag == target
        || tag
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Expand `tag` into itself plus all of its ancestors, nearest first.
///
/// The tag itself keeps its origin; ancestors are produced by
/// [`parent_tag`] and so carry no origin. The empty string expands to
/// nothing.
pub fn expand_hierarchy(tag: &str) -> Vec<String> {
    if tag.is_empty() {
        return Vec::new();
    }

    let mut expanded = vec![tag.to_string()];
    let mut current = tag;

    while let Some(parent) = parent_tag(current) {
        expanded.push(parent.to_string());
        current = parent;
    }

    expanded
}

/// Whether any tag in `tags` is `target` or a descendant of it.
pub fn tags_include<S>(tags: &[S], target: &str) -> bool
where
    S: AsRef<str>,
{
    !target.is_empty() && tags.iter().any(|tag| is_subtag(tag.as_ref(), target))
}

/// Remove `target` and each of its ancestors from `tags`.
///
/// See [`remove_tags`] for the matching rules.
pub fn remove_tag<S>(target: &str, tags: &[S]) -> Vec<String>
where
    S: AsRef<str>,
{
    remove_tags(&[target], tags)
}

/// Remove every target in `targets`, and each target's ancestors, from
/// `tags`.
///
/// Matching ignores visibility markers on both sides but is otherwise
/// exact, so removing `people/murray` takes out `_people/murray` and the
/// ancestor `people` while leaving `people/murray/anne` and `peoples`
/// alone. Tags that match nothing survive with their markers untouched,
/// duplicates of a match are all removed, and targets absent from the
/// set are a no-op.
pub fn remove_tags<S, T>(targets: &[S], tags: &[T]) -> Vec<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut doomed: Vec<String> = Vec::new();

    for target in targets {
        for ancestor in expand_hierarchy(set_public(target.as_ref())) {
            if !doomed.contains(&ancestor) {
                doomed.push(ancestor);
            }
        }
    }

    tags.iter()
        .filter(|tag| {
            let stripped = set_public(tag.as_ref());
            !doomed.iter().any(|needle| needle == stripped)
        })
        .map(|tag| tag.as_ref().to_string())
        .collect()
}
