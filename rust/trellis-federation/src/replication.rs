//! Replication endpoint checks.
//!
//! Replication between servers is configured through refs in plugin
//! space: a ref tagged for pull mirrors a remote origin into this
//! server, one tagged for push mirrors a local origin out. The checks
//! here answer whether a given ref is the endpoint responsible for a
//! given origin, which is what keeps one logical link from being
//! replicated twice.

use trellis_model::{ApiOriginMap, OriginPluginConfig, Ref};

/// Tag marking a ref as a pull-replication endpoint.
pub const ORIGIN_PULL_TAG: &str = "+plugin/origin/pull";

/// Tag marking a ref as a push-replication endpoint.
pub const ORIGIN_PUSH_TAG: &str = "+plugin/origin/push";

/// Whether `record` is the endpoint that pulls `origin`'s content into
/// this server.
///
/// The record must be tagged for pull replication and carry no
/// push-direction configuration, and the API table entry for its URL
/// must name the alias the endpoint pulls as: its configured `remote`,
/// or `origin` itself when the configuration leaves that unset.
pub fn is_replicating(origin: &str, record: &Ref, apis: &ApiOriginMap) -> bool {
    if !record.has_tag(ORIGIN_PULL_TAG) {
        return false;
    }

    if record.has_tag(ORIGIN_PUSH_TAG) || record.has_plugin(ORIGIN_PUSH_TAG) {
        return false;
    }

    let config: OriginPluginConfig = record.plugin(ORIGIN_PULL_TAG).unwrap_or_default();
    let remote = config.remote.as_deref().unwrap_or(origin);

    apis.get(&record.url)
        .is_some_and(|alias| alias.as_str() == remote)
}

/// Whether `record` is the endpoint that pushes `origin`'s content out
/// to another server.
///
/// The record must be tagged for push replication, and its configured
/// `local` alias must equal `origin`. An unset `local` stands for the
/// root origin, so it matches only `origin == ""`.
pub fn is_pushing(origin: &str, record: &Ref) -> bool {
    if !record.has_tag(ORIGIN_PUSH_TAG) {
        return false;
    }

    let config: OriginPluginConfig = record.plugin(ORIGIN_PUSH_TAG).unwrap_or_default();

    config.local.as_deref().unwrap_or_default() == origin
}
