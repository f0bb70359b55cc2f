//! Origin tables used when content crosses between federated servers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Alias translation table for remote origins.
///
/// Keyed first by the origin a record arrived from, then by the alias
/// that origin uses for some third origin. The value is the alias this
/// server uses for the same origin. Both alias layers carry their
/// leading `@`.
pub type OriginAliasMap = BTreeMap<String, BTreeMap<String, String>>;

/// Lookup from a replication target URL to the origin alias its API
/// serves content for.
pub type ApiOriginMap = BTreeMap<String, String>;

/// Configuration payload carried by origin replication plugins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginPluginConfig {
    /// The alias of the local origin being mirrored, when not the root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    /// The alias the remote side is known by here, when not the root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}
