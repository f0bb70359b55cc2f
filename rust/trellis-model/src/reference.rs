//! The bookmarked-resource record at the center of the data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use trellis_tag::{qualify_tags, tags_include};

/// A bookmark of a single resource: its URL, the origin it was created
/// on, the tags applied to it and any plugin payloads.
///
/// Every field is optional on the wire. Absent collections deserialize
/// to their empty form, which keeps downstream predicates total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ref {
    /// The resource being bookmarked
    pub url: String,
    /// The origin this record was authored on; `""` is the local origin
    pub origin: String,
    /// Tags applied to the resource, unqualified unless remote
    pub tags: Vec<String>,
    /// Optional descriptive metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RefMetadata>,
    /// Plugin payloads keyed by the plugin's tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<BTreeMap<String, Value>>,
}

impl Ref {
    /// Whether this ref carries `target` or any descendant of it.
    ///
    /// An empty `target` never matches.
    pub fn has_tag(&self, target: &str) -> bool {
        tags_include(&self.tags, target)
    }

    /// Like [`Ref::has_tag`], but over the response tags recorded in
    /// `metadata.userUrls`. Refs without metadata have no responses.
    pub fn has_response(&self, target: &str) -> bool {
        match &self.metadata {
            Some(metadata) => tags_include(&metadata.user_urls, target),
            None => false,
        }
    }

    /// This ref's tags, each qualified with the ref's own origin unless
    /// it already names one.
    pub fn qualified_tags(&self) -> Vec<String> {
        qualify_tags(&self.tags, &self.origin)
    }

    /// Deserialize the plugin payload stored under `tag`, if present and
    /// well formed.
    pub fn plugin<T>(&self, tag: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let value = self.plugins.as_ref()?.get(tag)?;

        serde_json::from_value(value.clone()).ok()
    }

    /// Whether any payload at all is stored under `tag`.
    pub fn has_plugin(&self, tag: &str) -> bool {
        self.plugins
            .as_ref()
            .is_some_and(|plugins| plugins.contains_key(tag))
    }
}

/// Descriptive metadata attached to a [`Ref`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefMetadata {
    /// Tags of responses this resource has received
    pub user_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_matches_tags_hierarchically() -> Result<()> {
        let record = Ref {
            tags: vec!["science/biology".into(), "+user/alice".into()],
            ..Default::default()
        };

        assert!(record.has_tag("science"));
        assert!(record.has_tag("+user/alice"));
        assert!(!record.has_tag("scientist"));
        assert!(!record.has_tag(""));

        Ok(())
    }

    #[test]
    fn it_matches_responses_only_when_metadata_is_present() -> Result<()> {
        let bare = Ref::default();
        let with_responses = Ref {
            metadata: Some(RefMetadata {
                user_urls: vec!["plugin/comment/abc".into()],
            }),
            ..Default::default()
        };

        assert!(!bare.has_response("plugin/comment"));
        assert!(with_responses.has_response("plugin/comment"));
        assert!(!with_responses.has_response("plugin/vote"));

        Ok(())
    }

    #[test]
    fn it_qualifies_tags_with_the_record_origin() -> Result<()> {
        let record = Ref {
            origin: "@other".into(),
            tags: vec!["science".into(), "news@main".into()],
            ..Default::default()
        };

        assert_eq!(
            record.qualified_tags(),
            vec!["science@other".to_string(), "news@main".to_string()]
        );

        Ok(())
    }

    #[test]
    fn it_deserializes_from_a_sparse_wire_record() -> Result<()> {
        let record: Ref = serde_json::from_str(r#"{"url": "comment:1"}"#)?;

        assert_eq!(record.url, "comment:1");
        assert_eq!(record.origin, "");
        assert!(record.tags.is_empty());
        assert!(record.metadata.is_none());

        Ok(())
    }

    #[test]
    fn it_extracts_typed_plugin_payloads() -> Result<()> {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Counter {
            count: u32,
        }

        let record: Ref = serde_json::from_str(
            r#"{
                "url": "comment:1",
                "plugins": {"+plugin/vote": {"count": 3}}
            }"#,
        )?;

        assert!(record.has_plugin("+plugin/vote"));
        assert_eq!(record.plugin::<Counter>("+plugin/vote"), Some(Counter { count: 3 }));
        assert_eq!(record.plugin::<Counter>("+plugin/missing"), None);

        Ok(())
    }

    #[test]
    fn it_reads_response_tags_from_their_wire_name() -> Result<()> {
        let record: Ref = serde_json::from_str(
            r#"{"metadata": {"userUrls": ["plugin/comment/abc"]}}"#,
        )?;

        assert!(record.has_response("plugin/comment"));

        Ok(())
    }
}
