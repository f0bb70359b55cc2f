//! Scenario tests for mailbox translation and replication pairing
//! across a three-server federation.
mod mailbox_routing {
    use std::collections::BTreeMap;

    use testresult::TestResult;
    use trellis_federation::{
        TrellisFederationError, get_local_mailbox, get_mailbox, is_pushing, is_replicating,
        mailbox_user_tag, mailboxes,
    };
    use trellis_model::{ApiOriginMap, OriginAliasMap, Ref};

    // This server is @main. Records arrive from @other, which knows
    // @main by the alias @mt and a third server by @elsewhere.
    fn alias_lookup() -> OriginAliasMap {
        let mut at_other = BTreeMap::new();
        at_other.insert("@mt".to_string(), "@main".to_string());
        at_other.insert("@elsewhere".to_string(), "@third".to_string());

        let mut lookup = OriginAliasMap::new();
        lookup.insert("@other".to_string(), at_other);
        lookup
    }

    fn reply_from_other(tags: &[&str]) -> Ref {
        Ref {
            url: "comment:1".into(),
            origin: "@other".into(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_remote_outbox_addressed_home_collapses_to_an_inbox() -> TestResult {
        let translated =
            get_local_mailbox("plugin/outbox/mt/bob", "@main", "@other", &alias_lookup())?;

        assert_eq!(translated, Some("plugin/inbox/bob".to_string()));

        Ok(())
    }

    #[test]
    fn test_translation_agrees_with_locally_built_addresses() -> TestResult {
        // What @other files under its outbox for @mt is, from @main's
        // point of view, exactly the address get_mailbox builds for a
        // local user.
        let local_address = get_mailbox("+user/bob@main", "@main");
        let translated = get_local_mailbox(
            "plugin/outbox/mt/user/bob",
            "@main",
            "@other",
            &alias_lookup(),
        )?;

        assert_eq!(translated, Some(local_address));

        Ok(())
    }

    #[test]
    fn test_user_tags_survive_a_round_trip_through_an_address() -> TestResult {
        let address = get_mailbox("+user/bob@other", "@main");

        assert_eq!(address, "plugin/outbox/other/user/bob");
        assert_eq!(mailbox_user_tag(&address), Some("user/bob@other".to_string()));

        Ok(())
    }

    #[test]
    fn test_notification_routes_for_a_remote_reply() -> TestResult {
        let reply = reply_from_other(&[
            "+user/bob",
            "science",
            "plugin/outbox/mt/user/alice",
        ]);

        let routes = mailboxes(&reply, "+user/alice@main", &alias_lookup());

        assert_eq!(
            routes,
            vec![
                "plugin/outbox/other/user/bob".to_string(),
                "plugin/inbox/user/alice".to_string(),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_third_party_routes_are_re_expressed_not_dropped() -> TestResult {
        let reply = reply_from_other(&["+user/bob", "plugin/outbox/elsewhere/user/carol"]);

        let routes = mailboxes(&reply, "+user/alice@main", &alias_lookup());

        assert_eq!(
            routes,
            vec![
                "plugin/outbox/other/user/bob".to_string(),
                "plugin/outbox/third/user/carol".to_string(),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_unknown_aliases_drop_only_their_own_route() -> TestResult {
        let reply = reply_from_other(&[
            "+user/bob",
            "plugin/outbox/unmapped/user/dana",
            "plugin/outbox/mt/user/alice",
        ]);

        let routes = mailboxes(&reply, "+user/alice@main", &alias_lookup());

        assert_eq!(
            routes,
            vec![
                "plugin/outbox/other/user/bob".to_string(),
                "plugin/inbox/user/alice".to_string(),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_the_caller_is_not_notified_about_their_own_reply() -> TestResult {
        let local_thread = Ref {
            url: "comment:2".into(),
            tags: vec!["+user/alice".into(), "+user/bob".into()],
            ..Default::default()
        };

        let routes = mailboxes(&local_thread, "+user/alice", &OriginAliasMap::new());

        assert_eq!(routes, vec!["plugin/inbox/user/bob".to_string()]);

        Ok(())
    }

    #[test]
    fn test_duplicate_routes_collapse_in_order() -> TestResult {
        let local_thread = Ref {
            url: "comment:3".into(),
            tags: vec!["+user/bob".into(), "plugin/inbox/user/bob".into()],
            ..Default::default()
        };

        let routes = mailboxes(&local_thread, "+user/alice", &OriginAliasMap::new());

        assert_eq!(routes, vec!["plugin/inbox/user/bob".to_string()]);

        Ok(())
    }

    #[test]
    fn test_local_records_skip_address_validation() -> TestResult {
        // Addresses on local records pass through before any parsing,
        // while the same string from a remote record is refused.
        let lookup = OriginAliasMap::new();

        assert_eq!(
            get_local_mailbox("science", "@main", "", &lookup)?,
            Some("science".to_string())
        );
        assert_eq!(
            get_local_mailbox("science", "@main", "@other", &lookup),
            Err(TrellisFederationError::InvalidMailboxFormat(
                "science".to_string()
            ))
        );

        Ok(())
    }

    #[test]
    fn test_pull_and_push_endpoints_classify_their_own_direction() -> TestResult {
        let pull: Ref = serde_json::from_str(
            r#"{
                "url": "https://other.example/api",
                "tags": ["+plugin/origin/pull"],
                "plugins": {"+plugin/origin/pull": {"local": "@main", "remote": "@mt"}}
            }"#,
        )?;
        let push: Ref = serde_json::from_str(
            r#"{
                "url": "https://other.example/api",
                "tags": ["+plugin/origin/push"],
                "plugins": {"+plugin/origin/push": {"local": "@main", "remote": "@mt"}}
            }"#,
        )?;

        let mut apis = ApiOriginMap::new();
        apis.insert("https://other.example/api".to_string(), "@mt".to_string());

        assert!(is_replicating("@mt", &pull, &apis));
        assert!(!is_pushing("@main", &pull));
        assert!(is_pushing("@main", &push));
        assert!(!is_replicating("@mt", &push, &apis));

        Ok(())
    }
}
