//! Accounts, role flags and per-user access lists.

use serde::{Deserialize, Serialize};

use trellis_tag::default_origin;

/// The signed-in identity a request is evaluated against.
///
/// A default account, with an empty tag, represents a signed-out caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// The account's user tag, such as `+user/alice`; empty when signed out
    pub tag: String,
    /// The origin the account belongs to; `""` is the local origin
    pub origin: String,
    /// Role flags granted to the account
    #[serde(flatten)]
    pub roles: Roles,
    /// The account's explicit access lists, when any have been granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<UserAccess>,
}

impl Account {
    /// Whether the account represents a signed-in user.
    pub fn signed_in(&self) -> bool {
        !self.tag.is_empty()
    }

    /// Whether the account is signed in and not banned.
    pub fn active(&self) -> bool {
        self.signed_in() && !self.roles.banned
    }

    /// The account's user tag qualified with the account's origin.
    pub fn qualified_tag(&self) -> String {
        default_origin(&self.tag, &self.origin)
    }
}

/// Role flags attached to an [`Account`].
///
/// Roles form a ladder: each `is_*` accessor answers "does this account
/// hold at least that role", so an admin passes every check. A ban
/// suppresses all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roles {
    /// Unrestricted control, including sealed tags
    pub admin: bool,
    /// Moderation rights over all content on the origin
    #[serde(rename = "mod")]
    pub moderator: bool,
    /// May retag anyone's content
    pub editor: bool,
    /// May create and edit their own content
    pub user: bool,
    /// Read-only access
    pub viewer: bool,
    /// All privileges revoked
    pub banned: bool,
}

impl Roles {
    /// At least admin.
    pub fn is_admin(&self) -> bool {
        !self.banned && self.admin
    }

    /// At least moderator.
    pub fn is_mod(&self) -> bool {
        !self.banned && (self.admin || self.moderator)
    }

    /// At least editor.
    pub fn is_editor(&self) -> bool {
        !self.banned && (self.admin || self.moderator || self.editor)
    }

    /// At least a full user.
    pub fn is_user(&self) -> bool {
        !self.banned && (self.admin || self.moderator || self.editor || self.user)
    }

    /// At least a viewer.
    pub fn is_viewer(&self) -> bool {
        self.is_user() || (!self.banned && self.viewer)
    }
}

/// Explicit capability grants attached to an [`Account`].
///
/// Each list holds selectors; the optional `tag` names a tag the account
/// owns outright, origin included when it differs from the account's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccess {
    /// A tag the account owns, if one has been assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Selectors for refs the account may read
    pub read_access: Vec<String>,
    /// Selectors for refs the account may write
    pub write_access: Vec<String>,
    /// Selectors for tags the account may read
    pub tag_read_access: Vec<String>,
    /// Selectors for tags the account may apply
    pub tag_write_access: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_reads_role_flags_from_their_wire_names() -> Result<()> {
        let account: Account = serde_json::from_str(
            r#"{"tag": "+user/charlie", "mod": true}"#,
        )?;

        assert!(account.roles.moderator);
        assert!(account.roles.is_mod());
        assert!(!account.roles.is_admin());

        Ok(())
    }

    #[test]
    fn it_reads_access_lists_from_their_wire_names() -> Result<()> {
        let account: Account = serde_json::from_str(
            r#"{
                "tag": "+user/alice",
                "access": {
                    "writeAccess": ["science@*"],
                    "tagWriteAccess": ["+wiki/drafts"]
                }
            }"#,
        )?;
        let access = account.access.as_ref().unwrap();

        assert_eq!(access.write_access, vec!["science@*".to_string()]);
        assert_eq!(access.tag_write_access, vec!["+wiki/drafts".to_string()]);
        assert!(access.read_access.is_empty());
        assert!(access.tag.is_none());

        Ok(())
    }

    #[test]
    fn it_grants_every_lower_role_to_an_admin() -> Result<()> {
        let roles = Roles {
            admin: true,
            ..Default::default()
        };

        assert!(roles.is_admin());
        assert!(roles.is_mod());
        assert!(roles.is_editor());
        assert!(roles.is_user());
        assert!(roles.is_viewer());

        Ok(())
    }

    #[test]
    fn it_suppresses_all_roles_for_banned_accounts() -> Result<()> {
        let roles = Roles {
            admin: true,
            moderator: true,
            banned: true,
            ..Default::default()
        };

        assert!(!roles.is_admin());
        assert!(!roles.is_mod());
        assert!(!roles.is_viewer());

        Ok(())
    }

    #[test]
    fn it_treats_an_empty_tag_as_signed_out() -> Result<()> {
        let signed_out = Account::default();
        let signed_in = Account {
            tag: "+user/alice".into(),
            ..Default::default()
        };
        let banned = Account {
            tag: "+user/mallory".into(),
            roles: Roles {
                banned: true,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(!signed_out.signed_in());
        assert!(signed_in.active());
        assert!(banned.signed_in());
        assert!(!banned.active());

        Ok(())
    }

    #[test]
    fn it_qualifies_the_account_tag_with_its_origin() -> Result<()> {
        let remote = Account {
            tag: "+user/bob".into(),
            origin: "@other".into(),
            ..Default::default()
        };
        let local = Account {
            tag: "+user/alice".into(),
            ..Default::default()
        };

        assert_eq!(remote.qualified_tag(), "+user/bob@other");
        assert_eq!(local.qualified_tag(), "+user/alice");

        Ok(())
    }
}
