use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TWITTER_BASE: &str = "https://twitter.com";
pub const FALLBACK_HANDLE: &str = "twitter";
pub const MEDIA_ALT_TEXT: &str = "unknown tweet media content";

/// One accepted `<id>.<YYYYMMDD>.json` entry of the snapshot directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDescriptor {
    pub post_id: String,
    pub captured_at: NaiveDate,
    pub file_name: String,
}

impl SnapshotDescriptor {
    /// Capture date as an ISO timestamp at UTC midnight, e.g. `2023-02-15T00:00:00.000Z`.
    pub fn captured_iso(&self) -> String {
        format!("{}T00:00:00.000Z", self.captured_at.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    #[serde(rename = "username")]
    pub handle: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub tag: String,
    #[serde(rename = "href")]
    pub profile_link: String,
    #[serde(rename = "imageHref", default, skip_serializing_if = "Option::is_none")]
    pub avatar_link: Option<String>,
}

impl UserRef {
    pub fn new(id: &str, handle: &str, display_name: &str, avatar_link: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            handle: handle.to_string(),
            display_name: display_name.to_string(),
            tag: format!("@{handle}"),
            profile_link: format!("{TWITTER_BASE}/{handle}"),
            avatar_link: avatar_link
                .filter(|href| !href.is_empty())
                .map(ToOwned::to_owned),
        }
    }
}

pub type Users = BTreeMap<String, UserRef>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    #[serde(rename = "tinyHref")]
    pub short_link: String,
    #[serde(rename = "content")]
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagRef {
    pub name: String,
    pub tag: String,
    #[serde(rename = "href")]
    pub link: String,
}

impl HashtagRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: format!("#{name}"),
            link: format!("{TWITTER_BASE}/hashtag/{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "href")]
    pub full_link: String,
    #[serde(rename = "tinyHref")]
    pub short_link: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
}

/// A harvested post, as stored in the index and consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: String,
    #[serde(rename = "href")]
    pub permalink: String,
    #[serde(rename = "created")]
    pub created_at: String,
    #[serde(rename = "captured")]
    pub captured_at: String,
    pub text: String,
    #[serde(rename = "userId")]
    pub author_id: String,
    pub users: Users,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<HashtagRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaRef>>,
    #[serde(
        rename = "replyToUserId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_to_user_id: Option<String>,
}

pub type Index = BTreeMap<String, NormalizedRecord>;

pub fn permalink(handle: Option<&str>, post_id: &str) -> String {
    format!(
        "{TWITTER_BASE}/{}/status/{post_id}",
        handle.unwrap_or(FALLBACK_HANDLE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ref_derives_tag_and_profile_link() {
        let user = UserRef::new("42", "bob", "Bob", None);
        assert_eq!(user.tag, "@bob");
        assert_eq!(user.profile_link, "https://twitter.com/bob");
        assert!(user.avatar_link.is_none());
    }

    #[test]
    fn permalink_falls_back_to_placeholder_handle() {
        assert_eq!(
            permalink(None, "123"),
            "https://twitter.com/twitter/status/123"
        );
        assert_eq!(
            permalink(Some("alice"), "123"),
            "https://twitter.com/alice/status/123"
        );
    }

    #[test]
    fn captured_iso_is_utc_midnight() {
        let descriptor = SnapshotDescriptor {
            post_id: "1".to_string(),
            captured_at: NaiveDate::from_ymd_opt(2023, 2, 15).expect("date"),
            file_name: "1.20230215.json".to_string(),
        };
        assert_eq!(descriptor.captured_iso(), "2023-02-15T00:00:00.000Z");
    }

    #[test]
    fn record_serializes_with_index_keys() {
        let mut users = Users::new();
        users.insert(
            "7".to_string(),
            UserRef::new("7", "alice", "Alice", Some("https://img/a.png")),
        );
        let record = NormalizedRecord {
            id: "1".to_string(),
            permalink: permalink(Some("alice"), "1"),
            created_at: "2023-01-01T10:00:00.000Z".to_string(),
            captured_at: "2023-01-02T00:00:00.000Z".to_string(),
            text: "hi".to_string(),
            author_id: "7".to_string(),
            users,
            mentions: None,
            links: None,
            hashtags: None,
            media: None,
            reply_to_user_id: None,
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["href"], "https://twitter.com/alice/status/1");
        assert_eq!(value["userId"], "7");
        assert_eq!(value["users"]["7"]["imageHref"], "https://img/a.png");
        assert!(value.get("mentions").is_none());
        assert!(value.get("replyToUserId").is_none());
    }
}
