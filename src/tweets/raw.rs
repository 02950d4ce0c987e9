//! Shape of the syndication JSON captured by `fetch`. Every field the
//! producer may leave out is optional here; unknown keys are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id_str: String,
    /// Handle without the leading `@`.
    pub screen_name: String,
    pub name: String,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLink {
    pub url: String,
    pub display_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHashtag {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMedia {
    pub url: String,
    pub expanded_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub user_mentions: Option<Vec<RawUser>>,
    #[serde(default)]
    pub urls: Option<Vec<RawLink>>,
    #[serde(default)]
    pub hashtags: Option<Vec<RawHashtag>>,
    #[serde(default)]
    pub media: Option<Vec<RawMedia>>,
}

/// Photo entries use camelCase keys, unlike the rest of the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPhoto {
    #[serde(rename = "expandedUrl")]
    pub expanded_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub id_str: String,
    pub text: String,
    #[serde(default)]
    pub user: Option<RawUser>,
    pub created_at: String,
    #[serde(default)]
    pub entities: Option<RawEntities>,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    pub in_reply_to_user_id_str: Option<String>,
}
