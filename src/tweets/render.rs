//! Turns a harvested record's raw text into display text with anchors.
//!
//! The steps run in a fixed order and each works on the previous step's
//! output. Later patterns are matched against earlier markup too: a hashtag
//! that also appears inside a link's display text gets wrapped a second time.
//! That ordering is what the page has always shown and is kept as is.

use crate::tweets::model::{HashtagRef, LinkRef, MediaRef, NormalizedRecord, UserRef, Users};

const ANCHOR_ATTRS: &str = r#"rel="noreferrer noopener" target="_blank""#;

/// Literal, case-sensitive, non-overlapping replacement scanning left to
/// right. An empty pattern never matches.
pub fn replace_all(content: &str, pattern: &str, replacement: &str) -> String {
    if pattern.is_empty() {
        return content.to_string();
    }
    content.replace(pattern, replacement)
}

fn trim_reply_prefix(content: &str, tag: &str) -> String {
    content.strip_prefix(tag).unwrap_or(content).to_string()
}

fn replace_link(content: &str, link: &LinkRef) -> String {
    replace_all(
        content,
        &link.short_link,
        &format!(
            r#"<a {ANCHOR_ATTRS} href="{}">{}</a>"#,
            link.short_link, link.display_text
        ),
    )
}

// Mention anchors carry an unquoted href; the published pages rely on it.
fn replace_mention(content: &str, user: &UserRef) -> String {
    replace_all(
        content,
        &user.tag,
        &format!(
            "<a {ANCHOR_ATTRS} href={}>{}</a>",
            user.profile_link, user.tag
        ),
    )
}

fn replace_hashtag(content: &str, hashtag: &HashtagRef) -> String {
    replace_all(
        content,
        &hashtag.tag,
        &format!(
            r#"<a {ANCHOR_ATTRS} href="{}">{}</a>"#,
            hashtag.link, hashtag.tag
        ),
    )
}

fn remove_media(content: &str, media: &MediaRef) -> String {
    replace_all(content, &media.short_link, "")
}

fn strip_reply_to(content: String, users: &Users, reply_to: Option<&str>) -> String {
    match reply_to.and_then(|id| users.get(id)) {
        Some(user) => trim_reply_prefix(&content, &user.tag),
        None => content,
    }
}

fn linkify_mentions(content: String, users: &Users, mentions: &[String]) -> String {
    mentions
        .iter()
        .filter_map(|id| users.get(id))
        .fold(content, |acc, user| replace_mention(&acc, user))
}

pub fn prepare_content(record: &NormalizedRecord) -> String {
    let mut content = strip_reply_to(
        record.text.clone(),
        &record.users,
        record.reply_to_user_id.as_deref(),
    );

    if let Some(links) = record.links.as_deref() {
        content = links
            .iter()
            .fold(content, |acc, link| replace_link(&acc, link));
    }
    if let Some(mentions) = record.mentions.as_deref() {
        content = linkify_mentions(content, &record.users, mentions);
    }
    if let Some(hashtags) = record.hashtags.as_deref() {
        content = hashtags
            .iter()
            .fold(content, |acc, hashtag| replace_hashtag(&acc, hashtag));
    }
    if let Some(media) = record.media.as_deref() {
        content = media
            .iter()
            .fold(content, |acc, item| remove_media(&acc, item));
    }

    trim_display(&content).to_string()
}

// Also strips U+FEFF, which `char::is_whitespace` does not cover.
fn trim_display(content: &str) -> &str {
    content.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
