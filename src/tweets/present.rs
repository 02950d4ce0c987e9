use crate::error::RenderError;
use crate::tweets::model::{Index, NormalizedRecord, TWITTER_BASE};
use crate::tweets::render::prepare_content;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Datetime {
    pub datetime: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actions {
    pub like_href: String,
    pub retweet_href: String,
    pub reply_href: String,
}

/// Everything a page template needs for one post.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPost<'a> {
    pub record: &'a NormalizedRecord,
    pub content: String,
    pub created: Datetime,
    pub captured: Datetime,
    pub actions: Actions,
}

/// `2023-01-04T13:05:00.000Z` -> `Wed, Jan 4, 2023, 13:05 UTC`
pub fn make_datetime(datetime: &str) -> Result<Datetime, RenderError> {
    let parsed = DateTime::parse_from_rfc3339(datetime)
        .map_err(|_| RenderError::InvalidTimestamp(datetime.to_string()))?
        .with_timezone(&Utc);
    Ok(Datetime {
        datetime: datetime.to_string(),
        content: parsed.format("%a, %b %-d, %Y, %H:%M UTC").to_string(),
    })
}

pub fn make_actions(id: &str) -> Actions {
    Actions {
        like_href: format!("{TWITTER_BASE}/intent/like?tweet_id={id}"),
        retweet_href: format!("{TWITTER_BASE}/intent/retweet?tweet_id={id}"),
        reply_href: format!("{TWITTER_BASE}/intent/tweet?in_reply_to={id}"),
    }
}

pub fn tweet_info<'a>(index: &'a Index, id: &str) -> Option<&'a NormalizedRecord> {
    index.get(id)
}

pub fn render_post(record: &NormalizedRecord) -> Result<RenderedPost<'_>, RenderError> {
    Ok(RenderedPost {
        record,
        content: prepare_content(record),
        created: make_datetime(&record.created_at)?,
        captured: make_datetime(&record.captured_at)?,
        actions: make_actions(&record.id),
    })
}
