use crate::error::HarvestError;
use crate::tweets::model::{
    HashtagRef, LinkRef, MEDIA_ALT_TEXT, MediaRef, NormalizedRecord, SnapshotDescriptor, UserRef,
    Users, permalink,
};
use crate::tweets::raw::RawSnapshot;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Maps an optional sequence item by item, dropping items the constructor
/// rejects. Absent or empty results collapse to `None` so the field is left
/// out of the record.
fn collect_present<T, U>(
    items: Option<&[T]>,
    build: impl FnMut(&T) -> Option<U>,
) -> Option<Vec<U>> {
    let out: Vec<U> = items?.iter().filter_map(build).collect();
    if out.is_empty() { None } else { Some(out) }
}

pub fn read_snapshot(
    data_dir: &Path,
    descriptor: &SnapshotDescriptor,
) -> Result<RawSnapshot, HarvestError> {
    let path = data_dir.join(&descriptor.file_name);
    let parse_err = |source: Box<dyn std::error::Error + Send + Sync>| HarvestError::Parse {
        file: descriptor.file_name.clone(),
        source,
    };
    let raw = fs::read_to_string(&path).map_err(|err| parse_err(Box::new(err)))?;
    serde_json::from_str(&raw).map_err(|err| parse_err(Box::new(err)))
}

pub fn extract_record(descriptor: &SnapshotDescriptor, raw: &RawSnapshot) -> NormalizedRecord {
    let mut users = Users::new();
    let author = raw.user.as_ref().map(|user| {
        UserRef::new(
            &user.id_str,
            &user.screen_name,
            &user.name,
            user.profile_image_url_https.as_deref(),
        )
    });
    let author_id = author.as_ref().map(|a| a.id.clone()).unwrap_or_default();
    let href = permalink(author.as_ref().map(|a| a.handle.as_str()), &raw.id_str);
    if let Some(author) = author {
        users.insert(author.id.clone(), author);
    }

    let entities = raw.entities.as_ref();

    let user_mentions = entities.and_then(|e| e.user_mentions.as_deref());
    let mentions = collect_present(user_mentions, |mention| {
        users.entry(mention.id_str.clone()).or_insert_with(|| {
            UserRef::new(&mention.id_str, &mention.screen_name, &mention.name, None)
        });
        Some(mention.id_str.clone())
    });

    let links = collect_present(entities.and_then(|e| e.urls.as_deref()), |link| {
        Some(LinkRef {
            short_link: link.url.clone(),
            display_text: link.display_url.clone(),
        })
    });

    let hashtags = collect_present(entities.and_then(|e| e.hashtags.as_deref()), |tag| {
        Some(HashtagRef::new(&tag.text))
    });
    let media_entities = entities.and_then(|e| e.media.as_deref());

    let media = raw.photos.as_deref().filter(|p| !p.is_empty()).and_then(|photos| {
        let photo_links: HashMap<&str, &str> = photos
            .iter()
            .map(|photo| (photo.expanded_url.as_str(), photo.url.as_str()))
            .collect();
        collect_present(media_entities, |item| {
            let full_link = photo_links.get(item.expanded_url.as_str())?;
            Some(MediaRef {
                full_link: (*full_link).to_string(),
                short_link: item.url.clone(),
                alt_text: MEDIA_ALT_TEXT.to_string(),
            })
        })
    });

    let reply_to_user_id = raw
        .in_reply_to_user_id_str
        .as_ref()
        .filter(|id| !id.is_empty())
        .cloned();

    NormalizedRecord {
        id: descriptor.post_id.clone(),
        permalink: href,
        created_at: raw.created_at.clone(),
        captured_at: descriptor.captured_iso(),
        text: raw.text.clone(),
        author_id,
        users,
        mentions,
        links,
        hashtags,
        media,
        reply_to_user_id,
    }
}

/// Reads and extracts every snapshot in parallel. The first failure wins and
/// no records are returned.
pub fn extract_all(
    data_dir: &Path,
    descriptors: &[SnapshotDescriptor],
) -> Result<Vec<NormalizedRecord>, HarvestError> {
    descriptors
        .par_iter()
        .map(|descriptor| -> Result<NormalizedRecord, HarvestError> {
            let raw = read_snapshot(data_dir, descriptor)?;
            Ok(extract_record(descriptor, &raw))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn descriptor(id: &str) -> SnapshotDescriptor {
        SnapshotDescriptor {
            post_id: id.to_string(),
            captured_at: NaiveDate::from_ymd_opt(2023, 2, 15).expect("date"),
            file_name: format!("{id}.20230215.json"),
        }
    }

    fn parse(json: &str) -> RawSnapshot {
        serde_json::from_str(json).expect("raw snapshot")
    }

    #[test]
    fn bare_snapshot_omits_optional_fields() {
        let raw = parse(
            r#"{"id_str":"10","text":"plain","created_at":"2023-01-01T12:00:00.000Z",
                "user":{"id_str":"7","screen_name":"alice","name":"Alice"}}"#,
        );
        let record = extract_record(&descriptor("10"), &raw);
        assert!(record.mentions.is_none());
        assert!(record.links.is_none());
        assert!(record.hashtags.is_none());
        assert!(record.media.is_none());
        assert!(record.reply_to_user_id.is_none());

        let value = serde_json::to_value(&record).expect("serialize");
        for key in ["mentions", "links", "hashtags", "media", "replyToUserId"] {
            assert!(value.get(key).is_none(), "{key} should be absent");
        }
        assert_eq!(record.permalink, "https://twitter.com/alice/status/10");
        assert_eq!(record.captured_at, "2023-02-15T00:00:00.000Z");
        assert_eq!(record.author_id, "7");
        assert_eq!(record.users.len(), 1);
    }

    #[test]
    fn empty_entity_lists_are_omitted() {
        let raw = parse(
            r#"{"id_str":"10","text":"x","created_at":"t",
                "user":{"id_str":"7","screen_name":"alice","name":"Alice"},
                "entities":{"user_mentions":[],"urls":[],"hashtags":[],"media":[]},
                "photos":[],"in_reply_to_user_id_str":""}"#,
        );
        let record = extract_record(&descriptor("10"), &raw);
        assert!(record.mentions.is_none());
        assert!(record.links.is_none());
        assert!(record.hashtags.is_none());
        assert!(record.media.is_none());
        assert!(record.reply_to_user_id.is_none());
    }

    #[test]
    fn mentions_extend_users_without_overwriting_author() {
        let raw = parse(
            r#"{"id_str":"10","text":"@alice @bob","created_at":"t",
                "user":{"id_str":"7","screen_name":"alice","name":"Alice",
                        "profile_image_url_https":"https://pbs/alice.jpg"},
                "entities":{"user_mentions":[
                    {"id_str":"7","screen_name":"alice","name":"Alice"},
                    {"id_str":"8","screen_name":"bob","name":"Bob"}]}}"#,
        );
        let record = extract_record(&descriptor("10"), &raw);
        assert_eq!(
            record.mentions,
            Some(vec!["7".to_string(), "8".to_string()])
        );
        assert_eq!(
            record.users["7"].avatar_link.as_deref(),
            Some("https://pbs/alice.jpg")
        );
        assert_eq!(record.users["8"].tag, "@bob");
        assert!(record.users["8"].avatar_link.is_none());
    }

    #[test]
    fn links_and_hashtags_are_mapped() {
        let raw = parse(
            r##"{"id_str":"10","text":"x","created_at":"t",
                "entities":{"urls":[{"url":"https://t.co/xyz","display_url":"example.com"}],
                            "hashtags":[{"text":"rust"}]}}"##,
        );
        let record = extract_record(&descriptor("10"), &raw);
        let links = record.links.expect("links");
        assert_eq!(links[0].short_link, "https://t.co/xyz");
        assert_eq!(links[0].display_text, "example.com");
        let hashtags = record.hashtags.expect("hashtags");
        assert_eq!(hashtags[0].tag, "#rust");
        assert_eq!(hashtags[0].link, "https://twitter.com/hashtag/rust");
    }

    #[test]
    fn media_without_matching_photo_is_dropped() {
        let raw = parse(
            r#"{"id_str":"10","text":"look https://t.co/m1 https://t.co/m2","created_at":"t",
                "entities":{"media":[
                    {"url":"https://t.co/m1","expanded_url":"https://twitter.com/a/status/10/photo/1"},
                    {"url":"https://t.co/m2","expanded_url":"https://twitter.com/a/status/10/photo/2"}]},
                "photos":[{"expandedUrl":"https://twitter.com/a/status/10/photo/1","url":"https://pbs/1.jpg"}]}"#,
        );
        let record = extract_record(&descriptor("10"), &raw);
        let media = record.media.expect("media");
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].full_link, "https://pbs/1.jpg");
        assert_eq!(media[0].short_link, "https://t.co/m1");
        assert_eq!(media[0].alt_text, MEDIA_ALT_TEXT);
    }

    #[test]
    fn no_matching_photo_at_all_leaves_media_out() {
        let raw = parse(
            r#"{"id_str":"10","text":"x","created_at":"t",
                "entities":{"media":[{"url":"https://t.co/m1","expanded_url":"https://elsewhere"}]},
                "photos":[{"expandedUrl":"https://twitter.com/a/status/10/photo/1","url":"https://pbs/1.jpg"}]}"#,
        );
        assert!(extract_record(&descriptor("10"), &raw).media.is_none());
    }

    #[test]
    fn missing_author_uses_placeholder_permalink() {
        let raw = parse(r#"{"id_str":"10","text":"x","created_at":"t"}"#);
        let record = extract_record(&descriptor("10"), &raw);
        assert_eq!(record.permalink, "https://twitter.com/twitter/status/10");
        assert!(record.users.is_empty());
        assert_eq!(record.author_id, "");
    }

    #[test]
    fn reply_target_is_copied() {
        let raw = parse(
            r#"{"id_str":"10","text":"x","created_at":"t","in_reply_to_user_id_str":"99"}"#,
        );
        assert_eq!(
            extract_record(&descriptor("10"), &raw).reply_to_user_id.as_deref(),
            Some("99")
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let raw = parse(
            r#"{"id_str":"10","text":"@bob hi","created_at":"t",
                "user":{"id_str":"7","screen_name":"alice","name":"Alice"},
                "entities":{"user_mentions":[{"id_str":"8","screen_name":"bob","name":"Bob"}]}}"#,
        );
        assert_eq!(
            extract_record(&descriptor("10"), &raw),
            extract_record(&descriptor("10"), &raw)
        );
    }

    #[test]
    fn invalid_json_reports_file_name() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("10.20230215.json"), "{not json").expect("write");
        let err = read_snapshot(tmp.path(), &descriptor("10")).expect_err("invalid json");
        match err {
            HarvestError::Parse { file, .. } => assert_eq!(file, "10.20230215.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_bad_file_fails_the_whole_batch() {
        let tmp = tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("10.20230215.json"),
            r#"{"id_str":"10","text":"ok","created_at":"t"}"#,
        )
        .expect("write");
        fs::write(tmp.path().join("11.20230215.json"), "[]").expect("write");

        let result = extract_all(tmp.path(), &[descriptor("10"), descriptor("11")]);
        assert!(matches!(result, Err(HarvestError::Parse { .. })));
    }

    #[test]
    fn batch_extracts_every_descriptor() {
        let tmp = tempdir().expect("tempdir");
        for id in ["10", "11"] {
            fs::write(
                tmp.path().join(format!("{id}.20230215.json")),
                format!(r#"{{"id_str":"{id}","text":"t{id}","created_at":"t"}}"#),
            )
            .expect("write");
        }
        let records = extract_all(tmp.path(), &[descriptor("10"), descriptor("11")]).expect("batch");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "t11");
    }
}
