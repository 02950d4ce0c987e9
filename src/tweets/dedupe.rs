use crate::tweets::model::SnapshotDescriptor;
use std::cmp::Ordering;

/// Descending order: longer ids first, then larger ids, then later captures.
/// Comparing digit count before the string keeps arbitrarily large ids in
/// numeric order without parsing them.
fn newest_first(a: &SnapshotDescriptor, b: &SnapshotDescriptor) -> Ordering {
    b.post_id
        .len()
        .cmp(&a.post_id.len())
        .then_with(|| b.post_id.cmp(&a.post_id))
        .then_with(|| b.captured_at.cmp(&a.captured_at))
}

/// Keeps the latest capture of every post id.
pub fn most_recent_snapshots(mut entries: Vec<SnapshotDescriptor>) -> Vec<SnapshotDescriptor> {
    entries.sort_by(newest_first);

    let mut kept: Vec<SnapshotDescriptor> = Vec::with_capacity(entries.len());
    for entry in entries {
        if kept.last().is_some_and(|last| last.post_id == entry.post_id) {
            continue;
        }
        kept.push(entry);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snap(id: &str, y: i32, m: u32, d: u32) -> SnapshotDescriptor {
        SnapshotDescriptor {
            post_id: id.to_string(),
            captured_at: NaiveDate::from_ymd_opt(y, m, d).expect("date"),
            file_name: format!("{id}.{y:04}{m:02}{d:02}.json"),
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(most_recent_snapshots(Vec::new()).is_empty());
    }

    #[test]
    fn keeps_latest_capture_per_id() {
        let got = most_recent_snapshots(vec![
            snap("123", 2023, 1, 1),
            snap("123", 2023, 2, 15),
            snap("123", 2022, 12, 31),
        ]);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].file_name, "123.20230215.json");
    }

    #[test]
    fn orders_ids_numerically_without_parsing() {
        let got = most_recent_snapshots(vec![
            snap("99", 2023, 1, 1),
            snap("1000", 2023, 1, 1),
            snap("123", 2023, 1, 1),
            snap("99999999999999999999999999", 2023, 1, 1),
        ]);
        let ids: Vec<&str> = got.iter().map(|s| s.post_id.as_str()).collect();
        assert_eq!(ids, vec!["99999999999999999999999999", "1000", "123", "99"]);
    }

    #[test]
    fn one_survivor_per_id_across_interleaved_input() {
        let got = most_recent_snapshots(vec![
            snap("2", 2023, 3, 1),
            snap("1", 2023, 1, 1),
            snap("2", 2023, 5, 1),
            snap("1", 2023, 4, 1),
            snap("2", 2023, 4, 1),
        ]);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].file_name, "2.20230501.json");
        assert_eq!(got[1].file_name, "1.20230401.json");
    }

    #[test]
    fn running_twice_is_a_fixed_point() {
        let once = most_recent_snapshots(vec![
            snap("5", 2023, 1, 1),
            snap("5", 2023, 1, 2),
            snap("17", 2022, 6, 1),
        ]);
        let twice = most_recent_snapshots(once.clone());
        assert_eq!(once, twice);
    }
}
