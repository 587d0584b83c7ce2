// Aggregations behind the dashboard charts.
// Pure functions over topic rows; no I/O.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::discourse::Topic;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Label for topics whose category could not be resolved.
pub const UNCATEGORIZED: &str = "(none)";

/// Which timestamp of a topic to bin by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    LastPosted,
    Created,
}

impl TimeField {
    fn of(&self, topic: &Topic) -> Option<DateTime<Utc>> {
        match self {
            TimeField::LastPosted => topic.last_posted_at,
            TimeField::Created => Some(topic.created_at),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TimeField::LastPosted => "last post",
            TimeField::Created => "creation",
        }
    }
}

/// Topics in `category`, or all topics when `category` is `None`.
pub fn filter_by_category<'a>(topics: &'a [Topic], category: Option<&str>) -> Vec<&'a Topic> {
    topics
        .iter()
        .filter(|t| category.is_none() || t.category.as_deref() == category)
        .collect()
}

/// Counts per UTC calendar day, oldest first. Days between the first and last
/// date with no topics are present with a zero count.
pub fn by_date(topics: &[&Topic], field: TimeField) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ts in topics.iter().filter_map(|t| field.of(t)) {
        *counts.entry(ts.date_naive()).or_default() += 1;
    }
    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| {
            let n = counts.get(&day).copied().unwrap_or(0);
            (day.format("%m-%d").to_string(), n)
        })
        .collect()
}

/// Counts per day of week, Monday first.
pub fn by_weekday(topics: &[&Topic], field: TimeField) -> Vec<(String, u64)> {
    let mut counts = [0u64; 7];
    for ts in topics.iter().filter_map(|t| field.of(t)) {
        counts[ts.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, n)| (day.to_string(), n))
        .collect()
}

/// Counts per UTC hour of day.
pub fn by_hour(topics: &[&Topic], field: TimeField) -> Vec<(String, u64)> {
    let mut counts = [0u64; 24];
    for ts in topics.iter().filter_map(|t| field.of(t)) {
        counts[ts.hour() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, &n)| (hour.to_string(), n))
        .collect()
}

/// Counts per category, largest first, ties by name.
pub fn by_category(topics: &[Topic]) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for topic in topics {
        *counts
            .entry(topic.category.as_deref().unwrap_or(UNCATEGORIZED))
            .or_default() += 1;
    }
    let mut counts: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Equal-width histogram over `values` with at most `max_bins` bins starting at zero.
/// Labels are the lower bound of each bin.
pub fn histogram(values: &[u64], max_bins: usize) -> Vec<(String, u64)> {
    let Some(&max) = values.iter().max() else {
        return Vec::new();
    };
    let max_bins = max_bins.max(1) as u64;
    let width = (max + 1).div_ceil(max_bins).max(1);
    let bins = (max / width + 1) as usize;

    let mut counts = vec![0u64; bins];
    for &v in values {
        counts[(v / width) as usize] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| ((i as u64 * width).to_string(), n))
        .collect()
}

/// Totals shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub topics: usize,
    pub views: u64,
    pub posts: u64,
    pub likes: u64,
}

impl Summary {
    pub fn of(topics: &[Topic]) -> Self {
        topics.iter().fold(
            Summary {
                topics: topics.len(),
                ..Default::default()
            },
            |acc, t| Summary {
                views: acc.views + t.views,
                posts: acc.posts + t.posts_count,
                likes: acc.likes + t.like_count,
                ..acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn topic(category: Option<&str>, last: DateTime<Utc>, likes: u64) -> Topic {
        Topic {
            title: "t".to_string(),
            last_posted_at: Some(last),
            created_at: last - chrono::Duration::hours(30),
            category: category.map(str::to_string),
            views: 10,
            posts_count: 2,
            like_count: likes,
        }
    }

    fn sample() -> Vec<Topic> {
        // 2021-01-04 is a Monday.
        let monday_9 = Utc.with_ymd_and_hms(2021, 1, 4, 9, 0, 0).unwrap();
        let wednesday_23 = Utc.with_ymd_and_hms(2021, 1, 6, 23, 15, 0).unwrap();
        vec![
            topic(Some("Bugs"), monday_9, 0),
            topic(Some("Bugs"), wednesday_23, 3),
            topic(None, monday_9, 7),
            topic(Some("Deployment"), wednesday_23, 21),
        ]
    }

    fn count<'a>(bins: &'a [(String, u64)], label: &str) -> u64 {
        bins.iter().find(|(l, _)| l == label).map(|(_, n)| *n).unwrap()
    }

    #[test]
    fn test_weekday_and_hour_bins() {
        let topics = sample();
        let all = filter_by_category(&topics, None);

        let days = by_weekday(&all, TimeField::LastPosted);
        assert_eq!(days.len(), 7);
        assert_eq!(count(&days, "Mon"), 2);
        assert_eq!(count(&days, "Wed"), 2);
        assert_eq!(count(&days, "Sun"), 0);

        let hours = by_hour(&all, TimeField::LastPosted);
        assert_eq!(hours.len(), 24);
        assert_eq!(count(&hours, "9"), 2);
        assert_eq!(count(&hours, "23"), 2);

        // Created 30 hours earlier: Sunday 03:00 and Tuesday 17:15.
        let created = by_weekday(&all, TimeField::Created);
        assert_eq!(count(&created, "Sun"), 2);
        assert_eq!(count(&created, "Tue"), 2);
    }

    #[test]
    fn test_date_bins_fill_gaps() {
        let topics = sample();
        let all = filter_by_category(&topics, None);

        let last = by_date(&all, TimeField::LastPosted);
        assert_eq!(
            last,
            vec![
                ("01-04".to_string(), 2),
                ("01-05".to_string(), 0),
                ("01-06".to_string(), 2),
            ]
        );

        // Created 30 hours earlier: 01-03 03:00 and 01-05 17:15.
        let created = by_date(&all, TimeField::Created);
        assert_eq!(created.first(), Some(&("01-03".to_string(), 2)));
        assert_eq!(created.last(), Some(&("01-05".to_string(), 2)));
        assert_eq!(created.len(), 3);

        let deployment = filter_by_category(&topics, Some("Deployment"));
        assert_eq!(by_date(&deployment, TimeField::LastPosted), vec![("01-06".to_string(), 1)]);
        assert!(by_date(&[], TimeField::Created).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let topics = sample();
        assert_eq!(filter_by_category(&topics, Some("Bugs")).len(), 2);
        assert_eq!(filter_by_category(&topics, Some("Nope")).len(), 0);
        assert_eq!(filter_by_category(&topics, None).len(), 4);
    }

    #[test]
    fn test_by_category_sorted() {
        let counts = by_category(&sample());
        assert_eq!(
            counts,
            vec![
                ("Bugs".to_string(), 2),
                ("(none)".to_string(), 1),
                ("Deployment".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_histogram() {
        assert!(histogram(&[], 20).is_empty());

        let bins = histogram(&[0, 3, 7, 21], 5);
        // width = ceil(22 / 5) = 5
        assert_eq!(
            bins,
            vec![
                ("0".to_string(), 2),
                ("5".to_string(), 1),
                ("10".to_string(), 0),
                ("15".to_string(), 0),
                ("20".to_string(), 1),
            ]
        );

        let single = histogram(&[0, 0], 20);
        assert_eq!(single, vec![("0".to_string(), 2)]);
    }

    #[test]
    fn test_summary() {
        let summary = Summary::of(&sample());
        assert_eq!(summary.topics, 4);
        assert_eq!(summary.views, 40);
        assert_eq!(summary.posts, 8);
        assert_eq!(summary.likes, 31);
    }
}
