use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Half-open UTC window derived from a calendar-day range; `None` bounds
/// mean unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end_exclusive: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub const UNBOUNDED: DateWindow = DateWindow {
        start: None,
        end_exclusive: None,
    };

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start)
            && self.end_exclusive.map_or(true, |end| at < end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardRange {
    Today,
    Last7,
    Last30,
    Full,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DashboardRange {
    /// Query-string resolution; anything unrecognized falls back to the
    /// 7-day default.
    pub fn resolve(range: Option<&str>, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        match range {
            Some("today") => DashboardRange::Today,
            Some("7") => DashboardRange::Last7,
            Some("30") => DashboardRange::Last30,
            Some("full") => DashboardRange::Full,
            _ => match (
                start_date.and_then(parse_day),
                end_date.and_then(parse_day),
            ) {
                (Some(start), Some(end)) => DashboardRange::Custom { start, end },
                _ => DashboardRange::Last7,
            },
        }
    }

    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match self {
            DashboardRange::Today => bounded(today, today),
            DashboardRange::Last7 => bounded(today - Duration::days(6), today),
            DashboardRange::Last30 => bounded(today - Duration::days(29), today),
            DashboardRange::Full => DateWindow::UNBOUNDED,
            DashboardRange::Custom { start, end } => bounded(*start, *end),
        }
    }

    /// One bucket per calendar day covering the window, first and last day
    /// inclusive. `full_extent` supplies the observed first/last order days
    /// for the unbounded range; with no orders at all a single bucket for
    /// today is produced.
    pub fn day_buckets(
        &self,
        today: NaiveDate,
        full_extent: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<DayBucket> {
        match self {
            DashboardRange::Today => vec![DayBucket {
                date: today,
                label: "Today".to_string(),
            }],
            DashboardRange::Last7 => days_between(today - Duration::days(6), today),
            DashboardRange::Last30 => days_between(today - Duration::days(29), today),
            DashboardRange::Custom { start, end } => days_between(*start, *end),
            DashboardRange::Full => match full_extent {
                Some((first, last)) => days_between(first, last),
                None => days_between(today, today),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub label: String,
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn bounded(start: NaiveDate, end: NaiveDate) -> DateWindow {
    DateWindow {
        start: Some(local_midnight_utc(start)),
        end_exclusive: Some(local_midnight_utc(end + Duration::days(1))),
    }
}

fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<DayBucket> {
    let mut buckets = Vec::new();
    let mut current = start;
    while current <= end {
        buckets.push(DayBucket {
            date: current,
            label: current.format("%Y-%m-%d").to_string(),
        });
        current += Duration::days(1);
    }
    buckets
}

/// Midnight of the given server-local day, as UTC.
pub fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// Server-local calendar day of a stored timestamp.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: i64,
    pub new_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: String,
    pub total_magnets: i64,
    pub cod_orders_count: i64,
    pub online_orders_count: i64,
    pub cod_revenue: String,
    pub online_revenue: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayWiseEntry {
    pub date: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_seven_days() {
        assert_eq!(DashboardRange::resolve(None, None, None), DashboardRange::Last7);
        assert_eq!(
            DashboardRange::resolve(Some("bogus"), None, None),
            DashboardRange::Last7
        );
    }

    #[test]
    fn test_resolve_custom_range() {
        let range = DashboardRange::resolve(None, Some("2025-03-01"), Some("2025-03-05"));
        assert_eq!(
            range,
            DashboardRange::Custom {
                start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            }
        );
    }

    #[test]
    fn test_today_yields_single_bucket() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let buckets = DashboardRange::Today.day_buckets(today, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Today");
        assert_eq!(buckets[0].date, today);
    }

    #[test]
    fn test_seven_day_buckets_cover_window_inclusive() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let buckets = DashboardRange::Last7.day_buckets(today, None);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].label, "2025-06-04");
        assert_eq!(buckets[6].label, "2025-06-10");
    }

    #[test]
    fn test_custom_buckets_include_both_endpoints() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let buckets = DashboardRange::Custom { start, end }.day_buckets(start, None);
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["2025-02-27", "2025-02-28", "2025-03-01", "2025-03-02"]
        );
    }

    #[test]
    fn test_full_range_without_orders_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let buckets = DashboardRange::Full.day_buckets(today, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, today);
    }

    #[test]
    fn test_window_contains_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let window = DashboardRange::Today.window(today);
        assert!(window.contains(local_midnight_utc(today)));
        assert!(!window.contains(
            local_midnight_utc(today + Duration::days(1))
        ));
        assert!(DateWindow::UNBOUNDED.contains(Utc::now()));
    }
}
