use std::collections::BTreeMap;

use crate::data::datetime::parse_event_date;
use crate::state::period_series::{Period, PeriodSeries};

/// Count event dates per period bucket.
///
/// Returns bucket labels and counts in chronological order. Bucket keys sort
/// lexicographically in date order for all three granularities, so a
/// `BTreeMap` keyed on the label is enough. Dates that fail to parse are
/// skipped.
pub fn bucket_event_dates<I, S>(dates: I, period: Period) -> (Vec<String>, PeriodSeries)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0usize;

    for raw in dates {
        let raw = raw.as_ref();
        match parse_event_date(raw) {
            Some(date) => *buckets.entry(period.bucket_key(date)).or_insert(0) += 1,
            None => {
                skipped += 1;
                tracing::warn!("Skipping event with unparseable date {:?}", raw);
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Bucketed {} periods, skipped {skipped} dates", buckets.len());
    }

    let labels: Vec<String> = buckets.keys().cloned().collect();
    let series = PeriodSeries::from_counts(buckets.into_values());
    (labels, series)
}
