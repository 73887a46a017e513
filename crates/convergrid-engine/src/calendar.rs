//! Calendar arithmetic for rolling time windows.
//!
//! A window request is `(granularity, anchor, occurrences)` and produces
//! `occurrences` consecutive inclusive date ranges ending at the anchor,
//! oldest first. Month-based granularities snap to full calendar months when
//! the anchor is the last day of its month, which keeps ranges from drifting
//! across months of different lengths. Weeks are fixed 7-day windows counted
//! back from the anchor date; no ISO or locale week-boundary snapping.

use chrono::{Datelike, Days, Months, NaiveDate};
use convergrid_common::{Segment, TimeGranularity};

/// First day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // with_day(1) cannot fail for a valid date.
    date.with_day(1).unwrap_or(date)
}

/// Last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

pub fn is_last_of_month(date: NaiveDate) -> bool {
    match date.checked_add_days(Days::new(1)) {
        Some(next) => next.month() != date.month(),
        None => true,
    }
}

/// Produce `occurrences` consecutive, non-overlapping, contiguous inclusive
/// ranges ending at `anchor`, oldest first. `occurrences` is clamped to at
/// least 1. Pure: same inputs, same output.
pub fn rolling_windows(
    granularity: TimeGranularity,
    anchor: NaiveDate,
    occurrences: u32,
) -> Vec<Segment> {
    let count = occurrences.max(1);
    windows_checked(granularity, anchor, count).unwrap_or_default()
}

fn windows_checked(
    granularity: TimeGranularity,
    anchor: NaiveDate,
    count: u32,
) -> Option<Vec<Segment>> {
    let mut segments = Vec::with_capacity(count as usize);

    if let Some(months) = granularity.months_per_step() {
        if is_last_of_month(anchor) {
            // Snapped: each range is a whole number of calendar months.
            for j in (0..count).rev() {
                let end_month = anchor.checked_sub_months(Months::new(j * months))?;
                let start_month = anchor.checked_sub_months(Months::new(j * months + months - 1))?;
                let start = first_of_month(start_month);
                let end = last_of_month(end_month)?;
                segments.push(Segment::date_range(start, end));
            }
            return Some(segments);
        }
        // Unsnapped: fixed month-count subtraction between shared boundaries,
        // so adjacent ranges stay contiguous.
        for j in (0..count).rev() {
            let end = anchor.checked_sub_months(Months::new(j * months))?;
            let start = anchor
                .checked_sub_months(Months::new((j + 1) * months))?
                .checked_add_days(Days::new(1))?;
            segments.push(Segment::date_range(start, end));
        }
        return Some(segments);
    }

    let step = granularity
        .days_per_step()
        .unwrap_or(1);
    for j in (0..count).rev() {
        let end = anchor.checked_sub_days(Days::new(j as u64 * step))?;
        let start = end.checked_sub_days(Days::new(step - 1))?;
        segments.push(Segment::date_range(start, end));
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds(seg: &Segment) -> (NaiveDate, NaiveDate) {
        (seg.range_start.unwrap(), seg.range_end.unwrap())
    }

    #[test]
    fn month_end_anchor_snaps_to_calendar_months() {
        let segs = rolling_windows(TimeGranularity::Month, ymd(2024, 1, 31), 3);
        assert_eq!(segs.len(), 3);
        assert_eq!(bounds(&segs[0]), (ymd(2023, 11, 1), ymd(2023, 11, 30)));
        assert_eq!(bounds(&segs[1]), (ymd(2023, 12, 1), ymd(2023, 12, 31)));
        assert_eq!(bounds(&segs[2]), (ymd(2024, 1, 1), ymd(2024, 1, 31)));
        assert_eq!(segs[0].label, "2023-11-01..2023-11-30");
    }

    #[test]
    fn snapping_covers_february() {
        let segs = rolling_windows(TimeGranularity::Month, ymd(2024, 3, 31), 2);
        assert_eq!(bounds(&segs[0]), (ymd(2024, 2, 1), ymd(2024, 2, 29)));
        assert_eq!(bounds(&segs[1]), (ymd(2024, 3, 1), ymd(2024, 3, 31)));
    }

    #[test]
    fn mid_month_anchor_uses_fixed_subtraction() {
        let segs = rolling_windows(TimeGranularity::Month, ymd(2024, 1, 15), 2);
        assert_eq!(bounds(&segs[0]), (ymd(2023, 11, 16), ymd(2023, 12, 15)));
        assert_eq!(bounds(&segs[1]), (ymd(2023, 12, 16), ymd(2024, 1, 15)));
    }

    #[test]
    fn quarter_snaps_on_month_end_anchor() {
        let segs = rolling_windows(TimeGranularity::Quarter, ymd(2024, 6, 30), 2);
        assert_eq!(bounds(&segs[0]), (ymd(2024, 1, 1), ymd(2024, 3, 31)));
        assert_eq!(bounds(&segs[1]), (ymd(2024, 4, 1), ymd(2024, 6, 30)));
    }

    #[test]
    fn weeks_are_fixed_seven_day_windows() {
        let segs = rolling_windows(TimeGranularity::Week, ymd(2024, 1, 21), 2);
        assert_eq!(bounds(&segs[0]), (ymd(2024, 1, 8), ymd(2024, 1, 14)));
        assert_eq!(bounds(&segs[1]), (ymd(2024, 1, 15), ymd(2024, 1, 21)));
    }

    #[test]
    fn days_are_single_dates() {
        let segs = rolling_windows(TimeGranularity::Day, ymd(2024, 3, 1), 3);
        assert_eq!(bounds(&segs[0]), (ymd(2024, 2, 28), ymd(2024, 2, 28)));
        assert_eq!(bounds(&segs[1]), (ymd(2024, 2, 29), ymd(2024, 2, 29)));
        assert_eq!(bounds(&segs[2]), (ymd(2024, 3, 1), ymd(2024, 3, 1)));
        assert_eq!(segs[2].label, "2024-03-01");
    }

    #[test]
    fn occurrence_count_clamps_to_one() {
        let segs = rolling_windows(TimeGranularity::Year, ymd(2024, 5, 5), 0);
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn ranges_are_contiguous_and_non_overlapping() {
        for granularity in [
            TimeGranularity::Day,
            TimeGranularity::Week,
            TimeGranularity::Month,
            TimeGranularity::Quarter,
            TimeGranularity::HalfYear,
            TimeGranularity::Year,
        ] {
            for anchor in [ymd(2024, 1, 31), ymd(2024, 2, 14), ymd(2023, 12, 1)] {
                let segs = rolling_windows(granularity, anchor, 4);
                assert_eq!(segs.last().unwrap().range_end, Some(anchor));
                for pair in segs.windows(2) {
                    let prev_end = pair[0].range_end.unwrap();
                    let next_start = pair[1].range_start.unwrap();
                    assert_eq!(
                        next_start,
                        prev_end.checked_add_days(Days::new(1)).unwrap(),
                        "{granularity:?} anchored {anchor} not contiguous"
                    );
                }
            }
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let a = rolling_windows(TimeGranularity::Month, ymd(2024, 1, 31), 3);
        let b = rolling_windows(TimeGranularity::Month, ymd(2024, 1, 31), 3);
        assert_eq!(a, b);
    }
}
