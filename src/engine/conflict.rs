use chrono::NaiveDate;

use crate::limits::*;
use crate::model::*;

use super::EngineError;

pub(crate) fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, EngineError> {
    DateRange::new(start, end).ok_or(EngineError::InvalidRange {
        start,
        end,
        reason: "start date is after end date",
    })
}

/// Per-day scans walk every date in the range; cap how many.
pub(crate) fn check_window(range: &DateRange) -> Result<(), EngineError> {
    if range.len_days() > MAX_QUERY_WINDOW_DAYS {
        return Err(EngineError::LimitExceeded("query window too wide"));
    }
    Ok(())
}

/// Like `validate_range`, but a bookable stay must also start strictly after `today`.
pub(crate) fn validate_bookable(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<DateRange, EngineError> {
    if start <= today {
        return Err(EngineError::InvalidRange {
            start,
            end,
            reason: "start date must be after today",
        });
    }
    validate_range(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, day).unwrap()
    }

    #[test]
    fn inverted_range_rejected() {
        let err = validate_range(d(5), d(4)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));
    }

    #[test]
    fn single_day_range_accepted() {
        assert_eq!(validate_range(d(5), d(5)).unwrap().len_days(), 1);
    }

    #[test]
    fn too_wide_range_rejected() {
        let start = d(1);
        let end = start + chrono::Days::new(MAX_QUERY_WINDOW_DAYS as u64);
        let range = validate_range(start, end).unwrap();
        assert_eq!(
            check_window(&range),
            Err(EngineError::LimitExceeded("query window too wide"))
        );
        let widest = start + chrono::Days::new(MAX_QUERY_WINDOW_DAYS as u64 - 1);
        assert!(check_window(&validate_range(start, widest).unwrap()).is_ok());
    }

    #[test]
    fn long_stay_is_bookable() {
        let end = d(2) + chrono::Days::new(MAX_QUERY_WINDOW_DAYS as u64 * 2);
        assert!(validate_bookable(d(2), end, d(1)).is_ok());
    }

    #[test]
    fn today_is_not_bookable() {
        let today = d(10);
        assert!(validate_bookable(d(10), d(12), today).is_err());
        assert!(validate_bookable(d(9), d(12), today).is_err());
        assert!(validate_bookable(d(11), d(11), today).is_ok());
    }

    #[test]
    fn bookable_still_checks_order() {
        let err = validate_bookable(d(12), d(11), d(1)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRange {
                start: d(12),
                end: d(11),
                reason: "start date is after end date",
            }
        );
    }
}
