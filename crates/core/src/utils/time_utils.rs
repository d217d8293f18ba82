use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Default timezone for business dates.
/// Bank feeds and ERP postings are dated in local Turkish time.
pub const DEFAULT_BUSINESS_TZ: Tz = chrono_tz::Europe::Istanbul;

/// Converts a UTC instant to a wall-clock time in the given timezone.
pub fn business_now_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Current wall-clock time in the given business timezone.
pub fn business_now(tz: Tz) -> NaiveDateTime {
    business_now_from_utc(Utc::now(), tz)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the calendar month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// 00:00:00 on `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59 on `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}
