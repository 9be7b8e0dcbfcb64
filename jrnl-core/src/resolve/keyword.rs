use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use super::TimeResolver;
use crate::errors::ResolveError;
use crate::keywords::{Keyword, Keywords};

/// Accepted formatted dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// Resolves a small vocabulary of time expressions without leaving the process.
///
/// Understands, case-insensitively:
/// - `now`
/// - `today`, `yesterday`, `tomorrow`, weekday names and user synonyms
/// - formatted dates (`2025-08-15`, `20250815`, `2025/08/15`)
/// - ISO date-times (`2025-08-15T13:30`)
/// - times (`6am`, `5:30 pm`, `14:30`, `17`, `noon`, `midnight`, ...), alone
///   or after `<date> at`
///
/// Relative words are anchored on `reference`. A date without a time keeps
/// the reference time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordResolver {
    reference: NaiveDateTime,
}

impl KeywordResolver {
    pub fn new(reference: NaiveDateTime) -> Self {
        Self { reference }
    }
}

impl TimeResolver for KeywordResolver {
    fn resolve(&self, expression: &str) -> Result<NaiveDateTime, ResolveError> {
        let resolved = parse_expression(expression.trim(), self.reference);
        debug!(expression, ?resolved, "local time resolution");
        resolved.ok_or_else(|| ResolveError::Unrecognized {
            expression: expression.to_string(),
        })
    }
}

fn parse_expression(s: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if Keywords::matches(Keyword::Now, s) {
        return Some(reference);
    }

    // `<date> at <time>`, or `at <time>` for today.
    if let Some(pos) = Keywords::find_position(Keyword::At, s) {
        let date_part = s[..pos].trim();
        let time_part = s[pos + Keyword::At.as_ref().len()..].trim();
        let date = if date_part.is_empty() {
            reference.date()
        } else {
            parse_date_token(date_part, reference.date())?
        };
        return parse_time_token(time_part).map(|time| date.and_time(time));
    }

    if let Some(date) = parse_date_token(s, reference.date()) {
        return Some(date.and_time(reference.time()));
    }
    parse_time_token(s).map(|time| reference.date().and_time(time))
}

/// Parses a date word or formatted date relative to `reference_date`.
///
/// Weekday names resolve to the most recent such day, today included.
pub fn parse_date_token(s: &str, reference_date: NaiveDate) -> Option<NaiveDate> {
    if Keywords::matches(Keyword::Today, s) {
        return Some(reference_date);
    }
    if Keywords::matches(Keyword::Yesterday, s) {
        return Some(reference_date - Duration::days(1));
    }
    if Keywords::matches(Keyword::Tomorrow, s) {
        return Some(reference_date + Duration::days(1));
    }

    let day_keyword = [
        (Keyword::Monday, Weekday::Mon),
        (Keyword::Tuesday, Weekday::Tue),
        (Keyword::Wednesday, Weekday::Wed),
        (Keyword::Thursday, Weekday::Thu),
        (Keyword::Friday, Weekday::Fri),
        (Keyword::Saturday, Weekday::Sat),
        (Keyword::Sunday, Weekday::Sun),
    ]
    .iter()
    .find(|(keyword, _)| Keywords::matches(*keyword, s));

    if let Some((_, weekday)) = day_keyword {
        let today_wd = reference_date.weekday();
        let days_ago = (today_wd.num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
        return Some(reference_date - Duration::days(days_ago as i64));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok())
}

/// Parses a time of day.
///
/// In order: `morning` (08:00), `noon`, `evening` (18:00), `night` (21:00),
/// `midnight`; 12-hour times ending in `am`/`pm` with optional minutes and
/// seconds; `HH:MM`; a bare hour from 0 to 23.
pub fn parse_time_token(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let named = [
        (Keyword::Morning, 8),
        (Keyword::Noon, 12),
        (Keyword::Evening, 18),
        (Keyword::Night, 21),
        (Keyword::Midnight, 0),
    ];
    if let Some((_, hour)) = named.iter().find(|(keyword, _)| Keywords::matches(*keyword, s)) {
        return NaiveTime::from_hms_opt(*hour, 0, 0);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(core) = lower.strip_suffix("am").or_else(|| lower.strip_suffix("pm")) {
        let is_pm = lower.ends_with("pm");
        let mut parts = core.trim().split(':').map(str::parse::<u32>);
        let h = parts.next()?.ok()?;
        let m = parts.next().transpose().ok()?.unwrap_or(0);
        let sec = parts.next().transpose().ok()?.unwrap_or(0);
        if parts.next().is_some() || h == 0 || h > 12 || m > 59 || sec > 59 {
            return None;
        }
        let h24 = match (h, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (_, true) => h + 12,
            (_, false) => h,
        };
        return NaiveTime::from_hms_opt(h24, m, sec);
    }

    if let Ok(nt) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(nt);
    }
    match s.parse::<u32>() {
        Ok(h) if h <= 23 => NaiveTime::from_hms_opt(h, 0, 0),
        _ => None,
    }
}
