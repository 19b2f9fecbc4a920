//! Helpers for working with the server's configured timezone.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

/// Get today's date in the given canonical timezone, e.g. "America/Sao_Paulo".
///
/// Returns `None` if the timezone name is not recognized.
pub fn local_date_today(canonical_timezone: &str) -> Option<Date> {
    let timezone = time_tz::timezones::get_by_name(canonical_timezone)?;
    let offset = timezone.get_offset_utc(&OffsetDateTime::now_utc()).to_utc();

    Some(OffsetDateTime::now_utc().to_offset(offset).date())
}
