//! `If-Modified-Since` / `Last-Modified` comparison.

use chrono::{DateTime, NaiveDateTime, Utc};
use http::HeaderValue;
use serde::{Deserialize, Serialize};

// Obsolete HTTP date formats still accepted from recipients (RFC 7231 §7.1.1.1).
const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// How the request's `If-Modified-Since` is compared with the response's
/// `Last-Modified`.
///
/// # Examples
///
/// ```
/// use conditional_get::DateComparison;
/// use http::HeaderValue;
///
/// let since = HeaderValue::from_static("Mon, 07 Nov 1994 08:48:37 +0000");
/// let modified = HeaderValue::from_static("Mon, 07 Nov 1994 08:48:37 GMT");
///
/// // Byte-wise the two strings differ, as instants they are equal.
/// assert!(!DateComparison::Lexical.not_modified_since(&since, &modified));
/// assert!(DateComparison::HttpDate.not_modified_since(&since, &modified));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateComparison {
    /// Plain byte-string comparison.
    ///
    /// Only reliable when the downstream handler and the client both use the
    /// same canonical fixed-width format (IMF-fixdate).
    #[default]
    Lexical,
    /// Parse both values as HTTP dates and compare instants.
    ///
    /// A value that fails to parse on either side never counts as fresh.
    HttpDate,
}

impl DateComparison {
    /// Returns `true` when `if_modified_since >= last_modified`.
    pub fn not_modified_since(
        &self,
        if_modified_since: &HeaderValue,
        last_modified: &HeaderValue,
    ) -> bool {
        match self {
            DateComparison::Lexical => if_modified_since.as_bytes() >= last_modified.as_bytes(),
            DateComparison::HttpDate => {
                match (parse_http_date(if_modified_since), parse_http_date(last_modified)) {
                    (Some(since), Some(modified)) => since >= modified,
                    _ => false,
                }
            }
        }
    }
}

/// Parses IMF-fixdate (and any RFC 2822 date), RFC 850 and asctime formats.
///
/// A weekday that does not match the calendar date is rejected.
pub fn parse_http_date(value: &HeaderValue) -> Option<DateTime<Utc>> {
    let value = value.to_str().ok()?.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    [RFC850_FORMAT, ASCTIME_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header(value: &'static str) -> HeaderValue {
        HeaderValue::from_static(value)
    }

    #[test]
    fn lexical_equal_is_not_modified() {
        let date = header("Mon, 07 Nov 1994 08:48:37 GMT");
        assert!(DateComparison::Lexical.not_modified_since(&date, &date));
    }

    #[test]
    fn lexical_compares_bytes_not_instants() {
        // "Fri" sorts before "Mon" even though the Friday is four days later.
        let since = header("Fri, 11 Nov 1994 08:48:37 GMT");
        let modified = header("Mon, 07 Nov 1994 08:48:37 GMT");
        assert!(!DateComparison::Lexical.not_modified_since(&since, &modified));
        assert!(DateComparison::HttpDate.not_modified_since(&since, &modified));
    }

    #[test]
    fn http_date_older_client_copy_is_modified() {
        let since = header("Mon, 07 Nov 1994 08:48:36 GMT");
        let modified = header("Mon, 07 Nov 1994 08:48:37 GMT");
        assert!(!DateComparison::HttpDate.not_modified_since(&since, &modified));
    }

    #[test]
    fn http_date_unparseable_is_modified() {
        let since = header("yesterday");
        let modified = header("Mon, 07 Nov 1994 08:48:37 GMT");
        assert!(!DateComparison::HttpDate.not_modified_since(&since, &modified));
        assert!(!DateComparison::HttpDate.not_modified_since(&modified, &since));
    }

    #[test]
    fn parses_imf_fixdate() {
        let expected = Utc.with_ymd_and_hms(1994, 11, 7, 8, 48, 37).unwrap();
        assert_eq!(
            parse_http_date(&header("Mon, 07 Nov 1994 08:48:37 GMT")),
            Some(expected)
        );
    }

    #[test]
    fn parses_rfc850() {
        let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(
            parse_http_date(&header("Sunday, 06-Nov-94 08:49:37 GMT")),
            Some(expected)
        );
    }

    #[test]
    fn parses_asctime() {
        let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(
            parse_http_date(&header("Sun Nov  6 08:49:37 1994")),
            Some(expected)
        );
    }

    #[test]
    fn rejects_weekday_not_matching_date() {
        assert_eq!(parse_http_date(&header("Sun, 07 Nov 1994 08:48:37 GMT")), None);

        let since = header("Sun, 07 Nov 1994 08:48:37 GMT");
        let modified = header("Mon, 07 Nov 1994 08:48:37 GMT");
        assert!(!DateComparison::HttpDate.not_modified_since(&since, &modified));
    }
}
