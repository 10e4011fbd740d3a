//! Date helpers for exported records

use chrono::{DateTime, NaiveDateTime, Utc};

/// Capture date of an archived page, read from its `/web/<timestamp>/` segment
///
/// # Example
///
/// ```
/// use listing_harvest::layouts::archive_date;
///
/// let url = "https://web.archive.org/web/20190615123000/https://www.vivareal.com.br/aluguel/";
/// assert_eq!(archive_date(url).as_deref(), Some("2019-06-15"));
/// ```
pub fn archive_date(url: &str) -> Option<String> {
    let rest = url.split("/web/").nth(1)?;
    let stamp: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if stamp.len() < 14 {
        return None;
    }

    NaiveDateTime::parse_from_str(&stamp[..14], "%Y%m%d%H%M%S")
        .ok()
        .map(|captured| captured.format("%Y-%m-%d").to_string())
}

/// Creation stamp written on every record, `YYYY-MM-DD-hh:mm:ss` in UTC
pub fn created_at_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_archive_date_with_modifier() {
        // Wayback adds suffixes such as `id_` after the timestamp
        let url = "https://web.archive.org/web/20181231235959id_/https://www.vivareal.com.br/";
        assert_eq!(archive_date(url).as_deref(), Some("2018-12-31"));
    }

    #[test]
    fn test_archive_date_ignores_pagination_digits() {
        let url = "https://web.archive.org/web/20190101000000/https://www.vivareal.com.br/aluguel/?pagina=7";
        assert_eq!(archive_date(url).as_deref(), Some("2019-01-01"));
    }

    #[test]
    fn test_archive_date_missing_or_invalid() {
        assert_eq!(archive_date("https://www.vivareal.com.br/aluguel/"), None);
        assert_eq!(archive_date("https://web.archive.org/web/2019/https://x.y/"), None);
        assert_eq!(
            archive_date("https://web.archive.org/web/20191332000000/https://x.y/"),
            None
        );
    }

    #[test]
    fn test_created_at_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(created_at_stamp(at), "2024-03-09-07:05:01");
    }
}
