//! Timestamped recording file names.
//!
//! The stored filename format uses date-pattern letters (`yyyyMMdd_hhmmss`). Patterns are
//! translated into a `chrono` format string before formatting. Supported letters:
//!
//! | letter | meaning | translation |
//! |---|---|---|
//! | `y` | year | `yy` → `%y`, otherwise `%Y` |
//! | `M` | month | `M` → `%-m`, `MM` → `%m`, `MMM` → `%b`, longer → `%B` |
//! | `d` | day of month | `%-d` / `%d` |
//! | `H` | hour 0-23 | `%-H` / `%H` |
//! | `h` | hour 1-12 | `%-I` / `%I` |
//! | `m` | minute | `%-M` / `%M` |
//! | `s` | second | `%-S` / `%S` |
//! | `S` | millisecond | `%3f` |
//! | `a` | AM/PM | `%p` |
//! | `E` | weekday | up to three → `%a`, longer → `%A` |
//! | `Z` | UTC offset | `%z` |
//!
//! Text in single quotes is copied literally and `''` produces one quote. Any other ASCII
//! letter makes the whole pattern invalid, in which case the default pattern is used.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use tracing::warn;

use super::accessors::{SettingsAccess, DEFAULT_FILENAME_FORMAT, FILENAME_FORMAT, FILENAME_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternError {
    UnsupportedLetter(char),
    UnterminatedQuote,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::UnsupportedLetter(c) => write!(f, "unsupported pattern letter '{}'", c),
            PatternError::UnterminatedQuote => write!(f, "unterminated quote"),
        }
    }
}

fn numeric(count: usize, directive: char) -> String {
    if count == 1 {
        format!("%-{}", directive)
    } else {
        format!("%{}", directive)
    }
}

fn translate_letter(letter: char, count: usize) -> Result<String, PatternError> {
    let translated = match letter {
        'y' if count == 2 => "%y".to_string(),
        'y' => "%Y".to_string(),
        'M' => match count {
            1 => "%-m".to_string(),
            2 => "%m".to_string(),
            3 => "%b".to_string(),
            _ => "%B".to_string(),
        },
        'd' => numeric(count, 'd'),
        'H' => numeric(count, 'H'),
        'h' => numeric(count, 'I'),
        'm' => numeric(count, 'M'),
        's' => numeric(count, 'S'),
        'S' => "%3f".to_string(),
        'a' => "%p".to_string(),
        'E' if count <= 3 => "%a".to_string(),
        'E' => "%A".to_string(),
        'Z' => "%z".to_string(),
        other => return Err(PatternError::UnsupportedLetter(other)),
    };
    Ok(translated)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Translates a date pattern into a `chrono` format string.
fn to_chrono_format(pattern: &str) -> Result<String, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            loop {
                match (chars.get(i), chars.get(i + 1)) {
                    (None, _) => return Err(PatternError::UnterminatedQuote),
                    (Some('\''), Some('\'')) => {
                        out.push('\'');
                        i += 2;
                    }
                    (Some('\''), _) => {
                        i += 1;
                        break;
                    }
                    (Some(literal), _) => {
                        push_literal(&mut out, *literal);
                        i += 1;
                    }
                }
            }
        } else if c.is_ascii_alphabetic() {
            let run = chars[i..].iter().take_while(|ch| **ch == c).count();
            out.push_str(&translate_letter(c, run)?);
            i += run;
        } else {
            push_literal(&mut out, c);
            i += 1;
        }
    }
    Ok(out)
}

/// Formats `timestamp` with a date pattern, falling back to the default pattern when
/// `pattern` is invalid.
pub fn format_timestamp<Tz>(pattern: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let chrono_format = match to_chrono_format(pattern) {
        Ok(format) if !StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) => format,
        Ok(format) => {
            warn!("Filename pattern '{}' produced an invalid format '{}', using default", pattern, format);
            default_chrono_format()
        }
        Err(e) => {
            warn!("Filename pattern '{}' is invalid ({}), using default", pattern, e);
            default_chrono_format()
        }
    };
    timestamp.format(&chrono_format).to_string()
}

fn default_chrono_format() -> String {
    // The default pattern only uses supported letters.
    to_chrono_format(DEFAULT_FILENAME_FORMAT).unwrap_or_else(|_| "%Y%m%d_%I%M%S".to_string())
}

/// Blank prefixes vanish; others end in exactly the underscore the user typed or one we add.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.trim().is_empty() {
        String::new()
    } else if prefix.ends_with('_') {
        prefix.to_string()
    } else {
        format!("{}_", prefix)
    }
}

/// File name (without extension) for a recording started at `timestamp`.
pub fn filename_at<Tz>(access: &SettingsAccess, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let prefix = normalize_prefix(&FILENAME_PREFIX.read(access));
    let stamp = format_timestamp(&FILENAME_FORMAT.read(access), timestamp);
    format!("{}{}", prefix, stamp)
}

/// File name (without extension) for a recording started now, in local time.
pub fn filename(access: &SettingsAccess) -> String {
    filename_at(access, &Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording_settings::persistence_iface::PrefValue;
    use crate::recording_settings::test_support::access_with;
    use chrono::{FixedOffset, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn afternoon() -> DateTime<Utc> {
        // Tuesday
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[rstest]
    #[case("yyyyMMdd_hhmmss", "20240305_020709")]
    #[case("yyyyMMdd_HHmmss", "20240305_140709")]
    #[case("yy-M-d", "24-3-5")]
    #[case("dd MMM yyyy", "05 Mar 2024")]
    #[case("MMMM", "March")]
    #[case("EEE EEEE", "Tue Tuesday")]
    #[case("h a", "2 PM")]
    #[case("HH'h'mm", "14h07")]
    #[case("'Rec''s' HH", "Rec's 14")]
    #[case("''HH''", "'14'")]
    #[case("yyyy%MM", "2024%03")]
    #[case("yyyy_Z", "2024_+0000")]
    fn pattern_translation(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(format_timestamp(pattern, &afternoon()), expected);
    }

    #[test]
    fn milliseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap() + chrono::Duration::milliseconds(42);
        assert_eq!(format_timestamp("ss.SSS", &ts), "09.042");
    }

    #[rstest]
    #[case("yyyyMMdd_QQ")]
    #[case("yyyy'unterminated")]
    #[case("week w")]
    fn invalid_patterns_fall_back_to_default(#[case] pattern: &str) {
        assert_eq!(format_timestamp(pattern, &afternoon()), "20240305_020709");
    }

    #[test]
    fn offset_is_formatted_from_timestamp_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = tz.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(format_timestamp("HH Z", &ts), "14 +0200");
    }

    #[rstest]
    #[case("", "")]
    #[case("   ", "")]
    #[case("REC", "REC_")]
    #[case("REC_", "REC_")]
    #[case("my clip", "my clip_")]
    fn prefix_normalization(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(normalize_prefix(prefix), expected);
    }

    #[rstest]
    #[case("", "20240305")]
    #[case("REC", "REC_20240305")]
    #[case("REC_", "REC_20240305")]
    fn filename_combines_prefix_and_date(#[case] prefix: &str, #[case] expected: &str) {
        let access = access_with(vec![
            ("filename", PrefValue::from("yyyyMMdd")),
            ("fileprefix", PrefValue::from(prefix)),
        ]);
        assert_eq!(filename_at(&access, &afternoon()), expected);
    }

    #[test]
    fn defaults_produce_rec_prefix() {
        let access = access_with(vec![]);
        assert_eq!(filename_at(&access, &afternoon()), "REC_20240305_020709");
    }

    #[test]
    fn filename_now_uses_prefix() {
        let access = access_with(vec![("fileprefix", PrefValue::from("clip"))]);
        let name = filename(&access);
        assert!(name.starts_with("clip_"), "{}", name);
        assert_eq!(name.len(), "clip_".len() + "yyyyMMdd_hhmmss".len());
    }
}
