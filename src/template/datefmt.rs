//! Dayjs-style date/time formatting over chrono.
//!
//! Settings templates carry format strings like `YYYY-MM-DD` or `hh-mm-ss`,
//! so the engine speaks that token language rather than strftime. Only the
//! display tokens the templates can reasonably use are supported; anything
//! unrecognized passes through as literal text, and `[...]` escapes a run of
//! literals.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Ordered longest-first so e.g. `YYYY` is consumed before `YY`.
const TOKENS: &[&str] = &[
    "YYYY", "SSS", "YY", "MM", "DD", "HH", "hh", "mm", "ss", "M", "D", "H", "h", "m", "s", "A",
    "a",
];

/// Format `now` according to a dayjs-style `pattern`.
pub fn format_timestamp(now: DateTime<Local>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        // Bracketed literal: copied verbatim, brackets dropped.
        if let Some(stripped) = rest.strip_prefix('[') {
            match stripped.find(']') {
                Some(end) => {
                    out.push_str(&stripped[..end]);
                    rest = &stripped[end + 1..];
                }
                None => {
                    // Unterminated bracket: treat remainder as literal.
                    out.push_str(stripped);
                    rest = "";
                }
            }
            continue;
        }

        for token in TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(&expand(now, token));
                rest = stripped;
                continue 'outer;
            }
        }

        let ch = rest.chars().next().unwrap();
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

fn expand(now: DateTime<Local>, token: &str) -> String {
    let hour12 = now.hour12().1;
    match token {
        "YYYY" => format!("{:04}", now.year()),
        "YY" => format!("{:02}", now.year() % 100),
        "MM" => format!("{:02}", now.month()),
        "M" => now.month().to_string(),
        "DD" => format!("{:02}", now.day()),
        "D" => now.day().to_string(),
        "HH" => format!("{:02}", now.hour()),
        "H" => now.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", now.minute()),
        "m" => now.minute().to_string(),
        "ss" => format!("{:02}", now.second()),
        "s" => now.second().to_string(),
        "SSS" => format!("{:03}", now.nanosecond() / 1_000_000),
        "A" => if now.hour() < 12 { "AM" } else { "PM" }.to_string(),
        "a" => if now.hour() < 12 { "am" } else { "pm" }.to_string(),
        _ => unreachable!("unknown token {token}"),
    }
}
