pub mod datefmt;

pub use datefmt::format_timestamp;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::{Captures, Regex};

/// Default format for a bare `{{date}}` placeholder.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
/// Default format for a bare `{{time}}` placeholder (12-hour, zero-padded).
pub const DEFAULT_TIME_FORMAT: &str = "hh-mm-ss";

/// Matches `{{inner}}` where `inner` contains no closing brace. Replacement
/// is non-overlapping and left-to-right; substituted values are never
/// re-scanned.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

/// Named string values available to one engine invocation.
///
/// Absent keys are not an error: a placeholder that resolves to nothing is
/// echoed back verbatim, delimiters included.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }
}

/// Resolve every `{{token}}` and `{{token:format}}` placeholder in
/// `template` against `ctx` and the current local time.
///
/// The wall clock is read once per call, so multiple date/time placeholders
/// in one template cannot straddle a second boundary.
pub fn resolve(template: &str, ctx: &TemplateContext) -> String {
    resolve_at(template, ctx, Local::now())
}

/// Clock-injected variant of [`resolve`].
pub fn resolve_at(template: &str, ctx: &TemplateContext, now: DateTime<Local>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let inner = &caps[1];
            let (name, format) = match inner.split_once(':') {
                Some((name, format)) => (name, format),
                None => (inner, ""),
            };
            match name {
                "date" => {
                    let fmt = if format.is_empty() { DEFAULT_DATE_FORMAT } else { format };
                    format_timestamp(now, fmt)
                }
                "time" => {
                    let fmt = if format.is_empty() { DEFAULT_TIME_FORMAT } else { format };
                    format_timestamp(now, fmt)
                }
                _ => match ctx.get(name) {
                    Some(value) => value.to_string(),
                    // Unresolved placeholders pass through unchanged.
                    None => caps[0].to_string(),
                },
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_resolve_context_key() {
        let ctx = TemplateContext::new().with("title", "Buy milk");
        assert_eq!(resolve_at("{{title}}", &ctx, fixed_now()), "Buy milk");
    }

    #[test]
    fn test_resolve_date_with_format() {
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{date:YYYY}}", &ctx, fixed_now()), "2024");
    }

    #[test]
    fn test_resolve_date_default_format() {
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{date}}", &ctx, fixed_now()), "2024-03-05");
    }

    #[test]
    fn test_resolve_time_default_format() {
        // hh is 12-hour zero-padded: 14:07:09 → 02-07-09
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{time}}", &ctx, fixed_now()), "02-07-09");
    }

    #[test]
    fn test_unresolved_placeholder_passes_through() {
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{unknown}}", &ctx, fixed_now()), "{{unknown}}");
    }

    #[test]
    fn test_unresolved_is_idempotent() {
        let ctx = TemplateContext::new();
        let once = resolve_at("a {{unknown}} b", &ctx, fixed_now());
        let twice = resolve_at(&once, &ctx, fixed_now());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_same_key_resolved_at_each_occurrence() {
        let ctx = TemplateContext::new().with("id", "3");
        assert_eq!(resolve_at("{{id}}-{{id}}", &ctx, fixed_now()), "3-3");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let ctx = TemplateContext::new().with("title", "x");
        for t in ["", "plain text", "a } b { c", "{single} braces"] {
            assert_eq!(resolve_at(t, &ctx, fixed_now()), t);
        }
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let ctx = TemplateContext::new().with("title", "{{id}}").with("id", "7");
        assert_eq!(resolve_at("{{title}}", &ctx, fixed_now()), "{{id}}");
    }

    #[test]
    fn test_date_wins_over_context_key() {
        let ctx = TemplateContext::new().with("date", "not today");
        assert_eq!(resolve_at("{{date}}", &ctx, fixed_now()), "2024-03-05");
    }

    #[test]
    fn test_qualifier_on_context_key_ignored_for_lookup() {
        let ctx = TemplateContext::new().with("title", "Buy milk");
        assert_eq!(resolve_at("{{title:x}}", &ctx, fixed_now()), "Buy milk");
    }

    #[test]
    fn test_qualifier_on_unknown_key_echoed() {
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{frob:x}}", &ctx, fixed_now()), "{{frob:x}}");
    }

    #[test]
    fn test_mixed_template() {
        let ctx = TemplateContext::new().with("title", "Write spec").with("id", "1");
        assert_eq!(
            resolve_at(
                "task-{{date:YYYY-MM-DD}}--{{time:hh-mm-ss}} - {{title}}.md",
                &ctx,
                fixed_now()
            ),
            "task-2024-03-05--02-07-09 - Write spec.md"
        );
    }

    #[test]
    fn test_empty_format_falls_back_to_default() {
        let ctx = TemplateContext::new();
        assert_eq!(resolve_at("{{date:}}", &ctx, fixed_now()), "2024-03-05");
    }
}
