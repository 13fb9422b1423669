//! Attribute grammars.
//!
//! An [`AttrType`] is a named value grammar with a `parse`/`render` pair:
//!
//! - `parse(text, strict)` turns wire text into an [`AttrValue`]. Under strict
//!   parsing a grammar violation is a [`MetadataError::Parse`]. Under loose
//!   parsing the grammar never fails: it coerces what it can and otherwise keeps
//!   the raw text as [`AttrValue::Text`].
//! - `render(value)` is the canonical inverse. Rendering a parsed value and
//!   parsing it back yields the same value.
//!
//! The well-known grammar instances are exposed as constants and through a
//! name catalog ([`attr_type_by_name`], [`name_of`]).

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};
use tracing::warn;

use super::value::{AttrValue, ValueKind};
use crate::error::{MetadataError, Result};

/// The family of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// ASCII letters and digits.
    Alphanum,
    /// ASCII letters, digits and underscore (RETSNAME).
    IdAlphanum,
    /// Printable ASCII.
    Plaintext,
    /// Printable ASCII plus CR, LF and HT.
    Text,
    /// Characters drawn from an explicit set.
    GenericText(&'static str),
    /// `0` or `1`.
    Boolean,
    /// ISO-8601 timestamp with zone.
    Date,
    /// Signed whole number.
    Numeric,
    /// Unsigned whole number.
    PositiveNumeric,
    /// One of a fixed set of values.
    Enum(&'static [&'static str]),
    /// RETS version, `MM.mm.rrrrr`.
    Version,
    /// `Z` or `[+-]HH:MM`.
    TimeZone,
}

impl Grammar {
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Alphanum => "ALPHANUM",
            Grammar::IdAlphanum => "RETSNAME",
            Grammar::Plaintext => "PLAINTEXT",
            Grammar::Text => "TEXT",
            Grammar::GenericText(_) => "GENERICTEXT",
            Grammar::Boolean => "BOOLEAN",
            Grammar::Date => "DATE",
            Grammar::Numeric => "NUMERIC",
            Grammar::PositiveNumeric => "POSITIVENUM",
            Grammar::Enum(_) => "ENUM",
            Grammar::Version => "VERSION",
            Grammar::TimeZone => "TIMEZONEOFFSET",
        }
    }
}

/// A value grammar with optional length bounds.
///
/// Bounds apply to the textual families only. `max == 0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrType {
    grammar: Grammar,
    min: usize,
    max: usize,
    description: &'static str,
}

const VERSION_MAJOR: i64 = 10_000_000;
const VERSION_MINOR: i64 = 100_000;

impl AttrType {
    pub const fn new(grammar: Grammar, min: usize, max: usize, description: &'static str) -> Self {
        Self {
            grammar,
            min,
            max,
            description,
        }
    }

    const fn unbounded(grammar: Grammar, description: &'static str) -> Self {
        Self::new(grammar, 0, 0, description)
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn name(&self) -> &'static str {
        self.grammar.name()
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    /// The value family this grammar produces on a successful parse.
    pub fn kind(&self) -> ValueKind {
        match self.grammar {
            Grammar::Boolean => ValueKind::Bool,
            Grammar::Date => ValueKind::Date,
            Grammar::Numeric | Grammar::PositiveNumeric | Grammar::Version => ValueKind::Int,
            _ => ValueKind::Text,
        }
    }

    pub fn parse(&self, text: &str, strict: bool) -> Result<AttrValue> {
        match self.parse_strict(text) {
            Ok(value) => Ok(value),
            Err(e) if strict => Err(e),
            Err(e) => {
                warn!(grammar = self.name(), value = text, "keeping loosely parsed value: {}", e);
                Ok(self.parse_loose(text))
            }
        }
    }

    /// Render a value in canonical wire form.
    ///
    /// Raw text kept by loose parsing renders verbatim.
    pub fn render(&self, value: &AttrValue) -> String {
        match value {
            AttrValue::Text(s) => s.clone(),
            AttrValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            AttrValue::Date(d) => d.to_rfc3339_opts(SecondsFormat::Secs, true),
            AttrValue::Int(v) => match self.grammar {
                Grammar::Version => format!(
                    "{}.{:02}.{:05}",
                    v / VERSION_MAJOR,
                    (v / VERSION_MINOR) % 100,
                    v % VERSION_MINOR
                ),
                _ => v.to_string(),
            },
        }
    }

    fn fail(&self, text: &str, reason: impl Into<String>) -> MetadataError {
        MetadataError::parse(self.name(), text, reason)
    }

    fn check_length(&self, text: &str) -> Result<()> {
        if self.max == 0 {
            return Ok(());
        }
        let len = text.chars().count();
        if len < self.min || len > self.max {
            return Err(self.fail(
                text,
                format!("length {} outside {}..={}", len, self.min, self.max),
            ));
        }
        Ok(())
    }

    fn check_chars(&self, text: &str, allowed: impl Fn(char) -> bool) -> Result<()> {
        match text.chars().find(|c| !allowed(*c)) {
            Some(c) => Err(self.fail(text, format!("invalid character {:?}", c))),
            None => Ok(()),
        }
    }

    fn parse_strict(&self, text: &str) -> Result<AttrValue> {
        match self.grammar {
            Grammar::Alphanum => {
                self.check_length(text)?;
                self.check_chars(text, |c| c.is_ascii_alphanumeric())?;
                Ok(AttrValue::Text(text.to_string()))
            }
            Grammar::IdAlphanum => {
                self.check_length(text)?;
                self.check_chars(text, |c| c.is_ascii_alphanumeric() || c == '_')?;
                Ok(AttrValue::Text(text.to_string()))
            }
            Grammar::Plaintext => {
                self.check_length(text)?;
                self.check_chars(text, is_printable)?;
                Ok(AttrValue::Text(text.to_string()))
            }
            Grammar::Text => {
                self.check_length(text)?;
                self.check_chars(text, |c| is_printable(c) || matches!(c, '\r' | '\n' | '\t'))?;
                Ok(AttrValue::Text(text.to_string()))
            }
            Grammar::GenericText(chars) => {
                self.check_length(text)?;
                self.check_chars(text, |c| chars.contains(c))?;
                Ok(AttrValue::Text(text.to_string()))
            }
            Grammar::Boolean => match text {
                "1" => Ok(AttrValue::Bool(true)),
                "0" => Ok(AttrValue::Bool(false)),
                _ => Err(self.fail(text, "expected 0 or 1")),
            },
            Grammar::Date => DateTime::parse_from_rfc3339(text)
                .map(|d| AttrValue::Date(truncate_seconds(d.with_timezone(&Utc))))
                .map_err(|e| self.fail(text, e.to_string())),
            Grammar::Numeric => text
                .parse::<i64>()
                .map(AttrValue::Int)
                .map_err(|e| self.fail(text, e.to_string())),
            Grammar::PositiveNumeric => {
                if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                    return Err(self.fail(text, "expected digits only"));
                }
                text.parse::<i64>()
                    .map(AttrValue::Int)
                    .map_err(|e| self.fail(text, e.to_string()))
            }
            Grammar::Enum(values) => {
                if values.contains(&text) {
                    Ok(AttrValue::Text(text.to_string()))
                } else {
                    Err(self.fail(text, format!("expected one of {}", values.join(", "))))
                }
            }
            Grammar::Version => self.parse_version(text),
            Grammar::TimeZone => {
                if is_timezone_offset(text) {
                    Ok(AttrValue::Text(text.to_string()))
                } else {
                    Err(self.fail(text, "expected Z or [+-]HH:MM"))
                }
            }
        }
    }

    /// Best effort coercion. Never fails; falls back to the raw text.
    fn parse_loose(&self, text: &str) -> AttrValue {
        let trimmed = text.trim();
        let coerced = match self.grammar {
            Grammar::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "1" | "true" | "t" | "y" | "yes" => Some(AttrValue::Bool(true)),
                "0" | "false" | "f" | "n" | "no" | "" => Some(AttrValue::Bool(false)),
                _ => None,
            },
            Grammar::Numeric => trimmed.parse::<i64>().ok().map(AttrValue::Int),
            Grammar::PositiveNumeric => trimmed
                .parse::<i64>()
                .ok()
                .filter(|v| *v >= 0)
                .map(AttrValue::Int),
            Grammar::Date => parse_loose_date(trimmed).map(AttrValue::Date),
            Grammar::Version => self.parse_version(trimmed).ok(),
            Grammar::Enum(values) => values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(trimmed))
                .map(|v| AttrValue::Text(v.to_string())),
            _ => None,
        };
        coerced.unwrap_or_else(|| AttrValue::Text(text.to_string()))
    }

    fn parse_version(&self, text: &str) -> Result<AttrValue> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3
            || parts
                .iter()
                .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(self.fail(text, "expected MM.mm.rrrrr"));
        }
        let number = |s: &str| {
            s.parse::<i64>()
                .map_err(|e| self.fail(text, e.to_string()))
        };
        let (major, minor, release) = (number(parts[0])?, number(parts[1])?, number(parts[2])?);
        if minor >= 100 || release >= VERSION_MINOR || major >= 1_000 {
            return Err(self.fail(text, "version component out of range"));
        }
        Ok(AttrValue::Int(
            major * VERSION_MAJOR + minor * VERSION_MINOR + release,
        ))
    }
}

fn is_printable(c: char) -> bool {
    (' '..='~').contains(&c)
}

fn is_timezone_offset(text: &str) -> bool {
    if text == "Z" {
        return true;
    }
    let bytes = text.as_bytes();
    if bytes.len() != 6 || !matches!(bytes[0], b'+' | b'-') || bytes[3] != b':' {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| {
        text.get(range)
            .filter(|s| s.chars().all(|c| c.is_ascii_digit()))
            .and_then(|s| s.parse::<u32>().ok())
    };
    matches!((digits(1..3), digits(4..6)), (Some(h), Some(m)) if h <= 14 && m < 60)
}

fn truncate_seconds(d: DateTime<Utc>) -> DateTime<Utc> {
    d.with_nanosecond(0).unwrap_or(d)
}

fn parse_loose_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Some(truncate_seconds(d.with_timezone(&Utc)));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(text) {
        return Some(truncate_seconds(d.with_timezone(&Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| truncate_seconds(naive.and_utc()))
}

pub const ALPHANUM: AttrType = AttrType::unbounded(Grammar::Alphanum, "Alpha Numeric.");
pub const ALPHANUM_64: AttrType =
    AttrType::new(Grammar::Alphanum, 1, 64, "Alpha Numeric, 1 to 64 characters.");
pub const ALPHANUM_32: AttrType =
    AttrType::new(Grammar::Alphanum, 1, 32, "Alpha Numeric, 1 to 32 characters.");
pub const ALPHANUM_24: AttrType =
    AttrType::new(Grammar::Alphanum, 1, 24, "Alpha Numeric, 1 to 24 characters.");
pub const ALPHANUM_10: AttrType =
    AttrType::new(Grammar::Alphanum, 1, 10, "Alpha Numeric, 1 to 10 characters.");
pub const PLAINTEXT: AttrType =
    AttrType::unbounded(Grammar::Plaintext, "Any printable ASCII character.");
pub const PLAINTEXT_1024: AttrType = AttrType::new(
    Grammar::Plaintext,
    1,
    1024,
    "Any printable ASCII character, 1 to 1024 characters.",
);
pub const PLAINTEXT_512: AttrType = AttrType::new(
    Grammar::Plaintext,
    1,
    512,
    "Any printable ASCII character, 1 to 512 characters.",
);
pub const PLAINTEXT_128: AttrType = AttrType::new(
    Grammar::Plaintext,
    1,
    128,
    "Any printable ASCII character, 1 to 128 characters.",
);
pub const PLAINTEXT_64: AttrType = AttrType::new(
    Grammar::Plaintext,
    1,
    64,
    "Any printable ASCII character, 1 to 64 characters.",
);
pub const PLAINTEXT_32: AttrType = AttrType::new(
    Grammar::Plaintext,
    1,
    32,
    "Any printable ASCII character, 1 to 32 characters.",
);
pub const TEXT: AttrType =
    AttrType::unbounded(Grammar::Text, "Any printable ASCII including CRLF, SP and HT.");
pub const TEXT_1024: AttrType = AttrType::new(Grammar::Text, 1, 1024, "Text, 1 to 1024 characters.");
pub const TEXT_512: AttrType = AttrType::new(Grammar::Text, 1, 512, "Text, 1 to 512 characters.");
pub const TEXT_256: AttrType = AttrType::new(Grammar::Text, 1, 256, "Text, 1 to 256 characters.");
pub const TEXT_128: AttrType = AttrType::new(Grammar::Text, 1, 128, "Text, 1 to 128 characters.");
pub const TEXT_64: AttrType = AttrType::new(Grammar::Text, 1, 64, "Text, 1 to 64 characters.");
pub const TEXT_32: AttrType = AttrType::new(Grammar::Text, 1, 32, "Text, 1 to 32 characters.");
pub const BOOLEAN: AttrType = AttrType::unbounded(Grammar::Boolean, "0 for FALSE, 1 for TRUE.");
pub const DATE: AttrType = AttrType::unbounded(
    Grammar::Date,
    "A Date/Timestamp in yyyy-mm-ddThh:mm:ssZ format.",
);
pub const NUMERIC: AttrType =
    AttrType::unbounded(Grammar::Numeric, "A positive or negative whole number.");
pub const POSITIVE_NUMERIC: AttrType =
    AttrType::unbounded(Grammar::PositiveNumeric, "A positive whole number.");
pub const VERSION: AttrType =
    AttrType::unbounded(Grammar::Version, "A RETS version in MM.mm.rrrrr format.");
pub const RETS_NAME: AttrType = AttrType::new(
    Grammar::IdAlphanum,
    1,
    64,
    "Alpha Numeric including an underscore.",
);
pub const RETS_ID: AttrType = AttrType::new(
    Grammar::Alphanum,
    1,
    32,
    "A RETS identifier, alpha numeric, 1 to 32 characters.",
);
pub const TIMEZONE_OFFSET: AttrType = AttrType::unbounded(
    Grammar::TimeZone,
    "Z for UTC, [+-]00:00 for offset to UTC.",
);
pub const ATTRIBUTES_1_TO_5: AttrType = AttrType::new(
    Grammar::GenericText("12345,"),
    0,
    10,
    "1,2,3,4,5 singly, or in combination.",
);
pub const VALIDATION_EXPRESSION_TYPES: &[&str] = &["ACCEPT", "REJECT", "SET"];
pub const EXPRESSION_TYPE: AttrType = AttrType::unbounded(
    Grammar::Enum(VALIDATION_EXPRESSION_TYPES),
    "'ACCEPT' or 'REJECT' or 'SET'.",
);

/// Catalog of the well-known grammar instances by stable name.
pub const CATALOG: &[(&str, AttrType)] = &[
    ("Alphanum", ALPHANUM),
    ("Alphanum64", ALPHANUM_64),
    ("Alphanum32", ALPHANUM_32),
    ("Alphanum24", ALPHANUM_24),
    ("Alphanum10", ALPHANUM_10),
    ("Plaintext", PLAINTEXT),
    ("Plaintext1024", PLAINTEXT_1024),
    ("Plaintext512", PLAINTEXT_512),
    ("Plaintext128", PLAINTEXT_128),
    ("Plaintext64", PLAINTEXT_64),
    ("Plaintext32", PLAINTEXT_32),
    ("Text", TEXT),
    ("Text1024", TEXT_1024),
    ("Text512", TEXT_512),
    ("Text256", TEXT_256),
    ("Text128", TEXT_128),
    ("Text64", TEXT_64),
    ("Text32", TEXT_32),
    ("Boolean", BOOLEAN),
    ("Date", DATE),
    ("Numeric", NUMERIC),
    ("PositiveNumeric", POSITIVE_NUMERIC),
    ("Version", VERSION),
    ("RetsName", RETS_NAME),
    ("RetsId", RETS_ID),
    ("TimeZoneOffset", TIMEZONE_OFFSET),
    ("Attributes1to5", ATTRIBUTES_1_TO_5),
    ("ExpressionType", EXPRESSION_TYPE),
];

/// Look up a well-known grammar by catalog name.
pub fn attr_type_by_name(name: &str) -> Option<AttrType> {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, t)| *t)
}

/// Catalog name of a grammar, if it is one of the well-known instances.
///
/// Catalog entries are pairwise distinct, so this is the inverse of
/// [`attr_type_by_name`].
pub fn name_of(attr_type: &AttrType) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(_, t)| t == attr_type)
        .map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn round_trips(t: &AttrType, text: &str) {
        let parsed = t.parse(text, true).unwrap();
        assert_eq!(t.render(&parsed), text, "{} did not round trip", text);
        assert_eq!(t.parse(&t.render(&parsed), true).unwrap(), parsed);
    }

    #[test]
    fn canonical_inputs_round_trip() {
        round_trips(&ALPHANUM_32, "RES");
        round_trips(&RETS_NAME, "LN_EDITMASK");
        round_trips(&PLAINTEXT_64, "Single Family");
        round_trips(&TEXT, "line one\r\nline\ttwo");
        round_trips(&ATTRIBUTES_1_TO_5, "1,2,5");
        round_trips(&BOOLEAN, "1");
        round_trips(&BOOLEAN, "0");
        round_trips(&DATE, "2004-06-01T12:30:00Z");
        round_trips(&NUMERIC, "-42");
        round_trips(&POSITIVE_NUMERIC, "17");
        round_trips(&EXPRESSION_TYPE, "REJECT");
        round_trips(&VERSION, "1.05.00012");
        round_trips(&TIMEZONE_OFFSET, "Z");
        round_trips(&TIMEZONE_OFFSET, "-05:00");
    }

    #[test]
    fn date_with_offset_normalizes_to_utc() {
        let parsed = DATE.parse("2004-06-01T08:30:00-04:00", true).unwrap();
        assert_eq!(
            parsed,
            AttrValue::Date(Utc.with_ymd_and_hms(2004, 6, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(DATE.render(&parsed), "2004-06-01T12:30:00Z");
    }

    #[test]
    fn version_canonicalizes_release_width() {
        let parsed = VERSION.parse("1.00.001", true).unwrap();
        assert_eq!(parsed, AttrValue::Int(10_000_001));
        assert_eq!(VERSION.render(&parsed), "1.00.00001");
    }

    #[test]
    fn strict_failures_carry_grammar_and_text() {
        let err = ALPHANUM_10.parse("has space", true).unwrap_err();
        match err {
            MetadataError::Parse { grammar, text, .. } => {
                assert_eq!(grammar, "ALPHANUM");
                assert_eq!(text, "has space");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(ALPHANUM_10.parse("ABCDEFGHIJK", true).is_err());
        assert!(BOOLEAN.parse("true", true).is_err());
        assert!(NUMERIC.parse("12a", true).is_err());
        assert!(POSITIVE_NUMERIC.parse("-1", true).is_err());
        assert!(DATE.parse("2004-06-01", true).is_err());
        assert!(VERSION.parse("1.0", true).is_err());
        assert!(EXPRESSION_TYPE.parse("accept", true).is_err());
        assert!(TIMEZONE_OFFSET.parse("+5:00", true).is_err());
        assert!(PLAINTEXT.parse("tab\there", true).is_err());
        assert!(ATTRIBUTES_1_TO_5.parse("6", true).is_err());
    }

    #[test]
    fn loose_parsing_never_fails() {
        assert_eq!(BOOLEAN.parse("TRUE", false).unwrap(), AttrValue::Bool(true));
        assert_eq!(BOOLEAN.parse("no", false).unwrap(), AttrValue::Bool(false));
        assert_eq!(
            BOOLEAN.parse("maybe", false).unwrap(),
            AttrValue::Text("maybe".into())
        );
        assert_eq!(NUMERIC.parse(" 12 ", false).unwrap(), AttrValue::Int(12));
        assert_eq!(
            NUMERIC.parse("twelve", false).unwrap(),
            AttrValue::Text("twelve".into())
        );
        assert_eq!(
            EXPRESSION_TYPE.parse("accept", false).unwrap(),
            AttrValue::Text("ACCEPT".into())
        );
        assert_eq!(
            ALPHANUM_10.parse("has space", false).unwrap(),
            AttrValue::Text("has space".into())
        );
        assert_eq!(
            DATE.parse("2004-06-01 12:30:00", false).unwrap(),
            AttrValue::Date(Utc.with_ymd_and_hms(2004, 6, 1, 12, 30, 0).unwrap())
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged_while(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn loose_fallback_is_logged() {
        let logs = logged_while(|| {
            assert_eq!(
                NUMERIC.parse("twelve", false).unwrap(),
                AttrValue::Text("twelve".into())
            );
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("NUMERIC"), "{logs}");

        let quiet = logged_while(|| {
            NUMERIC.parse("12", false).unwrap();
        });
        assert!(quiet.is_empty(), "{quiet}");
    }

    #[test]
    fn render_is_stable() {
        let value = AttrValue::Date(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(DATE.render(&value), DATE.render(&value));
        assert_eq!(BOOLEAN.render(&AttrValue::Bool(true)), "1");
    }

    #[test]
    fn catalog_names_are_inverse() {
        for (name, attr_type) in CATALOG {
            assert_eq!(attr_type_by_name(name), Some(*attr_type));
            assert_eq!(name_of(attr_type), Some(*name));
        }
        assert_eq!(name_of(&TEXT_256), Some("Text256"));
        assert_eq!(name_of(&RETS_ID), Some("RetsId"));
        assert_eq!(name_of(&ALPHANUM_32), Some("Alphanum32"));
        assert_eq!(
            RETS_ID.parse("Property1", true).unwrap(),
            ALPHANUM_32.parse("Property1", true).unwrap()
        );
        assert!(attr_type_by_name("Nope").is_none());
    }

    #[test]
    fn value_kinds_follow_grammar() {
        assert_eq!(BOOLEAN.kind(), ValueKind::Bool);
        assert_eq!(VERSION.kind(), ValueKind::Int);
        assert_eq!(DATE.kind(), ValueKind::Date);
        assert_eq!(EXPRESSION_TYPE.kind(), ValueKind::Text);
    }
}
