//! Key-naming conventions shared by every locale table.
//!
//! An unprefixed key holds Gregorian data. Other calendars prefix the key
//! with their system name (`islamic.MonthNames`), width variants insert the
//! width (`buddhist.narrow.Eras`), standalone forms insert `standalone`,
//! and numbering systems prefix `NumberElements` (`arab.NumberElements`).
//! `field.*`, `calendarname.*` and `timezone.*` always hold a single string.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub const MONTH_NAMES: &str = "MonthNames";
pub const MONTH_ABBREVIATIONS: &str = "MonthAbbreviations";
pub const MONTH_NARROWS: &str = "MonthNarrows";
pub const DAY_NAMES: &str = "DayNames";
pub const DAY_ABBREVIATIONS: &str = "DayAbbreviations";
pub const DAY_NARROWS: &str = "DayNarrows";
pub const QUARTER_NAMES: &str = "QuarterNames";
pub const QUARTER_ABBREVIATIONS: &str = "QuarterAbbreviations";
pub const QUARTER_NARROWS: &str = "QuarterNarrows";
pub const ERAS: &str = "Eras";
pub const AM_PM_MARKERS: &str = "AmPmMarkers";
pub const DATE_PATTERNS: &str = "DatePatterns";
pub const TIME_PATTERNS: &str = "TimePatterns";
pub const DATE_TIME_PATTERNS: &str = "DateTimePatterns";
pub const NUMBER_ELEMENTS: &str = "NumberElements";

const FIELD: &str = "field";
const CALENDAR_NAME: &str = "calendarname";
const TIMEZONE: &str = "timezone";
const STANDALONE: &str = "standalone";

/// Month lists carry a 13th slot, empty for calendars without a leap month.
pub const MONTH_COUNT: usize = 13;
pub const DAY_COUNT: usize = 7;
pub const QUARTER_COUNT: usize = 4;
/// FULL, LONG, MEDIUM, SHORT.
pub const PATTERN_COUNT: usize = 4;
pub const NUMBER_ELEMENT_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    Gregorian,
    Buddhist,
    Islamic,
    IslamicCivil,
    IslamicUmalqura,
    Japanese,
    Roc,
}

impl CalendarSystem {
    pub const ALL: [CalendarSystem; 7] = [
        CalendarSystem::Gregorian,
        CalendarSystem::Buddhist,
        CalendarSystem::Islamic,
        CalendarSystem::IslamicCivil,
        CalendarSystem::IslamicUmalqura,
        CalendarSystem::Japanese,
        CalendarSystem::Roc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "gregorian",
            CalendarSystem::Buddhist => "buddhist",
            CalendarSystem::Islamic => "islamic",
            CalendarSystem::IslamicCivil => "islamic-civil",
            CalendarSystem::IslamicUmalqura => "islamic-umalqura",
            CalendarSystem::Japanese => "japanese",
            CalendarSystem::Roc => "roc",
        }
    }

    /// Key prefix; Gregorian keys are unprefixed.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            CalendarSystem::Gregorian => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarSystem::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown calendar system: {s}"))
    }
}

/// Width variant. `Default` is the implicit, unprefixed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Width {
    #[default]
    Default,
    Narrow,
    Abbreviated,
    Long,
}

impl Width {
    pub fn segment(self) -> Option<&'static str> {
        match self {
            Width::Default => None,
            Width::Narrow => Some("narrow"),
            Width::Abbreviated => Some("abbreviated"),
            Width::Long => Some("long"),
        }
    }

    /// Base key of the month list for this width (`Default` and `Long` are
    /// the full names).
    pub fn month_base(self) -> &'static str {
        match self {
            Width::Default | Width::Long => MONTH_NAMES,
            Width::Abbreviated => MONTH_ABBREVIATIONS,
            Width::Narrow => MONTH_NARROWS,
        }
    }

    pub fn day_base(self) -> &'static str {
        match self {
            Width::Default | Width::Long => DAY_NAMES,
            Width::Abbreviated => DAY_ABBREVIATIONS,
            Width::Narrow => DAY_NARROWS,
        }
    }

    pub fn quarter_base(self) -> &'static str {
        match self {
            Width::Default | Width::Long => QUARTER_NAMES,
            Width::Abbreviated => QUARTER_ABBREVIATIONS,
            Width::Narrow => QUARTER_NARROWS,
        }
    }
}

/// Grammatical context of a month or day name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Context {
    #[default]
    Format,
    Standalone,
}

/// `<calendar>.<base>`, or just `base` for Gregorian.
pub fn calendar_key(calendar: CalendarSystem, base: &str) -> String {
    match calendar.prefix() {
        Some(prefix) => format!("{prefix}.{base}"),
        None => base.to_string(),
    }
}

/// `<calendar>.<width>.<field>` with absent parts omitted.
pub fn width_key(calendar: CalendarSystem, width: Width, field: &str) -> String {
    match width.segment() {
        Some(w) => calendar_key(calendar, &format!("{w}.{field}")),
        None => calendar_key(calendar, field),
    }
}

pub fn context_key(calendar: CalendarSystem, context: Context, base: &str) -> String {
    match context {
        Context::Format => calendar_key(calendar, base),
        Context::Standalone => calendar_key(calendar, &format!("{STANDALONE}.{base}")),
    }
}

pub fn standalone_key(base: &str) -> String {
    format!("{STANDALONE}.{base}")
}

pub fn number_elements_key(numbering_system: &str) -> String {
    format!("{numbering_system}.{NUMBER_ELEMENTS}")
}

pub fn field_key(name: &str) -> String {
    format!("{FIELD}.{name}")
}

pub fn calendar_name_key(calendar: CalendarSystem) -> String {
    format!("{CALENDAR_NAME}.{}", calendar.as_str())
}

pub fn timezone_key(subkey: &str) -> String {
    format!("{TIMEZONE}.{subkey}")
}

/// Expected shape of the value stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    Text,
    List(usize),
    AnyList,
    Any,
}

impl fmt::Display for KeyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyShape::Text => f.write_str("text"),
            KeyShape::List(n) => write!(f, "list of {n}"),
            KeyShape::AnyList => f.write_str("list"),
            KeyShape::Any => f.write_str("any"),
        }
    }
}

pub fn shape_of(key: &str) -> KeyShape {
    let first = key.split('.').next().unwrap_or(key);
    if matches!(first, FIELD | CALENDAR_NAME | TIMEZONE) {
        return KeyShape::Text;
    }

    let last = key.rsplit('.').next().unwrap_or(key);
    match last {
        MONTH_NAMES | MONTH_ABBREVIATIONS | MONTH_NARROWS => KeyShape::List(MONTH_COUNT),
        DAY_NAMES | DAY_ABBREVIATIONS | DAY_NARROWS => KeyShape::List(DAY_COUNT),
        QUARTER_NAMES | QUARTER_ABBREVIATIONS | QUARTER_NARROWS => KeyShape::List(QUARTER_COUNT),
        DATE_PATTERNS | TIME_PATTERNS | DATE_TIME_PATTERNS => KeyShape::List(PATTERN_COUNT),
        NUMBER_ELEMENTS => KeyShape::List(NUMBER_ELEMENT_COUNT),
        ERAS | AM_PM_MARKERS => KeyShape::AnyList,
        _ => KeyShape::Any,
    }
}

/// Non-empty dot-separated segments without whitespace.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .split('.')
            .all(|seg| !seg.is_empty() && !seg.chars().any(char::is_whitespace))
}

/// `root`, or a language subtag followed by `_`-separated subtags
/// (`bs_Cyrl`, `yue_Hans`, `sr_Latn_BA`).
pub fn is_valid_locale_tag(tag: &str) -> bool {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = TAG_REGEX.get_or_init(|| {
        Regex::new(r"^(?:root|[a-z]{2,3}(?:_[A-Za-z0-9]{2,8})*)$").expect("Invalid regex pattern")
    });
    re.is_match(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builders() {
        assert_eq!(calendar_key(CalendarSystem::Gregorian, DAY_NAMES), "DayNames");
        assert_eq!(calendar_key(CalendarSystem::Islamic, DAY_NAMES), "islamic.DayNames");
        assert_eq!(
            width_key(CalendarSystem::Buddhist, Width::Narrow, ERAS),
            "buddhist.narrow.Eras"
        );
        assert_eq!(width_key(CalendarSystem::Gregorian, Width::Long, ERAS), "long.Eras");
        assert_eq!(width_key(CalendarSystem::Roc, Width::Default, ERAS), "roc.Eras");
        assert_eq!(
            context_key(CalendarSystem::Gregorian, Context::Standalone, MONTH_NAMES),
            "standalone.MonthNames"
        );
        assert_eq!(number_elements_key("arab"), "arab.NumberElements");
        assert_eq!(field_key("year"), "field.year");
        assert_eq!(
            calendar_name_key(CalendarSystem::IslamicUmalqura),
            "calendarname.islamic-umalqura"
        );
        assert_eq!(timezone_key("regionFormat.standard"), "timezone.regionFormat.standard");
    }

    #[test]
    fn test_shape_of() {
        assert_eq!(shape_of("MonthNames"), KeyShape::List(13));
        assert_eq!(shape_of("islamic.MonthAbbreviations"), KeyShape::List(13));
        assert_eq!(shape_of("standalone.DayNarrows"), KeyShape::List(7));
        assert_eq!(shape_of("buddhist.DatePatterns"), KeyShape::List(4));
        assert_eq!(shape_of("DateTimePatterns"), KeyShape::List(4));
        assert_eq!(shape_of("latn.NumberElements"), KeyShape::List(11));
        assert_eq!(shape_of("japanese.narrow.Eras"), KeyShape::AnyList);
        assert_eq!(shape_of("field.year"), KeyShape::Text);
        assert_eq!(shape_of("timezone.regionFormat.daylight"), KeyShape::Text);
        assert_eq!(shape_of("calendarname.roc"), KeyShape::Text);
        assert_eq!(shape_of("DefaultNumberingSystem"), KeyShape::Any);
    }

    #[test]
    fn test_locale_tags() {
        for ok in ["ar", "fi", "yue_Hans", "bs_Cyrl", "uz_Cyrl", "sr_Latn_BA", "root"] {
            assert!(is_valid_locale_tag(ok), "{ok} should be valid");
        }
        for bad in ["", "x", "xx-YY", "EN", "fi_", "fi__FI", "a b"] {
            assert!(!is_valid_locale_tag(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("islamic-civil.DatePatterns"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("field..year"));
        assert!(!is_valid_key("Month Names"));
    }

    #[test]
    fn test_calendar_round_trip_names() {
        for cal in CalendarSystem::ALL {
            assert_eq!(cal.as_str().parse::<CalendarSystem>().unwrap(), cal);
        }
        assert!("hebrew".parse::<CalendarSystem>().is_err());
    }
}
