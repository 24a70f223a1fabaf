use chrono::{Month, Weekday};

use crate::error::LookupError;
use crate::keys::{self, CalendarSystem, Context, Width};
use crate::table::LocaleTable;

/// Pattern style; the index into `DatePatterns`, `TimePatterns` and
/// `DateTimePatterns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Full,
    Long,
    Medium,
    Short,
}

impl Style {
    pub fn index(self) -> usize {
        match self {
            Style::Full => 0,
            Style::Long => 1,
            Style::Medium => 2,
            Style::Short => 3,
        }
    }
}

/// Read-only view of one calendar system's data in a locale table.
///
/// No fallback happens between calendars, widths or contexts: a missing
/// `islamic.MonthNames` is reported even when `MonthNames` exists.
#[derive(Debug, Clone, Copy)]
pub struct CalendarView<'a> {
    table: &'a LocaleTable,
    calendar: CalendarSystem,
}

impl<'a> CalendarView<'a> {
    pub fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    /// Month names for `width`, 13 entries, January first.
    pub fn month_names(
        &self,
        width: Width,
        context: Context,
    ) -> Result<&'a [String], LookupError> {
        self.table.list(&keys::context_key(self.calendar, context, width.month_base()))
    }

    pub fn month_name(
        &self,
        month: Month,
        width: Width,
        context: Context,
    ) -> Result<&'a str, LookupError> {
        let key = keys::context_key(self.calendar, context, width.month_base());
        self.table.list_item(&key, month.number_from_month() as usize - 1)
    }

    /// Day names for `width`, 7 entries, Sunday first.
    pub fn day_names(
        &self,
        width: Width,
        context: Context,
    ) -> Result<&'a [String], LookupError> {
        self.table.list(&keys::context_key(self.calendar, context, width.day_base()))
    }

    pub fn day_name(
        &self,
        day: Weekday,
        width: Width,
        context: Context,
    ) -> Result<&'a str, LookupError> {
        let key = keys::context_key(self.calendar, context, width.day_base());
        self.table.list_item(&key, day.num_days_from_sunday() as usize)
    }

    /// Quarter name, `quarter` counting from 1.
    pub fn quarter_name(&self, quarter: usize, width: Width) -> Result<&'a str, LookupError> {
        let key = keys::calendar_key(self.calendar, width.quarter_base());
        self.table.list_item(&key, quarter.wrapping_sub(1))
    }

    pub fn eras(&self, width: Width) -> Result<&'a [String], LookupError> {
        self.table.list(&keys::width_key(self.calendar, width, keys::ERAS))
    }

    pub fn am_pm_markers(&self, width: Width) -> Result<&'a [String], LookupError> {
        self.table.list(&keys::width_key(self.calendar, width, keys::AM_PM_MARKERS))
    }

    pub fn date_pattern(&self, style: Style) -> Result<&'a str, LookupError> {
        self.pattern(keys::DATE_PATTERNS, style)
    }

    pub fn time_pattern(&self, style: Style) -> Result<&'a str, LookupError> {
        self.pattern(keys::TIME_PATTERNS, style)
    }

    pub fn date_time_pattern(&self, style: Style) -> Result<&'a str, LookupError> {
        self.pattern(keys::DATE_TIME_PATTERNS, style)
    }

    /// Display name of this calendar system in the table's language.
    pub fn display_name(&self) -> Result<&'a str, LookupError> {
        self.table.text(&keys::calendar_name_key(self.calendar))
    }

    fn pattern(&self, base: &str, style: Style) -> Result<&'a str, LookupError> {
        self.table.list_item(&keys::calendar_key(self.calendar, base), style.index())
    }
}

impl LocaleTable {
    pub fn calendar(&self, calendar: CalendarSystem) -> CalendarView<'_> {
        CalendarView {
            table: self,
            calendar,
        }
    }

    pub fn gregorian(&self) -> CalendarView<'_> {
        self.calendar(CalendarSystem::Gregorian)
    }

    pub fn field_label(&self, field: &str) -> Result<&str, LookupError> {
        self.text(&keys::field_key(field))
    }

    pub fn timezone_format(&self, subkey: &str) -> Result<&str, LookupError> {
        self.text(&keys::timezone_key(subkey))
    }
}
