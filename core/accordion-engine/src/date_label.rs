//! FILENAME: core/accordion-engine/src/date_label.rs
//! PURPOSE: Turns date-like group keys ("2025-01") into group header labels.
//! CONTEXT: Only keys that look like `YYYY-MM` are touched, and only when a
//! date format is configured. Anything that fails the strict year-month parse
//! falls back to the raw key; the failure is logged, never returned.
//!
//! The `custom` mode understands a fixed subset of the PHP `date()` letters.
//! A pattern is evaluated for the first day of the parsed month at midnight:
//!
//! | Token | Output |
//! |-------|--------|
//! | `F` / `M` | month name, full / short (`January` / `Jan`) |
//! | `m` / `n` | month number, padded / unpadded (`01` / `1`) |
//! | `t` | days in the month |
//! | `Y` / `y` | year, four / two digits |
//! | `L` | `1` in a leap year, else `0` |
//! | `d` / `j` | day of month (`01` / `1`) |
//! | `D` / `l` | weekday name, short / full |
//! | `N` / `w` | ISO weekday 1-7 / weekday 0-6 (Sunday = 0) |
//! | `H` `G` `h` `g` `i` `s` | midnight (`00` `0` `12` `12` `00` `00`) |
//! | `a` / `A` | `am` / `AM` |
//! | `\x` | literal `x` |
//!
//! Every other character is copied through. Month and day names always come
//! from the English tables below, independent of the process locale.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::definition::{DateGroupFormat, DEFAULT_CUSTOM_DATE_FORMAT};
use crate::error::{AccordionError, Result};
use crate::logging::log_warn;

const LOG_CATEGORY: &str = "DATE_LABEL";

/// Keys must start with `YYYY-MM` before any reformatting is attempted.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}").expect("date prefix pattern is valid"));

// ============================================================================
// TOKENS
// ============================================================================

/// A parsed token of a custom date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    MonthNameFull,  // F
    MonthNameShort, // M
    Month2,         // m
    Month1,         // n
    DaysInMonth,    // t
    Year4,          // Y
    Year2,          // y
    LeapYear,       // L
    Day2,           // d
    Day1,           // j
    DayNameShort,   // D
    DayNameFull,    // l
    IsoWeekday,     // N
    Weekday,        // w
    Hour24Padded,   // H
    Hour24,         // G
    Hour12Padded,   // h
    Hour12,         // g
    Minute2,        // i
    Second2,        // s
    MeridiemLower,  // a
    MeridiemUpper,  // A
    Literal(String),
}

impl DateToken {
    fn from_letter(ch: char) -> Option<DateToken> {
        let token = match ch {
            'F' => DateToken::MonthNameFull,
            'M' => DateToken::MonthNameShort,
            'm' => DateToken::Month2,
            'n' => DateToken::Month1,
            't' => DateToken::DaysInMonth,
            'Y' => DateToken::Year4,
            'y' => DateToken::Year2,
            'L' => DateToken::LeapYear,
            'd' => DateToken::Day2,
            'j' => DateToken::Day1,
            'D' => DateToken::DayNameShort,
            'l' => DateToken::DayNameFull,
            'N' => DateToken::IsoWeekday,
            'w' => DateToken::Weekday,
            'H' => DateToken::Hour24Padded,
            'G' => DateToken::Hour24,
            'h' => DateToken::Hour12Padded,
            'g' => DateToken::Hour12,
            'i' => DateToken::Minute2,
            's' => DateToken::Second2,
            'a' => DateToken::MeridiemLower,
            'A' => DateToken::MeridiemUpper,
            _ => return None,
        };
        Some(token)
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// A custom date pattern, tokenized once and rendered per group key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatPattern {
    tokens: Vec<DateToken>,
}

impl DateFormatPattern {
    /// Tokenizes a pattern. Never fails: unknown characters become literals.
    pub fn parse(pattern: &str) -> Self {
        let mut tokens: Vec<DateToken> = Vec::new();
        let mut chars = pattern.chars();

        while let Some(ch) = chars.next() {
            let token = if ch == '\\' {
                // A trailing backslash prints itself
                DateToken::Literal(chars.next().unwrap_or('\\').to_string())
            } else {
                DateToken::from_letter(ch).unwrap_or_else(|| DateToken::Literal(ch.to_string()))
            };
            push_token(&mut tokens, token);
        }

        DateFormatPattern { tokens }
    }

    /// "F Y"
    pub fn month_year() -> Self {
        DateFormatPattern::parse(DEFAULT_CUSTOM_DATE_FORMAT)
    }

    pub fn tokens(&self) -> &[DateToken] {
        &self.tokens
    }

    /// Renders the pattern for the given date at midnight.
    pub fn render(&self, date: NaiveDate) -> String {
        let year = date.year();
        let month = date.month();
        let weekday = date.weekday();
        let mut result = String::new();

        for token in &self.tokens {
            match token {
                DateToken::MonthNameFull => result.push_str(month_name_full(month)),
                DateToken::MonthNameShort => result.push_str(month_name_short(month)),
                DateToken::Month2 => result.push_str(&format!("{:02}", month)),
                DateToken::Month1 => result.push_str(&month.to_string()),
                DateToken::DaysInMonth => result.push_str(&days_in_month(year, month).to_string()),
                DateToken::Year4 => result.push_str(&format!("{:04}", year)),
                DateToken::Year2 => result.push_str(&format!("{:02}", year.rem_euclid(100))),
                DateToken::LeapYear => result.push(if is_leap_year(year) { '1' } else { '0' }),
                DateToken::Day2 => result.push_str(&format!("{:02}", date.day())),
                DateToken::Day1 => result.push_str(&date.day().to_string()),
                DateToken::DayNameShort => {
                    result.push_str(day_name_short(weekday.num_days_from_sunday()))
                }
                DateToken::DayNameFull => {
                    result.push_str(day_name_full(weekday.num_days_from_sunday()))
                }
                DateToken::IsoWeekday => result.push_str(&weekday.number_from_monday().to_string()),
                DateToken::Weekday => result.push_str(&weekday.num_days_from_sunday().to_string()),
                DateToken::Hour24Padded | DateToken::Minute2 | DateToken::Second2 => {
                    result.push_str("00")
                }
                DateToken::Hour24 => result.push('0'),
                DateToken::Hour12Padded | DateToken::Hour12 => result.push_str("12"),
                DateToken::MeridiemLower => result.push_str("am"),
                DateToken::MeridiemUpper => result.push_str("AM"),
                DateToken::Literal(s) => result.push_str(s),
            }
        }

        result
    }
}

/// Appends a token, merging adjacent literals.
fn push_token(tokens: &mut Vec<DateToken>, token: DateToken) {
    if let DateToken::Literal(ref text) = token {
        if let Some(DateToken::Literal(prev)) = tokens.last_mut() {
            prev.push_str(text);
            return;
        }
    }
    tokens.push(token);
}

// ============================================================================
// FORMATTER
// ============================================================================

/// Group label formatter configured for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabelFormatter {
    mode: DateGroupFormat,
    pattern: DateFormatPattern,
}

impl Default for DateLabelFormatter {
    fn default() -> Self {
        DateLabelFormatter::new(DateGroupFormat::None, DEFAULT_CUSTOM_DATE_FORMAT)
    }
}

impl DateLabelFormatter {
    /// `custom_pattern` is only consulted in `Custom` mode.
    pub fn new(mode: DateGroupFormat, custom_pattern: &str) -> Self {
        let pattern = match mode {
            DateGroupFormat::Custom => DateFormatPattern::parse(custom_pattern),
            DateGroupFormat::MonthYear | DateGroupFormat::None => DateFormatPattern::month_year(),
            DateGroupFormat::Month => DateFormatPattern::parse("F"),
            DateGroupFormat::Year => DateFormatPattern::parse("Y"),
        };
        DateLabelFormatter { mode, pattern }
    }

    pub fn mode(&self) -> DateGroupFormat {
        self.mode
    }

    /// Returns true if `key` would be considered for reformatting.
    pub fn applies_to(&self, key: &str) -> bool {
        self.mode != DateGroupFormat::None && DATE_PREFIX.is_match(key)
    }

    /// Produces the display label for a group key.
    pub fn format(&self, key: &str) -> String {
        if !self.applies_to(key) {
            return key.to_string();
        }

        match parse_year_month(key) {
            Ok(date) => self.pattern.render(date),
            Err(err) => {
                log_warn!(LOG_CATEGORY, "{}", err);
                key.to_string()
            }
        }
    }
}

/// Formats a single group key (convenience wrapper).
pub fn format_group_label(raw_key: &str, mode: DateGroupFormat, custom_pattern: &str) -> String {
    DateLabelFormatter::new(mode, custom_pattern).format(raw_key)
}

/// Strictly parses `YYYY-MM` into the first day of that month.
/// Trailing content (a day, a time) makes the parse fail.
pub fn parse_year_month(key: &str) -> Result<NaiveDate> {
    let parse_error = || AccordionError::DateParse {
        key: key.to_string(),
    };

    let (year_part, month_part) = key.split_once('-').ok_or_else(parse_error)?;
    if year_part.len() != 4
        || month_part.len() != 2
        || !year_part.bytes().all(|b| b.is_ascii_digit())
        || !month_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(parse_error());
    }

    let year: i32 = year_part.parse().map_err(|_| parse_error())?;
    let month: u32 = month_part.parse().map_err(|_| parse_error())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(parse_error)
}

// ============================================================================
// CALENDAR TABLES
// ============================================================================

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn month_name_short(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

fn month_name_full(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "???",
    }
}

fn day_name_short(dow: u32) -> &'static str {
    match dow {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "???",
    }
}

fn day_name_full(dow: u32) -> &'static str {
    match dow {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "???",
    }
}

// ============================================================================
// TESTS
// ============================================================================
