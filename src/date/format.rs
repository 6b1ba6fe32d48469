//! Moment-style date format strings
//!
//! The settings store a format such as `YYYY-MM-DD` or `MMMM Do, YYYY`.
//! A [`DateFormat`] tokenises it once and can then format a date or
//! strictly parse a candidate span.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A single date field inside a format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    /// `YYYY` - four digit year
    Year4,
    /// `YY` - two digit year (69-99 → 19xx, 00-68 → 20xx)
    Year2,
    /// `Q` - quarter 1-4
    Quarter,
    /// `M` - month 1-12
    Month,
    /// `MM` - month 01-12
    Month2,
    /// `MMM` - Jan..Dec
    MonthShort,
    /// `MMMM` - January..December
    MonthLong,
    /// `D` - day of month 1-31
    Day,
    /// `DD` - day of month 01-31
    Day2,
    /// `Do` - 1st..31st
    DayOrdinal,
    /// `DDD` - day of year 1-366
    DayOfYear,
    /// `DDDD` - day of year 001-366
    DayOfYear3,
    /// `d` - day of week 0-6, Sunday first
    Weekday,
    /// `ddd` - Sun..Sat
    WeekdayShort,
    /// `dddd` - Sunday..Saturday
    WeekdayLong,
}

/// Token patterns, longest first so `MMMM` wins over `MM`
const TOKEN_PATTERNS: [(&str, FormatToken); 15] = [
    ("YYYY", FormatToken::Year4),
    ("MMMM", FormatToken::MonthLong),
    ("DDDD", FormatToken::DayOfYear3),
    ("dddd", FormatToken::WeekdayLong),
    ("MMM", FormatToken::MonthShort),
    ("DDD", FormatToken::DayOfYear),
    ("ddd", FormatToken::WeekdayShort),
    ("YY", FormatToken::Year2),
    ("MM", FormatToken::Month2),
    ("Do", FormatToken::DayOrdinal),
    ("DD", FormatToken::Day2),
    ("M", FormatToken::Month),
    ("D", FormatToken::Day),
    ("d", FormatToken::Weekday),
    ("Q", FormatToken::Quarter),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Token(FormatToken),
    Literal(String),
}

/// A tokenised moment-style date format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    source: String,
    items: Vec<FormatItem>,
}

impl DateFormat {
    /// Tokenise a format string. Never fails: unknown characters are literals.
    pub fn parse(source: &str) -> Self {
        let mut items: Vec<FormatItem> = Vec::new();
        let mut rest = source;

        while !rest.is_empty() {
            if let Some(escaped) = rest.strip_prefix('[') {
                if let Some(close) = escaped.find(']') {
                    push_literal(&mut items, &escaped[..close]);
                    rest = &escaped[close + 1..];
                    continue;
                }
            }

            if let Some((pattern, token)) = TOKEN_PATTERNS
                .iter()
                .find(|(pattern, _)| rest.starts_with(pattern))
            {
                items.push(FormatItem::Token(*token));
                rest = &rest[pattern.len()..];
                continue;
            }

            let ch = rest.chars().next().unwrap_or_default();
            let mut buf = [0u8; 4];
            push_literal(&mut items, ch.encode_utf8(&mut buf));
            rest = &rest[ch.len_utf8()..];
        }

        Self {
            source: source.to_string(),
            items,
        }
    }

    /// The format string this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether the format carries a year field
    pub fn has_year(&self) -> bool {
        self.items.iter().any(|item| {
            matches!(
                item,
                FormatItem::Token(FormatToken::Year4 | FormatToken::Year2)
            )
        })
    }

    /// Render a date with this format
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        for item in &self.items {
            match item {
                FormatItem::Literal(text) => out.push_str(text),
                FormatItem::Token(token) => write_token(&mut out, *token, date),
            }
        }
        out
    }

    /// Strictly parse `input`, using `fallback_year` when the format has no year.
    ///
    /// Every field must be present in its exact shape and nothing may trail.
    /// The resulting date must format back to `input` byte-for-byte, which
    /// also rejects inconsistent weekday or quarter fields.
    pub fn parse_strict_in_year(&self, input: &str, fallback_year: i32) -> Option<NaiveDate> {
        if input.is_empty() {
            return None;
        }

        let mut fields = ParsedFields::default();
        let mut rest = input;

        for item in &self.items {
            rest = match item {
                FormatItem::Literal(text) => rest.strip_prefix(text.as_str())?,
                FormatItem::Token(token) => fields.consume(*token, rest)?,
            };
        }

        if !rest.is_empty() {
            return None;
        }

        let date = fields.into_date(fallback_year)?;
        (self.format(date) == input).then_some(date)
    }

    /// Strictly parse `input`; a format without a year resolves to the current year.
    pub fn parse_strict(&self, input: &str) -> Option<NaiveDate> {
        let fallback_year = if self.has_year() {
            0
        } else {
            chrono::Local::now().year()
        };
        self.parse_strict_in_year(input, fallback_year)
    }
}

impl From<&str> for DateFormat {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(items: &mut Vec<FormatItem>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(FormatItem::Literal(last)) = items.last_mut() {
        last.push_str(text);
    } else {
        items.push(FormatItem::Literal(text.to_string()));
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

impl FormatToken {
    /// The chrono specifier rendering this token, for tokens chrono covers
    fn strftime(self) -> Option<&'static str> {
        let spec = match self {
            FormatToken::Year4 => "%Y",
            FormatToken::Year2 => "%y",
            FormatToken::Month => "%-m",
            FormatToken::Month2 => "%m",
            FormatToken::MonthShort => "%b",
            FormatToken::MonthLong => "%B",
            FormatToken::Day => "%-d",
            FormatToken::Day2 => "%d",
            FormatToken::DayOfYear => "%-j",
            FormatToken::DayOfYear3 => "%j",
            FormatToken::Weekday => "%w",
            FormatToken::WeekdayShort => "%a",
            FormatToken::WeekdayLong => "%A",
            FormatToken::Quarter | FormatToken::DayOrdinal => return None,
        };
        Some(spec)
    }
}

fn write_token(out: &mut String, token: FormatToken, date: NaiveDate) {
    use std::fmt::Write;

    // Writing into a String cannot fail
    let _ = match token.strftime() {
        Some(spec) => write!(out, "{}", date.format(spec)),
        None if token == FormatToken::Quarter => write!(out, "{}", date.month0() / 3 + 1),
        None => write!(out, "{}{}", date.day(), ordinal_suffix(date.day())),
    };
}

/// Fields collected while walking a candidate span
#[derive(Debug, Default)]
struct ParsedFields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
}

impl ParsedFields {
    /// Consume one token from the front of `input`, returning the remainder
    fn consume<'a>(&mut self, token: FormatToken, input: &'a str) -> Option<&'a str> {
        match token {
            FormatToken::Year4 => {
                let (year, rest) = take_digits(input, 4, 4)?;
                self.year = Some(year as i32);
                Some(rest)
            }
            FormatToken::Year2 => {
                let (yy, rest) = take_digits(input, 2, 2)?;
                let yy = yy as i32;
                self.year = Some(if yy > 68 { 1900 + yy } else { 2000 + yy });
                Some(rest)
            }
            FormatToken::Quarter => take_digits(input, 1, 1).map(|(_, rest)| rest),
            FormatToken::Month => self.set_month(take_digits(input, 1, 2)),
            FormatToken::Month2 => self.set_month(take_digits(input, 2, 2)),
            FormatToken::MonthShort | FormatToken::MonthLong => {
                self.set_month(take_month_name(input, token))
            }
            FormatToken::Day => self.set_day(take_digits(input, 1, 2)),
            FormatToken::Day2 => self.set_day(take_digits(input, 2, 2)),
            FormatToken::DayOrdinal => {
                let rest = self.set_day(take_digits(input, 1, 2))?;
                ["st", "nd", "rd", "th"]
                    .iter()
                    .find_map(|suffix| rest.strip_prefix(suffix))
            }
            FormatToken::DayOfYear => self.set_day_of_year(take_digits(input, 1, 3)),
            FormatToken::DayOfYear3 => self.set_day_of_year(take_digits(input, 3, 3)),
            FormatToken::Weekday => take_digits(input, 1, 1).map(|(_, rest)| rest),
            FormatToken::WeekdayShort | FormatToken::WeekdayLong => {
                take_weekday_name(input, token)
            }
        }
    }

    fn set_month<'a>(&mut self, parsed: Option<(u32, &'a str)>) -> Option<&'a str> {
        let (month, rest) = parsed?;
        self.month = Some(month);
        Some(rest)
    }

    fn set_day<'a>(&mut self, parsed: Option<(u32, &'a str)>) -> Option<&'a str> {
        let (day, rest) = parsed?;
        self.day = Some(day);
        Some(rest)
    }

    fn set_day_of_year<'a>(&mut self, parsed: Option<(u32, &'a str)>) -> Option<&'a str> {
        let (ordinal, rest) = parsed?;
        self.day_of_year = Some(ordinal);
        Some(rest)
    }

    fn into_date(self, fallback_year: i32) -> Option<NaiveDate> {
        let year = self.year.unwrap_or(fallback_year);
        match (self.day_of_year, self.month, self.day) {
            (Some(ordinal), None, None) => NaiveDate::from_yo_opt(year, ordinal),
            (_, month, day) => {
                NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
            }
        }
    }
}

/// Take between `min` and `max` ASCII digits from the front of `input`
fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len < min {
        return None;
    }
    let value = input[..len].parse().ok()?;
    Some((value, &input[len..]))
}

/// Match an English month name, as chrono renders it for `token`, at the front of `input`
fn take_month_name(input: &str, token: FormatToken) -> Option<(u32, &str)> {
    let spec = token.strftime()?;
    (1..=12).find_map(|month| {
        let name = NaiveDate::from_ymd_opt(2000, month, 1)?.format(spec).to_string();
        input.strip_prefix(name.as_str()).map(|rest| (month, rest))
    })
}

/// Match an English weekday name at the front of `input`.
///
/// The weekday itself is not stored: the round-trip check rejects a
/// name that disagrees with the date.
fn take_weekday_name(input: &str, token: FormatToken) -> Option<&str> {
    let spec = token.strftime()?;
    // 2000-01-02 was a Sunday
    let sunday = NaiveDate::from_ymd_opt(2000, 1, 2)?;
    sunday.iter_days().take(7).find_map(|day| {
        let name = day.format(spec).to_string();
        input.strip_prefix(name.as_str())
    })
}
