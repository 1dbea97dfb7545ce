//! `<t:seconds[:style]>` timestamp tokens.
//!
//! Timestamps are formatted in UTC with en-US month and weekday names.

use crate::error::MarkupError;
use chrono::DateTime;
use chrono::Utc;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimestampStyle {
    /// `t`: `4:20 PM`
    ShortTime,
    /// `T`: `4:20:30 PM`
    LongTime,
    /// `d`: `11/28/2018`
    ShortDate,
    /// `D`: `November 28, 2018`
    LongDate,
    /// `f`: `November 28, 2018 4:20 PM`
    #[default]
    ShortDateTime,
    /// `F`: `Wednesday, November 28, 2018 4:20 PM`
    LongDateTime,
    /// `R`: `2 hours ago`
    Relative,
}

impl TimestampStyle {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            't' => Self::ShortTime,
            'T' => Self::LongTime,
            'd' => Self::ShortDate,
            'D' => Self::LongDate,
            'f' => Self::ShortDateTime,
            'F' => Self::LongDateTime,
            'R' => Self::Relative,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Self::ShortTime => 't',
            Self::LongTime => 'T',
            Self::ShortDate => 'd',
            Self::LongDate => 'D',
            Self::ShortDateTime => 'f',
            Self::LongDateTime => 'F',
            Self::Relative => 'R',
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::ShortTime => "%-I:%M %p",
            Self::LongTime => "%-I:%M:%S %p",
            Self::ShortDate => "%m/%d/%Y",
            Self::LongDate => "%B %-d, %Y",
            Self::ShortDateTime | Self::Relative => "%B %-d, %Y %-I:%M %p",
            Self::LongDateTime => "%A, %B %-d, %Y %-I:%M %p",
        }
    }
}

impl FromStr for TimestampStyle {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| MarkupError::InvalidTimestampStyle(s.to_string()))
            }
            _ => Err(MarkupError::InvalidTimestampStyle(s.to_string())),
        }
    }
}

/// A recognized timestamp, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestampToken {
    pub seconds: i64,
    pub style: TimestampStyle,
    /// Text shown in place of the token.
    pub display: String,
    /// Long form (`F`), used as hover text.
    pub full: String,
}

/// Formats `seconds` (Unix time) in `style`. `None` when the instant is out of range.
///
/// Relative timestamps need a reference "now"; without one they fall back to the `f` form.
pub fn format_timestamp(
    seconds: i64,
    style: TimestampStyle,
    reference_time: Option<i64>,
) -> Option<String> {
    let at: DateTime<Utc> = DateTime::from_timestamp(seconds, 0)?;
    if style == TimestampStyle::Relative {
        if let Some(now) = reference_time {
            return Some(format_relative(seconds.saturating_sub(now)));
        }
    }
    Some(at.format(style.pattern()).to_string())
}

fn format_relative(delta: i64) -> String {
    const UNITS: [(i64, &str); 6] = [
        (365 * 86_400, "year"),
        (30 * 86_400, "month"),
        (86_400, "day"),
        (3_600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    if delta == 0 {
        return "now".to_string();
    }
    let abs = delta.unsigned_abs();
    let (size, unit) = UNITS
        .iter()
        .copied()
        .find(|(size, _)| abs >= size.unsigned_abs())
        .unwrap_or((1, "second"));
    let n = abs / size.unsigned_abs();
    let plural = if n == 1 { "" } else { "s" };
    if delta > 0 {
        format!("in {n} {unit}{plural}")
    } else {
        format!("{n} {unit}{plural} ago")
    }
}

/// Parses a timestamp token at the start of `s`. Returns the token and its byte length.
pub(crate) fn parse_timestamp(s: &str, reference_time: Option<i64>) -> Option<(TimestampToken, usize)> {
    let body = s.strip_prefix("<t:")?;
    let sign = usize::from(body.starts_with('-'));
    let digits = body[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let seconds: i64 = body[..sign + digits].parse().ok()?;

    let rest = &body[sign + digits..];
    let (style, tail) = if let Some(r) = rest.strip_prefix('>') {
        (TimestampStyle::default(), r)
    } else {
        let mut chars = rest.strip_prefix(':')?.chars();
        let style = TimestampStyle::from_char(chars.next()?)?;
        (style, chars.as_str().strip_prefix('>')?)
    };
    let consumed = s.len() - tail.len();

    let Some(display) = format_timestamp(seconds, style, reference_time) else {
        tracing::trace!(seconds, "timestamp out of range; leaving token literal");
        return None;
    };
    let full = format_timestamp(seconds, TimestampStyle::LongDateTime, None)?;

    Some((
        TimestampToken {
            seconds,
            style,
            display,
            full,
        },
        consumed,
    ))
}
