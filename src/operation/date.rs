//! Date-part lookups (`created_at__year`, `created_at__month__gte`, ...).
//!
//! A date part names a component extracted from a date or timestamp
//! column. How the extraction is spelled is the dialect's business; this
//! module only knows the closed set of parts and how their comparands are
//! padded on engines that compare strftime text.

/// The extractable components of a date or timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    Day,
    /// Day of the week. Numbering follows the engine: 0 = Sunday on
    /// Postgres and SQLite, 1 = Sunday on MySQL's `DAYOFWEEK`.
    WeekDay,
    Week,
    Hour,
    Minute,
    Second,
    /// Time-of-day component, `HH:MM:SS`.
    Time,
    /// Calendar-date component, `YYYY-MM-DD`.
    Date,
}

impl DatePart {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "year" => DatePart::Year,
            "quarter" => DatePart::Quarter,
            "month" => DatePart::Month,
            "day" => DatePart::Day,
            "week_day" => DatePart::WeekDay,
            "week" => DatePart::Week,
            "hour" => DatePart::Hour,
            "minute" => DatePart::Minute,
            "second" => DatePart::Second,
            "time" => DatePart::Time,
            "date" => DatePart::Date,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Quarter => "quarter",
            DatePart::Month => "month",
            DatePart::Day => "day",
            DatePart::WeekDay => "week_day",
            DatePart::Week => "week",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
            DatePart::Time => "time",
            DatePart::Date => "date",
        }
    }

    /// Pad an integer comparand to the width strftime emits, so textual
    /// comparison behaves like numeric comparison.
    pub fn zero_pad(&self, n: i64) -> String {
        match self {
            DatePart::Year => format!("{:04}", n),
            DatePart::Month
            | DatePart::Day
            | DatePart::Week
            | DatePart::Hour
            | DatePart::Minute
            | DatePart::Second => format!("{:02}", n),
            DatePart::Quarter | DatePart::WeekDay | DatePart::Time | DatePart::Date => {
                n.to_string()
            }
        }
    }
}
