//! # Cell Formatting
//!
//! `render_cell` turns a record + column into display text. A column's
//! `render` override is used verbatim; otherwise the extracted value is
//! formatted by the column's `ColumnType`.
//!
//! | type       | output                                   |
//! |------------|------------------------------------------|
//! | `Status`   | capitalized text + badge style           |
//! | `Date`     | date only (`date_format`)                |
//! | `DateTime` | date and time (`datetime_format`)        |
//! | `Currency` | `$1,234.50` (symbol configurable)        |
//! | `Plain`    | raw text, `-` when null or empty         |

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use super::column::{Column, ColumnType};
use super::value::{Record, Value};

pub const PLACEHOLDER: &str = "-";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";
pub const DEFAULT_DATETIME_FORMAT: &str = "%b %d, %Y %H:%M";

/// Badge styles for `Status` cells. Unknown statuses get `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    Active,
    Inactive,
    Pending,
    #[default]
    Default,
}

impl Badge {
    pub fn for_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "active" => Badge::Active,
            "inactive" => Badge::Inactive,
            "pending" => Badge::Pending,
            _ => Badge::Default,
        }
    }
}

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellContent {
    pub text: String,
    pub badge: Option<Badge>,
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
        }
    }

    pub fn badge(text: impl Into<String>, badge: Badge) -> Self {
        Self {
            text: text.into(),
            badge: Some(badge),
        }
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

/// Per-type formatting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormatter {
    pub currency_symbol: String,
    pub date_format: String,
    pub datetime_format: String,
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl CellFormatter {
    pub fn render_cell<R: Record>(&self, record: &R, column: &Column<R>) -> CellContent {
        if let Some(render) = &column.render {
            return render(record);
        }
        self.format_value(&column.extract(record), column.kind)
    }

    pub fn format_value(&self, value: &Value, kind: ColumnType) -> CellContent {
        if value.is_empty() {
            return CellContent::text(PLACEHOLDER);
        }
        match kind {
            ColumnType::Status => {
                let raw = value.to_string();
                CellContent::badge(capitalize(&raw), Badge::for_status(&raw))
            }
            ColumnType::Date => CellContent::text(self.format_date(value)),
            ColumnType::DateTime => CellContent::text(self.format_datetime(value)),
            ColumnType::Currency => CellContent::text(self.format_currency(value)),
            ColumnType::Plain => CellContent::text(value.to_string()),
        }
    }

    fn format_date(&self, value: &Value) -> String {
        match value.as_date() {
            Some(date) => date.format(&self.date_format).to_string(),
            None => value.to_string(),
        }
    }

    fn format_datetime(&self, value: &Value) -> String {
        match as_datetime(value) {
            Some(dt) => dt.format(&self.datetime_format).to_string(),
            None => value.to_string(),
        }
    }

    fn format_currency(&self, value: &Value) -> String {
        let amount = match value {
            Value::Int(n) => *n as f64,
            Value::Number(n) => *n,
            Value::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return s.clone(),
            },
            other => return other.to_string(),
        };
        let cents = format!("{:.2}", amount.abs());
        let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
        let sign = if amount < 0.0 && cents != "0.00" { "-" } else { "" };
        format!("{sign}{}{}.{frac}", self.currency_symbol, group_thousands(whole))
    }
}

/// Format with default settings.
pub fn render_cell<R: Record>(record: &R, column: &Column<R>) -> CellContent {
    CellFormatter::default().render_cell(record, column)
}

/// Timestamps arrive either typed or as RFC 3339 / ISO text. Zoned text is
/// shown in local time.
fn as_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => d.and_hms_opt(0, 0, 0),
        Value::Text(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }),
        _ => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
