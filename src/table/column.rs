//! # Column Descriptors
//!
//! A `Column<R>` says how to pull one value out of a record, how to show it,
//! and how it takes part in sorting and filtering.
//!
//! ```rust,ignore
//! let status = Column::new("status", "Status")
//!     .kind(ColumnType::Status)
//!     .filter(FilterType::Select)
//!     .options(vec![FilterOption::new("active", "Active")])
//!     .quick();
//! ```

use std::cmp::Ordering;
use std::sync::Arc;

use super::format::CellContent;
use super::state::SortDirection;
use super::value::{Record, Value};

pub type DeriveFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
pub type RenderFn<R> = Arc<dyn Fn(&R) -> CellContent + Send + Sync>;
pub type SortFn = Arc<dyn Fn(&Value, &Value, SortDirection) -> Ordering + Send + Sync>;
pub type MatchFn<R> = Arc<dyn Fn(&Value, &R) -> bool + Send + Sync>;

/// Where a column gets its value from.
pub enum Accessor<R> {
    /// `record.field(column.key)`
    Key,
    /// A projection over the whole record.
    Derive(DeriveFn<R>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Key => Accessor::Key,
            Accessor::Derive(f) => Accessor::Derive(Arc::clone(f)),
        }
    }
}

/// Default formatting applied when a column has no render override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnType {
    Status,
    Date,
    DateTime,
    Currency,
    #[default]
    Plain,
}

impl ColumnType {
    /// Unknown type names fall back to `Plain`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "status" => ColumnType::Status,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "currency" => ColumnType::Currency,
            _ => ColumnType::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    Select,
    Date,
    Text,
}

/// One choice in a column's filter list.
pub struct FilterOption<R> {
    pub value: String,
    pub label: String,
    /// Custom predicate `(cell, record)`. When absent the default
    /// case-insensitive match applies.
    pub matches: Option<MatchFn<R>>,
}

impl<R> FilterOption<R> {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            matches: None,
        }
    }

    pub fn matching(mut self, f: impl Fn(&Value, &R) -> bool + Send + Sync + 'static) -> Self {
        self.matches = Some(Arc::new(f));
        self
    }
}

impl<R> Clone for FilterOption<R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            label: self.label.clone(),
            matches: self.matches.clone(),
        }
    }
}

pub struct Column<R> {
    pub key: String,
    pub header: String,
    pub accessor: Accessor<R>,
    pub render: Option<RenderFn<R>>,
    pub kind: ColumnType,
    pub sort_fn: Option<SortFn>,
    pub filterable: bool,
    pub filter_type: FilterType,
    pub filter_options: Vec<FilterOption<R>>,
    pub quick_filter: bool,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            kind: self.kind,
            sort_fn: self.sort_fn.clone(),
            filterable: self.filterable,
            filter_type: self.filter_type,
            filter_options: self.filter_options.clone(),
            quick_filter: self.quick_filter,
        }
    }
}

impl<R: Record> Column<R> {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor: Accessor::Key,
            render: None,
            kind: ColumnType::Plain,
            sort_fn: None,
            filterable: false,
            filter_type: FilterType::Select,
            filter_options: Vec::new(),
            quick_filter: false,
        }
    }

    pub fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    pub fn derive(mut self, f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Accessor::Derive(Arc::new(f));
        self
    }

    pub fn render(mut self, f: impl Fn(&R) -> CellContent + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn sort_with(
        mut self,
        f: impl Fn(&Value, &Value, SortDirection) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_fn = Some(Arc::new(f));
        self
    }

    /// Marks the column filterable with the given filter input type.
    pub fn filter(mut self, filter_type: FilterType) -> Self {
        self.filterable = true;
        self.filter_type = filter_type;
        self
    }

    pub fn options(mut self, options: Vec<FilterOption<R>>) -> Self {
        self.filter_options = options;
        self
    }

    /// Show this column's filter outside the collapsible panel.
    pub fn quick(mut self) -> Self {
        self.quick_filter = true;
        self
    }

    /// Extract the raw value: derive function if present, else the keyed field.
    pub fn extract(&self, record: &R) -> Value {
        match &self.accessor {
            Accessor::Key => record.field(&self.key),
            Accessor::Derive(f) => f(record),
        }
    }

    /// Does `record` pass an active filter value on this column?
    pub fn matches_filter(&self, record: &R, filter_value: &str) -> bool {
        let cell = self.extract(record);
        if let Some(option) = self.filter_options.iter().find(|o| o.value == filter_value)
            && let Some(matches) = &option.matches
        {
            return matches(&cell, record);
        }

        let needle = filter_value.to_lowercase();
        match self.filter_type {
            FilterType::Select => cell.folded() == needle,
            FilterType::Date => match cell.as_date() {
                Some(date) => date.format("%Y-%m-%d").to_string() == needle,
                None => cell.folded() == needle,
            },
            FilterType::Text => cell.folded().contains(&needle),
        }
    }

    /// Label for a filter value, falling back to the value itself.
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.filter_options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Row;

    #[test]
    fn test_key_accessor_falls_back_to_field() {
        let col = Column::<Row>::new("name", "Name");
        let row = Row::new(1, "Ahmed", "active");
        assert_eq!(col.extract(&row), Value::from("Ahmed"));
    }

    #[test]
    fn test_derive_accessor_wins() {
        let col = Column::<Row>::new("name", "Name").derive(|r| Value::from(r.name.to_uppercase()));
        let row = Row::new(1, "Ahmed", "active");
        assert_eq!(col.extract(&row), Value::from("AHMED"));
    }

    #[test]
    fn test_select_filter_is_exact_and_case_insensitive() {
        let col = Column::<Row>::new("status", "Status").filter(FilterType::Select);
        let row = Row::new(1, "Ahmed", "Active");
        assert!(col.matches_filter(&row, "active"));
        assert!(!col.matches_filter(&row, "act"));
    }

    #[test]
    fn test_text_filter_is_substring() {
        let col = Column::<Row>::new("name", "Name").filter(FilterType::Text);
        let row = Row::new(1, "Fatima Bibi", "active");
        assert!(col.matches_filter(&row, "BIBI"));
    }

    #[test]
    fn test_option_predicate_overrides_default_match() {
        let col = Column::<Row>::new("amount", "Amount")
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("large", "Over 100").matching(|cell, _| {
                    matches!(cell, Value::Number(n) if *n > 100.0)
                }),
            ]);
        let mut row = Row::new(1, "Ahmed", "active");
        row.amount = 250.0;
        assert!(col.matches_filter(&row, "large"));
        row.amount = 50.0;
        assert!(!col.matches_filter(&row, "large"));
    }

    #[test]
    fn test_column_type_parse_defaults_to_plain() {
        assert_eq!(ColumnType::parse("Currency"), ColumnType::Currency);
        assert_eq!(ColumnType::parse("percent"), ColumnType::Plain);
    }
}
