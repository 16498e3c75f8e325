//! # Resource Schemas
//!
//! Column sets and view configurations for each fund resource. This is the
//! only place that knows which fields of a family or register are shown,
//! how they are formatted, and which of them can be filtered.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Local;

use crate::api::{Family, Member, Register, Resource, Support};
use crate::table::{
    CellContent, Column, ColumnType, FilterOption, FilterType, RowAction, SortDirection,
    Value, ViewConfig, ViewMode,
};

/// All column sets, built once at startup.
pub struct Catalog {
    pub families: Vec<Column<Family>>,
    pub members: Vec<Column<Member>>,
    pub registers: Vec<Column<Register>>,
    pub supports: Vec<Column<Support>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            families: family_columns(),
            members: member_columns(),
            registers: register_columns(),
            supports: support_columns(),
        }
    }
}

fn active_inactive<R>() -> Vec<FilterOption<R>> {
    vec![
        FilterOption::new("active", "Active"),
        FilterOption::new("inactive", "Inactive"),
    ]
}

pub fn family_columns() -> Vec<Column<Family>> {
    vec![
        Column::new("family_name", "Family").filter(FilterType::Text),
        Column::new("head_name", "Head"),
        Column::new("status", "Status")
            .kind(ColumnType::Status)
            .filter(FilterType::Select)
            .options(active_inactive())
            .quick(),
        Column::new("members_count", "Members").render(|f: &Family| match f.members_count {
            Some(1) => CellContent::text("1 member"),
            Some(n) => CellContent::text(format!("{n} members")),
            None => CellContent::text("-"),
        }),
        Column::new("balance", "Balance")
            .kind(ColumnType::Currency)
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("owing", "Owing").matching(|cell, _| {
                    matches!(cell, Value::Number(n) if *n < 0.0)
                }),
                FilterOption::new("clear", "Clear").matching(|cell, _| {
                    !matches!(cell, Value::Number(n) if *n < 0.0)
                }),
            ]),
        Column::new("phone", "Phone"),
        Column::new("joined_on", "Joined")
            .kind(ColumnType::Date)
            .filter(FilterType::Date),
    ]
}

pub fn member_columns() -> Vec<Column<Member>> {
    vec![
        Column::new("name", "Name").filter(FilterType::Text),
        Column::new("family_name", "Family").filter(FilterType::Text),
        Column::new("relation", "Relation")
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("head", "Head"),
                FilterOption::new("spouse", "Spouse"),
                FilterOption::new("son", "Son"),
                FilterOption::new("daughter", "Daughter"),
                FilterOption::new("parent", "Parent"),
            ]),
        Column::new("status", "Status")
            .kind(ColumnType::Status)
            .filter(FilterType::Select)
            .options(active_inactive())
            .quick(),
        Column::new("age", "Age").derive(|m: &Member| {
            let today = Local::now().date_naive();
            m.date_of_birth
                .and_then(|dob| today.years_since(dob))
                .map(|years| Value::Int(i64::from(years)))
                .unwrap_or(Value::Null)
        }),
        Column::new("date_of_birth", "Born").kind(ColumnType::Date),
        Column::new("phone", "Phone"),
    ]
}

pub fn register_columns() -> Vec<Column<Register>> {
    vec![
        Column::new("month", "Month").filter(FilterType::Text),
        Column::new("family_name", "Family").filter(FilterType::Text),
        Column::new("status", "Status")
            .kind(ColumnType::Status)
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("paid", "Paid"),
                FilterOption::new("pending", "Pending"),
                FilterOption::new("overdue", "Overdue"),
            ])
            .quick(),
        Column::new("amount_due", "Due").kind(ColumnType::Currency),
        Column::new("amount_paid", "Paid").kind(ColumnType::Currency),
        Column::new("outstanding", "Outstanding")
            .kind(ColumnType::Currency)
            .derive(|r: &Register| Value::Number((r.amount_due - r.amount_paid).max(0.0)))
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("outstanding", "Outstanding").matching(|cell, _| {
                    matches!(cell, Value::Number(n) if *n > 0.0)
                }),
                FilterOption::new("settled", "Settled").matching(|cell, _| {
                    matches!(cell, Value::Number(n) if *n <= 0.0)
                }),
            ]),
        Column::new("paid_at", "Paid At").kind(ColumnType::DateTime),
    ]
}

/// Collections move pending → active → closed; sort in that order rather
/// than alphabetically.
fn support_stage(status: &Value) -> u8 {
    match status.folded().as_str() {
        "pending" => 0,
        "active" => 1,
        "closed" => 2,
        _ => 3,
    }
}

pub fn support_columns() -> Vec<Column<Support>> {
    vec![
        Column::new("deceased_name", "Deceased").filter(FilterType::Text),
        Column::new("family_name", "Family"),
        Column::new("status", "Status")
            .kind(ColumnType::Status)
            .sort_with(|a, b, direction| {
                let ord: Ordering = support_stage(a).cmp(&support_stage(b));
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("pending", "Pending"),
                FilterOption::new("active", "Active"),
                FilterOption::new("closed", "Closed"),
            ])
            .quick(),
        Column::new("date_of_death", "Date of Death")
            .kind(ColumnType::Date)
            .filter(FilterType::Date),
        Column::new("amount_per_family", "Per Family").kind(ColumnType::Currency),
        Column::new("collected", "Collected").kind(ColumnType::Currency),
        Column::new("created_at", "Raised").kind(ColumnType::DateTime),
    ]
}

/// Engine features enabled per resource.
pub fn view_config(resource: Resource, items_per_page: usize, mode: ViewMode) -> ViewConfig {
    let actions: BTreeSet<RowAction> = match resource {
        Resource::Families | Resource::Members => {
            [RowAction::View, RowAction::Edit, RowAction::Delete].into()
        }
        Resource::Registers => [RowAction::View, RowAction::Add].into(),
        Resource::Supports => [RowAction::View, RowAction::Delete].into(),
    };
    ViewConfig {
        searchable: true,
        filterable: true,
        sortable: true,
        pagination: true,
        items_per_page,
        actions,
        mobile_view: mode,
        exportable: true,
        refreshable: true,
    }
}
