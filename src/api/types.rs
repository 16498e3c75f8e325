//! Fund API record types.
//!
//! Field names follow the API's JSON. Each type implements `Record` so the
//! table engine can work on it directly.

use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::{Record, Value};

/// The collections the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    #[default]
    Families,
    Members,
    Registers,
    Supports,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Families,
        Resource::Members,
        Resource::Registers,
        Resource::Supports,
    ];

    /// URL path segment.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Families => "families",
            Resource::Members => "members",
            Resource::Registers => "registers",
            Resource::Supports => "supports",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Resource::Families => "Families",
            Resource::Members => "Members",
            Resource::Registers => "Dues Registers",
            Resource::Supports => "Death Support",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == s.trim().to_ascii_lowercase())
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn local_time(ts: Option<DateTime<Utc>>) -> Value {
    ts.map(|t| Value::DateTime(t.with_timezone(&Local).naive_local()))
        .unwrap_or(Value::Null)
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Family {
    pub id: i64,
    pub family_name: String,
    #[serde(default)]
    pub head_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub members_count: Option<i64>,
    #[serde(default)]
    pub joined_on: Option<NaiveDate>,
    #[serde(default)]
    pub balance: Option<f64>,
}

impl Record for Family {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(self.id),
            "family_name" => Value::from(self.family_name.as_str()),
            "head_name" => self.head_name.clone().into(),
            "phone" => self.phone.clone().into(),
            "address" => self.address.clone().into(),
            "status" => Value::from(self.status.as_str()),
            "members_count" => self.members_count.into(),
            "joined_on" => self.joined_on.into(),
            "balance" => self.balance.into(),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Member {
    pub id: i64,
    pub family_id: i64,
    #[serde(default)]
    pub family_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
}

impl Record for Member {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(self.id),
            "family_id" => Value::Int(self.family_id),
            "family_name" => self.family_name.clone().into(),
            "name" => Value::from(self.name.as_str()),
            "relation" => self.relation.clone().into(),
            "phone" => self.phone.clone().into(),
            "date_of_birth" => self.date_of_birth.into(),
            "status" => Value::from(self.status.as_str()),
            _ => Value::Null,
        }
    }
}

/// One family's dues line for a month.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Register {
    pub id: i64,
    /// `YYYY-MM`
    pub month: String,
    pub family_id: i64,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub amount_due: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Record for Register {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(self.id),
            "month" => Value::from(self.month.as_str()),
            "family_id" => Value::Int(self.family_id),
            "family_name" => self.family_name.clone().into(),
            "amount_due" => Value::Number(self.amount_due),
            "amount_paid" => Value::Number(self.amount_paid),
            "status" => Value::from(self.status.as_str()),
            "paid_at" => local_time(self.paid_at),
            _ => Value::Null,
        }
    }
}

/// A death-support collection raised for a bereaved family.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Support {
    pub id: i64,
    pub deceased_name: String,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
    #[serde(default)]
    pub amount_per_family: f64,
    #[serde(default)]
    pub collected: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Support {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(self.id),
            "deceased_name" => Value::from(self.deceased_name.as_str()),
            "family_name" => self.family_name.clone().into(),
            "date_of_death" => self.date_of_death.into(),
            "amount_per_family" => Value::Number(self.amount_per_family),
            "collected" => Value::Number(self.collected),
            "status" => Value::from(self.status.as_str()),
            "created_at" => local_time(self.created_at),
            _ => Value::Null,
        }
    }
}

/// A fetched collection, tagged by resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Families(Vec<Family>),
    Members(Vec<Member>),
    Registers(Vec<Register>),
    Supports(Vec<Support>),
}

impl Dataset {
    pub fn resource(&self) -> Resource {
        match self {
            Dataset::Families(_) => Resource::Families,
            Dataset::Members(_) => Resource::Members,
            Dataset::Registers(_) => Resource::Registers,
            Dataset::Supports(_) => Resource::Supports,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Families(v) => v.len(),
            Dataset::Members(v) => v.len(),
            Dataset::Registers(v) => v.len(),
            Dataset::Supports(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List endpoints return either a bare array or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Bare(v) => v,
            ListResponse::Wrapped { data } => data,
        }
    }
}
