//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::api::{ApiError, Dataset, Family, FundApi, Resource};
use crate::core::session::Session;
use crate::table::{Record, Value};

/// A minimal record for exercising the table engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub amount: f64,
}

impl Row {
    pub fn new(id: i64, name: &str, status: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            status: status.to_string(),
            amount: 0.0,
        }
    }
}

impl Record for Row {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(self.id),
            "name" => Value::from(self.name.as_str()),
            "status" => Value::from(self.status.as_str()),
            "amount" => Value::Number(self.amount),
            _ => Value::Null,
        }
    }
}

pub fn family(id: i64, name: &str, status: &str) -> Family {
    Family {
        id,
        family_name: name.to_string(),
        head_name: None,
        phone: None,
        address: None,
        status: status.to_string(),
        members_count: None,
        joined_on: None,
        balance: None,
    }
}

/// An API that returns empty collections and accepts every write.
pub struct NoopApi;

#[async_trait]
impl FundApi for NoopApi {
    async fn fetch(&self, resource: Resource, _session: &Session) -> Result<Dataset, ApiError> {
        Ok(match resource {
            Resource::Families => Dataset::Families(Vec::new()),
            Resource::Members => Dataset::Members(Vec::new()),
            Resource::Registers => Dataset::Registers(Vec::new()),
            Resource::Supports => Dataset::Supports(Vec::new()),
        })
    }

    async fn delete(&self, _resource: Resource, _id: i64, _session: &Session) -> Result<(), ApiError> {
        Ok(())
    }

    async fn set_status(
        &self,
        _resource: Resource,
        _id: i64,
        _status: &str,
        _session: &Session,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn open_register(&self, _month: &str, _session: &Session) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Creates a test App backed by `NoopApi`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopApi), Session::default())
}
