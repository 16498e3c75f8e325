//! Remote fund API: record types and the HTTP client.

pub mod client;
pub mod types;

pub use client::{ApiError, FundApi, HttpFundApi};
pub use types::{Dataset, Family, Member, Register, Resource, Support};
