//! HTTP client for the contract-comparison backend REST API: document
//! uploads, comparison runs and fetches, and dashboard aggregates.

mod client;
mod error;
pub mod types;
pub mod validate;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{ActivityEntry, HighRiskContract, Statistics};
