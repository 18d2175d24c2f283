//! Finboard - personal-finance dashboard core
//!
//! This library serves accounts, transactions, budgets, savings goals and
//! alerts from an in-memory store through asynchronous entity services that
//! simulate remote-API latency, and derives dashboard figures from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings
//! - `error`: Custom error types
//! - `models`: Entity records and shared value types
//! - `storage`: In-memory collections and fixture seeding
//! - `services`: Asynchronous entity services
//! - `query`: Transaction filter, sort and paginate pipeline
//! - `reports`: Aggregations, dashboard and reports
//! - `audit`: Audit trail of mutations
//! - `cli` / `display`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::services::Backend;
//!
//! let backend = Backend::seeded()?;
//! let net_worth = backend.accounts().get_total_balance().await?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
