//! # MFStat
//!
//! A personal match-record tracker for Mario Tennis Fever ranked play.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (records, rules, rate bands, wire DTOs)
//! - **filter**: Selection predicates and what-if option counts
//! - **stats**: Derived statistics computation (win rates, usage, rate trends)
//! - **store**: REST client for the external record store
//! - **tracker**: In-memory record set with whole-array mutation semantics
//! - **prefs**: UI preference slots with load/save lifecycle
//! - **config**: Configuration loading and validation

pub mod config;
pub mod datetime;
pub mod filter;
pub mod models;
pub mod prefs;
pub mod stats;
pub mod store;
pub mod tracker;

pub use models::*;
